use super::*;
use smallvec::smallvec;

fn parse(ty: ValueType, xml: &str) -> Value {
    parse_value(ty, &Element::parse(xml).unwrap()).unwrap()
}

#[test]
fn omitted_scalars_default_to_zero() {
    assert_eq!(
        parse(ValueType::Float, r#"<parameter type="float" name="x"/>"#),
        Value::Float(smallvec![0.0])
    );
    assert_eq!(
        parse(ValueType::Int4, r#"<parameter type="int4" name="v"/>"#),
        Value::Int(smallvec![0, 0, 0, 0])
    );
    assert_eq!(
        parse(ValueType::Bool, r#"<parameter type="bool" name="b"/>"#),
        Value::Bool(false)
    );
    assert_eq!(
        parse(ValueType::String, r#"<parameter type="string" name="s"/>"#),
        Value::String(String::new())
    );
}

#[test]
fn missing_vector_components_default_individually() {
    assert_eq!(
        parse(ValueType::Float3, r#"<parameter x="1.5" z="-2"/>"#),
        Value::Float(smallvec![1.5, 0.0, -2.0])
    );
    assert_eq!(
        parse(ValueType::Int2, r#"<parameter y="7"/>"#),
        Value::Int(smallvec![0, 7])
    );
}

#[test]
fn matrix_cells_follow_underscore_row_col_scheme() {
    let attrs: Vec<String> = matrix_attrs(2, 3).collect();
    assert_eq!(attrs, ["_00", "_01", "_10", "_11", "_20", "_21"]);

    let v = parse(
        ValueType::Float2x3,
        r#"<parameter _00="1" _01="2" _10="3" _21="6"/>"#,
    );
    assert_eq!(v, Value::Float(smallvec![1.0, 2.0, 3.0, 0.0, 0.0, 6.0]));

    let identity = parse(
        ValueType::Float4x4,
        r#"<parameter _00="1" _11="1" _22="1" _33="1"/>"#,
    );
    let Value::Float(cells) = identity else {
        panic!("matrix should be float cells");
    };
    assert_eq!(cells.len(), 16);
    for (i, c) in cells.iter().enumerate() {
        let expect = if i % 5 == 0 { 1.0 } else { 0.0 };
        assert_eq!(*c, expect, "cell {i}");
    }
}

#[test]
fn int_values_accept_hex_and_octal() {
    assert_eq!(parse(ValueType::Int, r#"<p value="0x1F"/>"#), Value::Int(smallvec![31]));
    assert_eq!(parse(ValueType::Int, r#"<p value="017"/>"#), Value::Int(smallvec![15]));
    assert_eq!(parse(ValueType::Int, r#"<p value="-12"/>"#), Value::Int(smallvec![-12]));
    assert_eq!(parse(ValueType::Int, r#"<p value="0"/>"#), Value::Int(smallvec![0]));
    assert_eq!(
        parse(ValueType::Dword, r#"<p value="0xFFFFFFFF"/>"#),
        Value::Dword(u32::MAX)
    );
}

#[test]
fn bad_numbers_are_malformed() {
    let el = Element::parse(r#"<parameter name="g" value="abc"/>"#).unwrap();
    let err = parse_value(ValueType::Float, &el).unwrap_err();
    assert!(matches!(err, FxmlError::Malformed(_)));
    assert!(err.to_string().contains("'abc' is not a valid float"));

    let el = Element::parse(r#"<parameter value="-1"/>"#).unwrap();
    assert!(parse_value(ValueType::Dword, &el).is_err());

    let el = Element::parse(r#"<parameter value="0x100000000"/>"#).unwrap();
    assert!(parse_value(ValueType::Int, &el).is_err());
}

#[test]
fn shader_ref_defaults_profile_to_auto() {
    assert_eq!(
        parse(ValueType::Shader, r#"<p value="MainPS"/>"#),
        Value::Shader(ShaderRef {
            name: "MainPS".into(),
            profile: "auto".into(),
        })
    );
    assert_eq!(
        parse(ValueType::Shader, r#"<p value="MainPS" profile="ps_5_0"/>"#),
        Value::Shader(ShaderRef {
            name: "MainPS".into(),
            profile: "ps_5_0".into(),
        })
    );
}

#[test]
fn sampler_defaults_then_overlays_states_last_wins() {
    let v = parse(
        ValueType::Sampler,
        r#"<parameter type="sampler" name="s">
             <state name="filtering" value="min_mag_mip_linear"/>
             <state name="address_u" value="clamp"/>
             <state name="address_u" value="1"/>
             <state name="anisotropy" value="8"/>
             <state name="mip_map_lod_bias" value="-0.5"/>
             <state name="border_clr" r="1" g="0" b="0" a="1"/>
           </parameter>"#,
    );
    assert_eq!(
        v,
        Value::Sampler(SamplerDesc {
            filtering: 7,
            address_u: 1,
            address_v: 0,
            address_w: 0,
            anisotropy: 8,
            max_mip_level: 0,
            mip_map_lod_bias: -0.5,
            border_clr: [1.0, 0.0, 0.0, 1.0],
        })
    );
}

#[test]
fn unknown_sampler_field_is_skipped_unless_strict() {
    let el = Element::parse(
        r#"<parameter type="sampler" name="s">
             <state name="comparison" value="less"/>
             <state name="address_v" value="mirror"/>
           </parameter>"#,
    )
    .unwrap();

    let Value::Sampler(desc) = parse_value(ValueType::Sampler, &el).unwrap() else {
        panic!("expected sampler");
    };
    assert_eq!(desc.address_v, 1);

    let err = parse_value_with(ValueType::Sampler, &el, true).unwrap_err();
    assert!(matches!(err, FxmlError::UnknownStateName(ref n) if n == "comparison"));
}

#[test]
fn sampler_enum_failure_is_fatal() {
    let el = Element::parse(
        r#"<parameter type="sampler" name="s"><state name="address_u" value="repeat"/></parameter>"#,
    )
    .unwrap();
    let err = parse_value(ValueType::Sampler, &el).unwrap_err();
    assert!(matches!(err, FxmlError::UnknownEnumValue { ref field, .. } if field == "address_u"));
}

#[test]
fn zero_matches_defaulted_parse() {
    for ty in [
        ValueType::Bool,
        ValueType::Dword,
        ValueType::Int3,
        ValueType::Float4,
        ValueType::Float3x4,
        ValueType::Sampler,
        ValueType::Texture2D,
    ] {
        assert_eq!(Value::zero(ty), parse(ty, "<parameter/>"), "{ty}");
    }
}

#[test]
fn display_lists_components() {
    assert_eq!(Value::Float(smallvec![2.5]).to_string(), "2.5");
    assert_eq!(Value::Int(smallvec![1, 2, 3]).to_string(), "{1, 2, 3}");
    assert_eq!(Value::String("hi".into()).to_string(), "\"hi\"");
}

#[test]
fn vector_components_are_decimal() {
    assert_eq!(
        parse(ValueType::Int2, r#"<parameter x="010" y="09"/>"#),
        Value::Int(smallvec![10, 9])
    );
    // The scalar `value` keeps the hex/octal literal forms.
    assert_eq!(parse(ValueType::Int, r#"<p value="010"/>"#), Value::Int(smallvec![8]));
}

#[test]
fn sampler_fields_are_decimal() {
    let Value::Sampler(desc) = parse(
        ValueType::Sampler,
        r#"<parameter type="sampler" name="s">
             <state name="anisotropy" value="016"/>
             <state name="max_mip_level" value="08"/>
           </parameter>"#,
    ) else {
        panic!("expected sampler");
    };
    assert_eq!(desc.anisotropy, 16);
    assert_eq!(desc.max_mip_level, 8);
}
