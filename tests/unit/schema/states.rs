use super::*;
use crate::schema::value::ShaderRef;
use smallvec::smallvec;

fn state(xml: &str) -> Element {
    Element::parse(xml).unwrap()
}

#[test]
fn table_covers_pipeline_fields() {
    assert_eq!(RENDER_STATES.len(), 42);
    assert_eq!(SAMPLER_STATES.len(), 8);
    let blend_factor = render_state_def("blend_factor").unwrap();
    assert_eq!(blend_factor.value_type, ValueType::Float4);
    assert_eq!(blend_factor.kind, StateKind::Color);
    assert_eq!(
        render_state_def("pixel_shader").unwrap().value_type,
        ValueType::Shader
    );
}

#[test]
fn unknown_render_state_is_fatal() {
    let err = render_state_def("depth_bias").unwrap_err();
    assert!(matches!(err, FxmlError::UnknownStateName(ref n) if n == "depth_bias"));
    assert!(sampler_state_def("depth_bias").is_none());
}

#[test]
fn literal_and_symbol_parse_identically() {
    let def = render_state_def("cull_mode").unwrap();
    let a = def.parse(&state(r#"<state name="cull_mode" value="back"/>"#)).unwrap();
    let b = def.parse(&state(r#"<state name="cull_mode" value="2"/>"#)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, Value::Int(smallvec![2]));
}

#[test]
fn color_write_mask_takes_integers_or_symbols() {
    let def = render_state_def("color_write_mask").unwrap();
    let a = def.parse(&state(r#"<state name="color_write_mask" value="15"/>"#)).unwrap();
    let b = def.parse(&state(r#"<state name="color_write_mask" value="all"/>"#)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn plain_integer_states_accept_masks() {
    let def = render_state_def("sample_mask").unwrap();
    let v = def
        .parse(&state(r#"<state name="sample_mask" value="4294967295"/>"#))
        .unwrap();
    assert_eq!(v, Value::Int(smallvec![-1]));

    let err = def
        .parse(&state(r#"<state name="sample_mask" value="lots"/>"#))
        .unwrap_err();
    assert!(matches!(err, FxmlError::Malformed(_)));
}

#[test]
fn bool_states_only_accept_true() {
    let def = render_state_def("blend_enable").unwrap();
    assert!(
        def.parse(&state(r#"<state name="blend_enable" value="TRUE"/>"#))
            .unwrap()
            .is_truthy()
    );
    assert!(
        !def.parse(&state(r#"<state name="blend_enable" value="1"/>"#))
            .unwrap()
            .is_truthy()
    );
}

#[test]
fn blend_factor_reads_rgba() {
    let def = render_state_def("blend_factor").unwrap();
    let v = def
        .parse(&state(
            r#"<state name="blend_factor" r="0.25" g="0.5" b="0.75" a="1"/>"#,
        ))
        .unwrap();
    assert_eq!(v, Value::Float(smallvec![0.25, 0.5, 0.75, 1.0]));

    let err = def
        .parse(&state(r#"<state name="blend_factor" r="1" g="1" b="1"/>"#))
        .unwrap_err();
    assert!(matches!(err, FxmlError::Malformed(_)));
}

#[test]
fn shader_states_default_profile() {
    let def = render_state_def("vertex_shader").unwrap();
    let v = def
        .parse(&state(r#"<state name="vertex_shader" value="MainVS"/>"#))
        .unwrap();
    assert_eq!(
        v,
        Value::Shader(ShaderRef {
            name: "MainVS".into(),
            profile: "auto".into(),
        })
    );
}

#[test]
fn enum_state_without_value_is_malformed() {
    let def = render_state_def("depth_func").unwrap();
    let err = def.parse(&state(r#"<state name="depth_func"/>"#)).unwrap_err();
    assert!(matches!(err, FxmlError::Malformed(_)));
}

#[test]
fn state_integers_are_decimal_even_with_leading_zeros() {
    let def = render_state_def("front_stencil_ref").unwrap();
    let v = def
        .parse(&state(r#"<state name="front_stencil_ref" value="010"/>"#))
        .unwrap();
    assert_eq!(v, Value::Int(smallvec![10]));
    let v = def
        .parse(&state(r#"<state name="front_stencil_ref" value="08"/>"#))
        .unwrap();
    assert_eq!(v, Value::Int(smallvec![8]));

    let err = def
        .parse(&state(r#"<state name="front_stencil_ref" value="0x10"/>"#))
        .unwrap_err();
    assert!(matches!(err, FxmlError::Malformed(_)));

    let cull = render_state_def("cull_mode").unwrap();
    let v = cull
        .parse(&state(r#"<state name="cull_mode" value="02"/>"#))
        .unwrap();
    assert_eq!(v, Value::Int(smallvec![2]));
}
