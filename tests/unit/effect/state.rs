use super::*;
use smallvec::smallvec;

fn state(xml: &str) -> FxmlResult<RenderState> {
    RenderState::from_element(&Element::parse(xml)?)
}

#[test]
fn resolves_type_and_value() {
    let s = state(r#"<state name="depth_func" value="less_equal"/>"#).unwrap();
    assert_eq!(s.name, "depth_func");
    assert_eq!(s.index, None);
    assert_eq!(s.value_type, ValueType::Int);
    assert_eq!(s.value, Value::Int(smallvec![3]));
    assert_eq!(s.wire_name(), "depth_func");
}

#[test]
fn indexed_state_synthesizes_wire_name() {
    let s = state(r#"<state name="blend_enable" index="2" value="true"/>"#).unwrap();
    assert_eq!(s.index, Some(2));
    assert_eq!(s.wire_name(), "blend_enable[2]");
    assert_eq!(
        RenderState::split_wire_name("blend_enable[2]"),
        ("blend_enable".to_string(), Some(2))
    );
    assert_eq!(
        RenderState::split_wire_name("cull_mode"),
        ("cull_mode".to_string(), None)
    );
}

#[test]
fn unknown_state_name_is_fatal() {
    let err = state(r#"<state name="wireframe" value="true"/>"#).unwrap_err();
    assert!(matches!(err, FxmlError::UnknownStateName(ref n) if n == "wireframe"));
}

#[test]
fn bad_index_is_malformed() {
    let err = state(r#"<state name="blend_enable" index="x" value="true"/>"#).unwrap_err();
    assert!(matches!(err, FxmlError::Malformed(_)));
}

#[test]
fn block_collects_direct_states_in_order() {
    let el = Element::parse(
        r#"<state_block name="alpha_blend">
             <state name="blend_enable" value="true"/>
             <state name="src_blend" value="src_alpha"/>
             <state name="dest_blend" value="inv_src_alpha"/>
           </state_block>"#,
    )
    .unwrap();
    let block = StateBlock::from_element(&el).unwrap();
    assert_eq!(block.name, "alpha_blend");
    let names: Vec<&str> = block.states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["blend_enable", "src_blend", "dest_blend"]);
    assert_eq!(block.states[2].value, Value::Int(smallvec![4]));
}

#[test]
fn index_is_decimal() {
    let s = state(r#"<state name="blend_enable" index="010" value="true"/>"#).unwrap();
    assert_eq!(s.index, Some(10));
    assert_eq!(s.wire_name(), "blend_enable[10]");
    let s = state(r#"<state name="blend_enable" index="07" value="true"/>"#).unwrap();
    assert_eq!(s.index, Some(7));
}
