use super::*;
use crate::compile::{CompileOpts, compile_str};

fn compile(xml: &str) -> Effect {
    compile_str(xml, &CompileOpts::default()).unwrap()
}

fn short(out: &mut Vec<u8>, s: &str) {
    out.push(s.len() as u8);
    out.extend_from_slice(s.as_bytes());
}

fn u32le(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

const MINIMAL: &str = r#"<effect>
  <parameter type="float" name="gamma" value="2.2"/>
  <technique name="Main"><pass name="P0"><state name="cull_mode" value="back"/></pass></technique>
</effect>"#;

#[test]
fn minimal_effect_bytes() {
    let bytes = encode_effect(&compile(MINIMAL)).unwrap();

    let mut want = Vec::new();
    want.extend_from_slice(b"FXML");
    for v in [3, 1, 1, 0, 1] {
        u32le(&mut want, v);
    }
    // parameter
    u32le(&mut want, 0);
    u32le(&mut want, 13);
    short(&mut want, "gamma");
    want.extend_from_slice(&2.2f32.to_le_bytes());
    u32le(&mut want, 0);
    short(&mut want, "");
    // cbuffer
    short(&mut want, "global_cb");
    u32le(&mut want, 1);
    u32le(&mut want, 0);
    // technique
    short(&mut want, "Main");
    want.extend_from_slice(&2.0f32.to_le_bytes());
    u32le(&mut want, 0);
    u32le(&mut want, 1);
    short(&mut want, "P0");
    u32le(&mut want, 0);
    u32le(&mut want, 1);
    u32le(&mut want, 9);
    short(&mut want, "cull_mode");
    want.extend_from_slice(&2i32.to_le_bytes());

    assert_eq!(bytes, want);
}

#[test]
fn encoding_is_deterministic() {
    let a = encode_effect(&compile(MINIMAL)).unwrap();
    let b = encode_effect(&compile(MINIMAL)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn enum_symbol_and_number_encode_identically() {
    let by_name = compile(
        r#"<effect><technique name="T"><pass name="P"><state name="depth_func" value="less_equal"/></pass></technique></effect>"#,
    );
    let by_number = compile(
        r#"<effect><technique name="T"><pass name="P"><state name="depth_func" value="3"/></pass></technique></effect>"#,
    );
    assert_eq!(
        encode_effect(&by_name).unwrap(),
        encode_effect(&by_number).unwrap()
    );
}

#[test]
fn array_parameters_carry_no_value() {
    let fx = compile(r#"<effect><parameter type="float4" name="lights" array_size="8"/></effect>"#);
    let bytes = encode_effect(&fx).unwrap();

    let mut param = Vec::new();
    u32le(&mut param, 8);
    u32le(&mut param, ValueType::Float4.code());
    short(&mut param, "lights");
    u32le(&mut param, 0);
    short(&mut param, "");
    assert_eq!(&bytes[24..24 + param.len()], param.as_slice());
}

#[test]
fn shader_payload_is_profile_then_name() {
    let fx = compile(
        r#"<effect><technique name="T"><pass name="P">
             <state name="vertex_shader" value="vs_main" profile="vs_5_0"/>
           </pass></technique></effect>"#,
    );
    let bytes = encode_effect(&fx).unwrap();

    let mut tail = Vec::new();
    u32le(&mut tail, ValueType::Shader.code());
    short(&mut tail, "vertex_shader");
    short(&mut tail, "vs_5_0");
    short(&mut tail, "vs_main");
    assert!(bytes.ends_with(&tail));
}

#[test]
fn texture_writes_header_only() {
    let fx = compile(r#"<effect><parameter type="texture2D" name="albedo"/></effect>"#);
    let bytes = encode_effect(&fx).unwrap();

    let mut tail = Vec::new();
    u32le(&mut tail, 0);
    u32le(&mut tail, ValueType::Texture2D.code());
    short(&mut tail, "albedo");
    u32le(&mut tail, 0);
    short(&mut tail, "");
    short(&mut tail, "global_cb");
    u32le(&mut tail, 1);
    u32le(&mut tail, 0);
    assert!(bytes.ends_with(&tail));
}

#[test]
fn over_long_names_are_rejected() {
    let name = "n".repeat(256);
    let fx = compile(&format!(r#"<effect><parameter type="int" name="{name}"/></effect>"#));
    let err = encode_effect(&fx).unwrap_err();
    assert!(matches!(err, FxmlError::Encode(_)), "{err}");

    let ok = "n".repeat(255);
    let fx = compile(&format!(r#"<effect><parameter type="int" name="{ok}"/></effect>"#));
    assert!(encode_effect(&fx).is_ok());
}
