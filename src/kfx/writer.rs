use crate::effect::model::Effect;
use crate::effect::parameter::{Annotation, Parameter};
use crate::effect::technique::{Pass, Technique};
use crate::foundation::error::{FxmlError, FxmlResult};
use crate::schema::types::ValueType;
use crate::schema::value::Value;

/// Leading magic of every KFX stream.
pub const KFX_MAGIC: [u8; 4] = *b"FXML";

/// Format version written by this compiler.
pub const KFX_VERSION: u32 = 3;

/// Encode `effect` as a little-endian KFX stream.
///
/// Output depends only on `effect`: identical input always yields identical bytes.
#[tracing::instrument(skip_all)]
pub fn encode_effect(effect: &Effect) -> FxmlResult<Vec<u8>> {
    let mut w = KfxWriter::new();

    w.write_bytes(&KFX_MAGIC);
    w.write_u32(KFX_VERSION);
    w.write_count(effect.parameters.len(), "parameters")?;
    w.write_count(effect.cbuffers.len(), "cbuffers")?;
    w.write_count(effect.shaders.len(), "shaders")?;
    w.write_count(effect.techniques.len(), "techniques")?;

    for p in &effect.parameters {
        write_parameter(&mut w, p)?;
    }

    for g in &effect.cbuffers {
        w.write_short_string(&g.name)?;
        w.write_count(g.members.len(), "cbuffer members")?;
        for &m in &g.members {
            w.write_u32(m);
        }
    }

    for s in &effect.shaders {
        w.write_count(s.len(), "shader bytes")?;
        w.write_bytes(s.as_bytes());
    }

    for t in &effect.techniques {
        write_technique(&mut w, t)?;
    }

    let out = w.finish();
    tracing::debug!(bytes = out.len(), "kfx encoded");
    Ok(out)
}

struct KfxWriter {
    buf: Vec<u8>,
}

impl KfxWriter {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_count(&mut self, n: usize, what: &str) -> FxmlResult<()> {
        let n = u32::try_from(n)
            .map_err(|_| FxmlError::encode(format!("too many {what} ({n})")))?;
        self.write_u32(n);
        Ok(())
    }

    /// One length byte, then the raw bytes.
    fn write_short_string(&mut self, s: &str) -> FxmlResult<()> {
        let len = u8::try_from(s.len()).map_err(|_| {
            FxmlError::encode(format!(
                "string of {} bytes exceeds the 255-byte limit: '{}...'",
                s.len(),
                s.chars().take(32).collect::<String>()
            ))
        })?;
        self.write_u8(len);
        self.write_bytes(s.as_bytes());
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Type code + name, then the payload when there is one.
fn write_var(
    w: &mut KfxWriter,
    value_type: ValueType,
    name: &str,
    value: Option<&Value>,
) -> FxmlResult<()> {
    w.write_u32(value_type.code());
    w.write_short_string(name)?;
    if let Some(v) = value {
        write_payload(w, v)?;
    }
    Ok(())
}

fn write_payload(w: &mut KfxWriter, value: &Value) -> FxmlResult<()> {
    match value {
        Value::Bool(b) => w.write_u8(u8::from(*b)),
        Value::Dword(v) => w.write_u32(*v),
        Value::Int(c) => {
            for &v in c {
                w.write_i32(v);
            }
        }
        Value::Float(c) => {
            for &v in c {
                w.write_f32(v);
            }
        }
        Value::String(s) => w.write_short_string(s)?,
        Value::Texture => {}
        Value::Shader(s) => {
            w.write_short_string(&s.profile)?;
            w.write_short_string(&s.name)?;
        }
        Value::Sampler(s) => {
            for v in [
                s.filtering,
                s.address_u,
                s.address_v,
                s.address_w,
                s.anisotropy,
                s.max_mip_level,
            ] {
                w.write_i32(v);
            }
            w.write_f32(s.mip_map_lod_bias);
            for v in s.border_clr {
                w.write_f32(v);
            }
        }
    }
    Ok(())
}

fn write_annotations(w: &mut KfxWriter, anns: &[Annotation]) -> FxmlResult<()> {
    w.write_count(anns.len(), "annotations")?;
    for a in anns {
        write_var(w, a.value_type, &a.name, Some(&a.value))?;
    }
    Ok(())
}

fn write_parameter(w: &mut KfxWriter, p: &Parameter) -> FxmlResult<()> {
    w.write_u32(p.array_size);
    // Arrays carry no initial value.
    let value = if p.array_size == 0 {
        p.value.as_ref()
    } else {
        None
    };
    write_var(w, p.value_type, &p.name, value)?;
    write_annotations(w, &p.annotations)?;
    w.write_short_string(&p.semantic)
}

fn write_technique(w: &mut KfxWriter, t: &Technique) -> FxmlResult<()> {
    w.write_short_string(&t.name)?;
    w.write_f32(t.weight);
    write_annotations(w, &t.annotations)?;
    w.write_count(t.passes.len(), "passes")?;
    for p in &t.passes {
        write_pass(w, p)?;
    }
    Ok(())
}

fn write_pass(w: &mut KfxWriter, p: &Pass) -> FxmlResult<()> {
    w.write_short_string(&p.name)?;
    write_annotations(w, &p.annotations)?;
    w.write_count(p.states.len(), "render states")?;
    for s in &p.states {
        write_var(w, s.value_type, &s.wire_name(), Some(&s.value))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/kfx/writer.rs"]
mod tests;
