use crate::effect::model::{CBufferGroup, Effect};
use crate::effect::parameter::{Annotation, Parameter};
use crate::effect::state::RenderState;
use crate::effect::technique::{Pass, Technique};
use crate::foundation::error::{FxmlError, FxmlResult};
use crate::kfx::writer::{KFX_MAGIC, KFX_VERSION};
use crate::schema::types::{Shape, ValueType};
use crate::schema::value::{Components, SamplerDesc, ShaderRef, Value};

/// Decode a KFX stream back into an [`Effect`].
///
/// Constant-buffer membership is restored on each [`Parameter`] from the group table.
pub fn read_effect(bytes: &[u8]) -> FxmlResult<Effect> {
    let mut r = KfxReader { bytes, pos: 0 };

    let magic = r.take(4)?;
    if magic != KFX_MAGIC.as_slice() {
        return Err(FxmlError::kfx(format!("bad magic {magic:02x?}")));
    }
    let version = r.read_u32()?;
    if version != KFX_VERSION {
        return Err(FxmlError::kfx(format!(
            "unsupported version {version} (expected {KFX_VERSION})"
        )));
    }

    let param_count = r.read_u32()?;
    let cbuffer_count = r.read_u32()?;
    let shader_count = r.read_u32()?;
    let technique_count = r.read_u32()?;

    let mut parameters = (0..param_count)
        .map(|_| read_parameter(&mut r))
        .collect::<FxmlResult<Vec<_>>>()?;

    let mut cbuffers = Vec::new();
    for _ in 0..cbuffer_count {
        let name = r.read_short_string()?;
        let n = r.read_u32()?;
        let members = (0..n).map(|_| r.read_u32()).collect::<FxmlResult<Vec<_>>>()?;
        for &m in &members {
            let p = parameters.get_mut(m as usize).ok_or_else(|| {
                FxmlError::kfx(format!("cbuffer '{name}' references parameter {m}"))
            })?;
            p.cbuffer = Some(name.clone());
        }
        cbuffers.push(CBufferGroup { name, members });
    }

    let mut shaders = Vec::new();
    for _ in 0..shader_count {
        let len = r.read_u32()? as usize;
        let raw = r.take(len)?;
        let text = std::str::from_utf8(raw)
            .map_err(|e| FxmlError::kfx(format!("shader text is not utf-8: {e}")))?;
        shaders.push(text.to_string());
    }

    let techniques = (0..technique_count)
        .map(|_| read_technique(&mut r))
        .collect::<FxmlResult<Vec<_>>>()?;

    if r.pos != bytes.len() {
        return Err(FxmlError::kfx(format!(
            "{} trailing bytes",
            bytes.len() - r.pos
        )));
    }

    Ok(Effect {
        parameters,
        cbuffers,
        shaders,
        techniques,
    })
}

struct KfxReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> KfxReader<'a> {
    fn take(&mut self, n: usize) -> FxmlResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&e| e <= self.bytes.len())
            .ok_or_else(|| FxmlError::kfx(format!("truncated stream at offset {}", self.pos)))?;
        let out = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> FxmlResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn read_u8(&mut self) -> FxmlResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_u32(&mut self) -> FxmlResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_i32(&mut self) -> FxmlResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn read_f32(&mut self) -> FxmlResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    fn read_short_string(&mut self) -> FxmlResult<String> {
        let len = self.read_u8()? as usize;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|e| FxmlError::kfx(format!("string is not utf-8: {e}")))
    }
}

fn read_header(r: &mut KfxReader<'_>) -> FxmlResult<(ValueType, String)> {
    let code = r.read_u32()?;
    let ty = ValueType::from_code(code)
        .ok_or_else(|| FxmlError::kfx(format!("unknown type code {code}")))?;
    Ok((ty, r.read_short_string()?))
}

fn read_payload(r: &mut KfxReader<'_>, ty: ValueType) -> FxmlResult<Value> {
    Ok(match ty.shape() {
        Shape::Bool => Value::Bool(r.read_u8()? != 0),
        Shape::Dword => Value::Dword(r.read_u32()?),
        Shape::String => Value::String(r.read_short_string()?),
        Shape::Texture => Value::Texture,
        Shape::Shader => {
            let profile = r.read_short_string()?;
            let name = r.read_short_string()?;
            Value::Shader(ShaderRef { name, profile })
        }
        Shape::Sampler => {
            let filtering = r.read_i32()?;
            let address_u = r.read_i32()?;
            let address_v = r.read_i32()?;
            let address_w = r.read_i32()?;
            let anisotropy = r.read_i32()?;
            let max_mip_level = r.read_i32()?;
            let mip_map_lod_bias = r.read_f32()?;
            let mut border_clr = [0.0; 4];
            for c in &mut border_clr {
                *c = r.read_f32()?;
            }
            Value::Sampler(SamplerDesc {
                filtering,
                address_u,
                address_v,
                address_w,
                anisotropy,
                max_mip_level,
                mip_map_lod_bias,
                border_clr,
            })
        }
        Shape::Int(n) => Value::Int(
            (0..n)
                .map(|_| r.read_i32())
                .collect::<FxmlResult<Components<i32>>>()?,
        ),
        Shape::Float(n) => Value::Float(
            (0..n)
                .map(|_| r.read_f32())
                .collect::<FxmlResult<Components<f32>>>()?,
        ),
        Shape::Matrix { cols, rows } => Value::Float(
            (0..cols * rows)
                .map(|_| r.read_f32())
                .collect::<FxmlResult<Components<f32>>>()?,
        ),
    })
}

fn read_annotations(r: &mut KfxReader<'_>) -> FxmlResult<Vec<Annotation>> {
    let n = r.read_u32()?;
    (0..n)
        .map(|_| {
            let (value_type, name) = read_header(r)?;
            Ok(Annotation {
                value_type,
                name,
                value: read_payload(r, value_type)?,
            })
        })
        .collect()
}

fn read_parameter(r: &mut KfxReader<'_>) -> FxmlResult<Parameter> {
    let array_size = r.read_u32()?;
    let (value_type, name) = read_header(r)?;
    let value = if array_size == 0 {
        Some(read_payload(r, value_type)?)
    } else {
        None
    };
    let annotations = read_annotations(r)?;
    let semantic = r.read_short_string()?;
    Ok(Parameter {
        semantic,
        value_type,
        name,
        array_size,
        value,
        cbuffer: None,
        annotations,
    })
}

fn read_technique(r: &mut KfxReader<'_>) -> FxmlResult<Technique> {
    let name = r.read_short_string()?;
    let weight = r.read_f32()?;
    let annotations = read_annotations(r)?;
    let pass_count = r.read_u32()?;
    let passes = (0..pass_count)
        .map(|_| read_pass(r))
        .collect::<FxmlResult<Vec<_>>>()?;
    Ok(Technique {
        name,
        annotations,
        passes,
        weight,
    })
}

fn read_pass(r: &mut KfxReader<'_>) -> FxmlResult<Pass> {
    let name = r.read_short_string()?;
    let annotations = read_annotations(r)?;
    let n = r.read_u32()?;
    let mut states = Vec::new();
    for _ in 0..n {
        let (value_type, wire) = read_header(r)?;
        let (state_name, index) = RenderState::split_wire_name(&wire);
        states.push(RenderState {
            name: state_name,
            index,
            value_type,
            value: read_payload(r, value_type)?,
        });
    }
    Ok(Pass {
        name,
        annotations,
        states,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/kfx/reader.rs"]
mod tests;
