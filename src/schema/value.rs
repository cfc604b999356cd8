use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::Element;
use crate::schema::states::sampler_state_def;
use crate::schema::types::{Shape, ValueType};
use smallvec::SmallVec;
use std::fmt;

/// Inline storage for vector components; matrices spill to the heap.
pub type Components<T> = SmallVec<[T; 4]>;

const VECTOR_ATTRS: [&str; 4] = ["x", "y", "z", "w"];

/// A parsed, type-tagged payload.
///
/// The owning record carries the [`ValueType`]; the variant only fixes the storage.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// `bool`.
    Bool(bool),
    /// `dword`.
    Dword(u32),
    /// `int` .. `int4`.
    Int(Components<i32>),
    /// `float` .. `float4` and row-major matrices.
    Float(Components<f32>),
    /// `string`.
    String(String),
    /// Texture declarations carry no payload.
    Texture,
    /// Shader entry point.
    Shader(ShaderRef),
    /// Sampler record.
    Sampler(SamplerDesc),
}

/// Shader function reference.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ShaderRef {
    /// Entry-point function name.
    pub name: String,
    /// Target profile, `auto` unless given.
    pub profile: String,
}

/// Fixed sampler record.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SamplerDesc {
    /// Filtering mode code.
    pub filtering: i32,
    /// U addressing mode.
    pub address_u: i32,
    /// V addressing mode.
    pub address_v: i32,
    /// W addressing mode.
    pub address_w: i32,
    /// Maximum anisotropy.
    pub anisotropy: i32,
    /// Highest mip level sampled.
    pub max_mip_level: i32,
    /// Mip LOD bias.
    pub mip_map_lod_bias: f32,
    /// Border color RGBA.
    pub border_clr: [f32; 4],
}

impl Default for SamplerDesc {
    fn default() -> Self {
        // Point filtering, wrap on every axis.
        Self {
            filtering: 0,
            address_u: 0,
            address_v: 0,
            address_w: 0,
            anisotropy: 1,
            max_mip_level: 0,
            mip_map_lod_bias: 0.0,
            border_clr: [0.0; 4],
        }
    }
}

impl SamplerDesc {
    fn set(&mut self, field: &str, value: &Value) {
        match (field, value) {
            ("filtering", Value::Int(c)) => self.filtering = c[0],
            ("address_u", Value::Int(c)) => self.address_u = c[0],
            ("address_v", Value::Int(c)) => self.address_v = c[0],
            ("address_w", Value::Int(c)) => self.address_w = c[0],
            ("anisotropy", Value::Int(c)) => self.anisotropy = c[0],
            ("max_mip_level", Value::Int(c)) => self.max_mip_level = c[0],
            ("mip_map_lod_bias", Value::Float(c)) => self.mip_map_lod_bias = c[0],
            ("border_clr", Value::Float(c)) => {
                for (dst, src) in self.border_clr.iter_mut().zip(c.iter()) {
                    *dst = *src;
                }
            }
            _ => {}
        }
    }
}

impl Value {
    /// Zero value for `ty`, as used when markup omits it.
    pub fn zero(ty: ValueType) -> Self {
        match ty.shape() {
            Shape::Bool => Self::Bool(false),
            Shape::Dword => Self::Dword(0),
            Shape::String => Self::String(String::new()),
            Shape::Texture => Self::Texture,
            Shape::Sampler => Self::Sampler(SamplerDesc::default()),
            Shape::Shader => Self::Shader(ShaderRef {
                name: String::new(),
                profile: "auto".to_string(),
            }),
            Shape::Int(n) => Self::Int(SmallVec::from_elem(0, n)),
            Shape::Float(n) => Self::Float(SmallVec::from_elem(0.0, n)),
            Shape::Matrix { cols, rows } => Self::Float(SmallVec::from_elem(0.0, cols * rows)),
        }
    }

    /// Return `true` for a `bool` value that is set.
    pub fn is_truthy(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

/// Parse the payload of `ty` from `el`, skipping unknown sampler fields.
pub fn parse_value(ty: ValueType, el: &Element) -> FxmlResult<Value> {
    parse_value_with(ty, el, false)
}

/// Parse the payload of `ty` from `el`.
///
/// With `strict`, unknown sampler fields are fatal instead of logged.
pub(crate) fn parse_value_with(ty: ValueType, el: &Element, strict: bool) -> FxmlResult<Value> {
    Ok(match ty.shape() {
        Shape::Bool => Value::Bool(el.attr("value").is_some_and(is_true)),
        Shape::Dword => match el.attr("value") {
            Some(s) => Value::Dword(
                parse_c_integer(s)
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| bad_number(el, "value", s, "dword"))?,
            ),
            None => Value::Dword(0),
        },
        Shape::String => Value::String(el.attr("value").unwrap_or_default().to_string()),
        Shape::Texture => Value::Texture,
        Shape::Sampler => Value::Sampler(parse_sampler(el, strict)?),
        Shape::Shader => Value::Shader(parse_shader_ref(el)),
        Shape::Int(1) => {
            let v = match el.attr("value") {
                Some(s) => parse_c_integer(s)
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| bad_number(el, "value", s, "int"))?,
                None => 0,
            };
            Value::Int(SmallVec::from_elem(v, 1))
        }
        Shape::Int(n) => {
            let mut c = Components::new();
            for attr in &VECTOR_ATTRS[..n] {
                c.push(opt_int(el, attr)?.unwrap_or(0));
            }
            Value::Int(c)
        }
        Shape::Float(1) => Value::Float(SmallVec::from_elem(opt_float(el, "value")?.unwrap_or(0.0), 1)),
        Shape::Float(n) => {
            let mut c = Components::new();
            for attr in &VECTOR_ATTRS[..n] {
                c.push(opt_float(el, attr)?.unwrap_or(0.0));
            }
            Value::Float(c)
        }
        Shape::Matrix { cols, rows } => {
            let mut c = Components::with_capacity(cols * rows);
            for attr in matrix_attrs(cols, rows) {
                c.push(opt_float(el, &attr)?.unwrap_or(0.0));
            }
            Value::Float(c)
        }
    })
}

/// Cell attribute names `_{row}{col}` in wire order.
pub fn matrix_attrs(cols: usize, rows: usize) -> impl Iterator<Item = String> {
    (0..rows).flat_map(move |y| (0..cols).map(move |x| format!("_{y}{x}")))
}

pub(crate) fn parse_shader_ref(el: &Element) -> ShaderRef {
    ShaderRef {
        name: el.attr("value").unwrap_or_default().to_string(),
        profile: el.attr("profile").unwrap_or("auto").to_string(),
    }
}

fn parse_sampler(el: &Element, strict: bool) -> FxmlResult<SamplerDesc> {
    let mut desc = SamplerDesc::default();
    for st in el.descendants_named("state") {
        let field = st.required_attr("name")?;
        let Some(def) = sampler_state_def(field) else {
            if strict {
                return Err(FxmlError::UnknownStateName(field.to_string()));
            }
            tracing::warn!(
                sampler = el.attr("name").unwrap_or_default(),
                field,
                "unknown sampler state skipped"
            );
            continue;
        };
        let v = def.parse(st)?;
        desc.set(def.name, &v);
    }
    Ok(desc)
}

pub(crate) fn is_true(s: &str) -> bool {
    s.eq_ignore_ascii_case("true")
}

/// Integer literal: `0x` hex, leading-zero octal, or decimal.
///
/// Only the single `value` of `int` and `dword` uses this form; every other integer field is
/// decimal.
fn parse_c_integer(text: &str) -> Option<i64> {
    let s = text.trim().to_ascii_lowercase();
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(&s)),
    };
    if digits.is_empty() || !digits.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    let mag = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if neg { -mag } else { mag })
}

/// Plain decimal integer, optional sign. Leading zeros do not switch the base.
pub(crate) fn parse_decimal(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Decimal integer reinterpreted as 32 bits, accepting the full `i32` and `u32` ranges.
pub(crate) fn parse_int_bits(text: &str) -> Option<i32> {
    let v = parse_decimal(text)?;
    (i64::from(i32::MIN)..=i64::from(u32::MAX))
        .contains(&v)
        .then_some(v as i32)
}

pub(crate) fn parse_float(text: &str) -> Option<f32> {
    text.trim().parse::<f64>().ok().map(|v| v as f32)
}

fn opt_int(el: &Element, attr: &str) -> FxmlResult<Option<i32>> {
    el.attr(attr)
        .map(|s| {
            parse_decimal(s)
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| bad_number(el, attr, s, "int"))
        })
        .transpose()
}

pub(crate) fn opt_float(el: &Element, attr: &str) -> FxmlResult<Option<f32>> {
    el.attr(attr)
        .map(|s| parse_float(s).ok_or_else(|| bad_number(el, attr, s, "float")))
        .transpose()
}

pub(crate) fn required_float(el: &Element, attr: &str) -> FxmlResult<f32> {
    let s = el.required_attr(attr)?;
    parse_float(s).ok_or_else(|| bad_number(el, attr, s, "float"))
}

pub(crate) fn bad_number(el: &Element, attr: &str, text: &str, what: &str) -> FxmlError {
    FxmlError::malformed(format!(
        "<{} name=\"{}\"> attribute '{attr}': '{text}' is not a valid {what}",
        el.name,
        el.attr("name").unwrap_or_default()
    ))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Dword(v) => write!(f, "{v}"),
            Self::Int(c) if c.len() == 1 => write!(f, "{}", c[0]),
            Self::Float(c) if c.len() == 1 => write!(f, "{}", c[0]),
            Self::Int(c) => write_list(f, c),
            Self::Float(c) => write_list(f, c),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Texture => f.write_str("{}"),
            Self::Shader(s) => write!(f, "compile {} {}()", s.profile, s.name),
            Self::Sampler(s) => write!(
                f,
                "{{filtering={}, address_u={}, address_v={}, address_w={}, anisotropy={}, \
                 max_mip_level={}, mip_map_lod_bias={}, border_clr={{{}, {}, {}, {}}}}}",
                s.filtering,
                s.address_u,
                s.address_v,
                s.address_w,
                s.anisotropy,
                s.max_mip_level,
                s.mip_map_lod_bias,
                s.border_clr[0],
                s.border_clr[1],
                s.border_clr[2],
                s.border_clr[3],
            ),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("{")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str("}")
}

#[cfg(test)]
#[path = "../../tests/unit/schema/value.rs"]
mod tests;
