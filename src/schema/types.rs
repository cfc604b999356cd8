use crate::foundation::error::{FxmlError, FxmlResult};
use std::fmt;

/// Closed set of value types understood by the KFX format.
///
/// The discriminant IS the wire code: the order must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ValueType {
    /// `bool`, one byte on the wire.
    Bool = 0,
    /// `dword`, unsigned 32-bit.
    Dword = 1,
    /// `string`, short string.
    String = 2,
    /// `texture1D`, no payload.
    Texture1D = 3,
    /// `texture2D`, no payload.
    Texture2D = 4,
    /// `texture3D`, no payload.
    Texture3D = 5,
    /// `textureCUBE`, no payload.
    TextureCube = 6,
    /// `sampler`, fixed sampler record.
    Sampler = 7,
    /// `shader`, profile + function name.
    Shader = 8,
    /// `int`.
    Int = 9,
    /// `int2`.
    Int2 = 10,
    /// `int3`.
    Int3 = 11,
    /// `int4`.
    Int4 = 12,
    /// `float`.
    Float = 13,
    /// `float2`.
    Float2 = 14,
    /// `float2x2`.
    Float2x2 = 15,
    /// `float2x3`.
    Float2x3 = 16,
    /// `float2x4`.
    Float2x4 = 17,
    /// `float3`.
    Float3 = 18,
    /// `float3x2`.
    Float3x2 = 19,
    /// `float3x3`.
    Float3x3 = 20,
    /// `float3x4`.
    Float3x4 = 21,
    /// `float4`.
    Float4 = 22,
    /// `float4x2`.
    Float4x2 = 23,
    /// `float4x3`.
    Float4x3 = 24,
    /// `float4x4`.
    Float4x4 = 25,
}

/// How a type's payload is laid out, both in markup and on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Single `value`, `true` when it reads `true`.
    Bool,
    /// Single unsigned `value`.
    Dword,
    /// Single `value` text.
    String,
    /// Declaration only.
    Texture,
    /// Nested `<state>` sampler fields.
    Sampler,
    /// `value` function name + `profile`.
    Shader,
    /// `n` signed components (`value` when `n == 1`, else `x,y,z,w`).
    Int(usize),
    /// `n` float components (`value` when `n == 1`, else `x,y,z,w`).
    Float(usize),
    /// Matrix read from `_{row}{col}` attributes, `rows` outer, `cols` inner.
    Matrix {
        /// Column count (first number of the type name).
        cols: usize,
        /// Row count (second number of the type name).
        rows: usize,
    },
}

const TYPE_TABLE: [(ValueType, &str); 26] = [
    (ValueType::Bool, "bool"),
    (ValueType::Dword, "dword"),
    (ValueType::String, "string"),
    (ValueType::Texture1D, "texture1D"),
    (ValueType::Texture2D, "texture2D"),
    (ValueType::Texture3D, "texture3D"),
    (ValueType::TextureCube, "textureCUBE"),
    (ValueType::Sampler, "sampler"),
    (ValueType::Shader, "shader"),
    (ValueType::Int, "int"),
    (ValueType::Int2, "int2"),
    (ValueType::Int3, "int3"),
    (ValueType::Int4, "int4"),
    (ValueType::Float, "float"),
    (ValueType::Float2, "float2"),
    (ValueType::Float2x2, "float2x2"),
    (ValueType::Float2x3, "float2x3"),
    (ValueType::Float2x4, "float2x4"),
    (ValueType::Float3, "float3"),
    (ValueType::Float3x2, "float3x2"),
    (ValueType::Float3x3, "float3x3"),
    (ValueType::Float3x4, "float3x4"),
    (ValueType::Float4, "float4"),
    (ValueType::Float4x2, "float4x2"),
    (ValueType::Float4x3, "float4x3"),
    (ValueType::Float4x4, "float4x4"),
];

impl ValueType {
    /// Number of registered types.
    pub const COUNT: usize = TYPE_TABLE.len();

    /// Stable wire code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Inverse of [`ValueType::code`].
    pub fn from_code(code: u32) -> Option<Self> {
        TYPE_TABLE.get(code as usize).map(|(t, _)| *t)
    }

    /// Markup spelling of the type.
    pub fn name(self) -> &'static str {
        TYPE_TABLE[self as usize].1
    }

    /// Look up a markup type name.
    pub fn from_name(name: &str) -> FxmlResult<Self> {
        TYPE_TABLE
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(t, _)| *t)
            .ok_or_else(|| FxmlError::UnknownType(name.to_string()))
    }

    /// Payload layout of this type.
    pub fn shape(self) -> Shape {
        use ValueType::*;
        match self {
            Bool => Shape::Bool,
            Dword => Shape::Dword,
            String => Shape::String,
            Texture1D | Texture2D | Texture3D | TextureCube => Shape::Texture,
            Sampler => Shape::Sampler,
            Shader => Shape::Shader,
            Int => Shape::Int(1),
            Int2 => Shape::Int(2),
            Int3 => Shape::Int(3),
            Int4 => Shape::Int(4),
            Float => Shape::Float(1),
            Float2 => Shape::Float(2),
            Float3 => Shape::Float(3),
            Float4 => Shape::Float(4),
            Float2x2 => Shape::Matrix { cols: 2, rows: 2 },
            Float2x3 => Shape::Matrix { cols: 2, rows: 3 },
            Float2x4 => Shape::Matrix { cols: 2, rows: 4 },
            Float3x2 => Shape::Matrix { cols: 3, rows: 2 },
            Float3x3 => Shape::Matrix { cols: 3, rows: 3 },
            Float3x4 => Shape::Matrix { cols: 3, rows: 4 },
            Float4x2 => Shape::Matrix { cols: 4, rows: 2 },
            Float4x3 => Shape::Matrix { cols: 4, rows: 3 },
            Float4x4 => Shape::Matrix { cols: 4, rows: 4 },
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for ValueType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/types.rs"]
mod tests;
