use crate::foundation::error::{FxmlError, FxmlResult};
use crate::schema::value::parse_int_bits;

/// Symbolic value tables, one per enumerated state category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumTable {
    /// `flat`, `gouraud`.
    ShadeMode,
    /// Depth/stencil comparison functions.
    CompareFunction,
    /// `none`, `front`, `back`.
    CullMode,
    /// `point`, `line`, `fill`.
    PolygonMode,
    /// Blend factors.
    AlphaBlendFactor,
    /// Blend operations.
    BlendOperation,
    /// Stencil operations.
    StencilOperation,
    /// Render-target write mask bits.
    ColorMask,
    /// Sampler filtering modes.
    TextureFilter,
    /// Sampler addressing modes.
    TextureAddressing,
}

const SHADE_MODE: &[(&str, i32)] = &[("flat", 0), ("gouraud", 1)];

const COMPARE_FUNCTION: &[(&str, i32)] = &[
    ("always_fail", 0),
    ("always_pass", 1),
    ("less", 2),
    ("less_equal", 3),
    ("equal", 4),
    ("not_equal", 5),
    ("greater_equal", 6),
    ("greater", 7),
];

const CULL_MODE: &[(&str, i32)] = &[("none", 0), ("front", 1), ("back", 2)];

const POLYGON_MODE: &[(&str, i32)] = &[("point", 0), ("line", 1), ("fill", 2)];

const ALPHA_BLEND_FACTOR: &[(&str, i32)] = &[
    ("zero", 0),
    ("one", 1),
    ("src_alpha", 2),
    ("dst_alpha", 3),
    ("inv_src_alpha", 4),
    ("inv_dst_alpha", 5),
    ("src_color", 6),
    ("dst_color", 7),
    ("inv_src_color", 8),
    ("inv_dst_color", 9),
    ("src_alpha_sat", 10),
];

// Numbering starts at 1.
const BLEND_OPERATION: &[(&str, i32)] = &[
    ("add", 1),
    ("sub", 2),
    ("rev_sub", 3),
    ("min", 4),
    ("max", 5),
];

const STENCIL_OPERATION: &[(&str, i32)] = &[
    ("keep", 0),
    ("zero", 1),
    ("replace", 2),
    ("increment", 3),
    ("decrement", 4),
    ("invert", 5),
];

const COLOR_MASK: &[(&str, i32)] = &[
    ("red", 0x08),
    ("green", 0x04),
    ("blue", 0x02),
    ("alpha", 0x01),
    ("all", 0x0F),
];

const TEXTURE_FILTER: &[(&str, i32)] = &[
    ("min_mag_mip_point", 0x00),
    ("min_mag_point_mip_linear", 0x01),
    ("min_point_mag_linear_mip_point", 0x02),
    ("min_point_mag_mip_linear", 0x03),
    ("min_linear_mag_mip_point", 0x04),
    ("min_linear_mag_point_mip_linear", 0x05),
    ("min_mag_linear_mip_point", 0x06),
    ("min_mag_mip_linear", 0x07),
    ("anisotropic", 0x0F),
    ("cmp_min_mag_mip_point", 0x10),
    ("cmp_min_mag_point_mip_linear", 0x11),
    ("cmp_min_point_mag_linear_mip_point", 0x12),
    ("cmp_min_point_mag_mip_linear", 0x13),
    ("cmp_min_linear_mag_mip_point", 0x14),
    ("cmp_min_linear_mag_point_mip_linear", 0x15),
    ("cmp_min_mag_linear_mip_point", 0x16),
    ("cmp_min_mag_mip_linear", 0x17),
    ("cmp_anisotropic", 0x1F),
];

const TEXTURE_ADDRESSING: &[(&str, i32)] =
    &[("wrap", 0), ("mirror", 1), ("clamp", 2), ("border", 3)];

impl EnumTable {
    fn entries(self) -> &'static [(&'static str, i32)] {
        match self {
            Self::ShadeMode => SHADE_MODE,
            Self::CompareFunction => COMPARE_FUNCTION,
            Self::CullMode => CULL_MODE,
            Self::PolygonMode => POLYGON_MODE,
            Self::AlphaBlendFactor => ALPHA_BLEND_FACTOR,
            Self::BlendOperation => BLEND_OPERATION,
            Self::StencilOperation => STENCIL_OPERATION,
            Self::ColorMask => COLOR_MASK,
            Self::TextureFilter => TEXTURE_FILTER,
            Self::TextureAddressing => TEXTURE_ADDRESSING,
        }
    }

    /// Look up a symbolic name.
    pub fn lookup(self, symbol: &str) -> Option<i32> {
        self.entries()
            .iter()
            .find(|(name, _)| *name == symbol)
            .map(|(_, v)| *v)
    }

    /// Resolve `text` for `field`: integer literal first, then symbolic name.
    pub fn resolve(self, field: &str, text: &str) -> FxmlResult<i32> {
        if let Some(v) = parse_int_bits(text) {
            return Ok(v);
        }
        self.lookup(text.trim())
            .ok_or_else(|| FxmlError::unknown_enum(field, text))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/enums.rs"]
mod tests;
