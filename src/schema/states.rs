use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::Element;
use crate::schema::enums::EnumTable;
use crate::schema::types::ValueType;
use crate::schema::value::{
    Value, bad_number, is_true, parse_float, parse_int_bits, parse_shader_ref, required_float,
};
use smallvec::smallvec;

/// How a state's markup value is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateKind {
    /// `value` is `true` (any case) or anything else.
    Bool,
    /// `value` is a float.
    Float,
    /// `value` is a plain integer.
    Int,
    /// `value` is an integer, else a symbol from the table.
    Enum(EnumTable),
    /// `r`, `g`, `b`, `a` float attributes.
    Color,
    /// `value` function name and optional `profile`.
    Shader,
}

/// One entry of a state table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateDef {
    /// Markup name.
    pub name: &'static str,
    /// Declared wire type.
    pub value_type: ValueType,
    /// Markup reading rule.
    pub kind: StateKind,
}

const fn def(name: &'static str, value_type: ValueType, kind: StateKind) -> StateDef {
    StateDef {
        name,
        value_type,
        kind,
    }
}

const fn bool_state(name: &'static str) -> StateDef {
    def(name, ValueType::Bool, StateKind::Bool)
}

const fn int_state(name: &'static str) -> StateDef {
    def(name, ValueType::Int, StateKind::Int)
}

const fn enum_state(name: &'static str, table: EnumTable) -> StateDef {
    def(name, ValueType::Int, StateKind::Enum(table))
}

/// Pipeline state fields settable from a pass or state block.
pub const RENDER_STATES: &[StateDef] = &[
    enum_state("polygon_mode", EnumTable::PolygonMode),
    enum_state("shade_mode", EnumTable::ShadeMode),
    enum_state("cull_mode", EnumTable::CullMode),
    bool_state("front_face_ccw"),
    def("polygon_offset_factor", ValueType::Float, StateKind::Float),
    def("polygon_offset_units", ValueType::Float, StateKind::Float),
    bool_state("scissor_enable"),
    bool_state("multisample_enable"),
    bool_state("alpha_to_coverage_enable"),
    bool_state("independent_blend_enable"),
    bool_state("blend_enable"),
    enum_state("blend_op", EnumTable::BlendOperation),
    enum_state("src_blend", EnumTable::AlphaBlendFactor),
    enum_state("dest_blend", EnumTable::AlphaBlendFactor),
    enum_state("blend_op_alpha", EnumTable::BlendOperation),
    enum_state("src_blend_alpha", EnumTable::AlphaBlendFactor),
    enum_state("dest_blend_alpha", EnumTable::AlphaBlendFactor),
    enum_state("color_write_mask", EnumTable::ColorMask),
    def("blend_factor", ValueType::Float4, StateKind::Color),
    int_state("sample_mask"),
    bool_state("depth_enable"),
    bool_state("depth_write_mask"),
    enum_state("depth_func", EnumTable::CompareFunction),
    bool_state("front_stencil_enable"),
    enum_state("front_stencil_func", EnumTable::CompareFunction),
    int_state("front_stencil_ref"),
    int_state("front_stencil_read_mask"),
    int_state("front_stencil_write_mask"),
    enum_state("front_stencil_fail", EnumTable::StencilOperation),
    enum_state("front_stencil_depth_fail", EnumTable::StencilOperation),
    enum_state("front_stencil_pass", EnumTable::StencilOperation),
    bool_state("back_stencil_enable"),
    enum_state("back_stencil_func", EnumTable::CompareFunction),
    int_state("back_stencil_ref"),
    int_state("back_stencil_read_mask"),
    int_state("back_stencil_write_mask"),
    enum_state("back_stencil_fail", EnumTable::StencilOperation),
    enum_state("back_stencil_depth_fail", EnumTable::StencilOperation),
    enum_state("back_stencil_pass", EnumTable::StencilOperation),
    def("pixel_shader", ValueType::Shader, StateKind::Shader),
    def("vertex_shader", ValueType::Shader, StateKind::Shader),
    def("geometry_shader", ValueType::Shader, StateKind::Shader),
];

/// Fields of a `sampler` parameter.
pub const SAMPLER_STATES: &[StateDef] = &[
    enum_state("filtering", EnumTable::TextureFilter),
    enum_state("address_u", EnumTable::TextureAddressing),
    enum_state("address_v", EnumTable::TextureAddressing),
    enum_state("address_w", EnumTable::TextureAddressing),
    int_state("anisotropy"),
    int_state("max_mip_level"),
    def("mip_map_lod_bias", ValueType::Float, StateKind::Float),
    def("border_clr", ValueType::Float4, StateKind::Color),
];

/// Look up a render state by name.
pub fn render_state_def(name: &str) -> FxmlResult<&'static StateDef> {
    RENDER_STATES
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| FxmlError::UnknownStateName(name.to_string()))
}

/// Look up a sampler field by name.
pub fn sampler_state_def(name: &str) -> Option<&'static StateDef> {
    SAMPLER_STATES.iter().find(|d| d.name == name)
}

impl StateDef {
    /// Read this state's value from a `<state>` element.
    pub fn parse(&self, el: &Element) -> FxmlResult<Value> {
        Ok(match self.kind {
            StateKind::Bool => Value::Bool(el.attr("value").is_some_and(is_true)),
            StateKind::Float => {
                let s = el.required_attr("value")?;
                let v = parse_float(s).ok_or_else(|| bad_number(el, "value", s, "float"))?;
                Value::Float(smallvec![v])
            }
            StateKind::Int => {
                let s = el.required_attr("value")?;
                let v = parse_int_bits(s).ok_or_else(|| bad_number(el, "value", s, "integer"))?;
                Value::Int(smallvec![v])
            }
            StateKind::Enum(table) => {
                let s = el.required_attr("value")?;
                Value::Int(smallvec![table.resolve(self.name, s)?])
            }
            StateKind::Color => Value::Float(smallvec![
                required_float(el, "r")?,
                required_float(el, "g")?,
                required_float(el, "b")?,
                required_float(el, "a")?,
            ]),
            StateKind::Shader => Value::Shader(parse_shader_ref(el)),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/states.rs"]
mod tests;
