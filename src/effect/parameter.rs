use crate::effect::context::BuildCtx;
use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::Element;
use crate::schema::types::ValueType;
use crate::schema::value::{Value, parse_decimal, parse_value_with};

/// Constant buffer used by parameters declared outside any `<cbuffer>`.
pub const GLOBAL_CBUFFER: &str = "global_cb";

/// Named, typed metadata attached to a parameter, technique or pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Annotation {
    /// Declared type.
    pub value_type: ValueType,
    /// Annotation name.
    pub name: String,
    /// Parsed payload, zero-filled where the markup omits components.
    pub value: Value,
}

impl Annotation {
    pub(crate) fn from_element(el: &Element, ctx: &BuildCtx) -> FxmlResult<Self> {
        let value_type = ValueType::from_name(el.required_attr("type")?)?;
        Ok(Self {
            value_type,
            name: el.required_attr("name")?.to_string(),
            value: parse_value_with(value_type, el, ctx.strict)?,
        })
    }
}

/// Annotations declared as direct `<annotation>` children of `el`.
pub(crate) fn collect_annotations(el: &Element, ctx: &BuildCtx) -> FxmlResult<Vec<Annotation>> {
    el.children_named("annotation")
        .map(|a| Annotation::from_element(a, ctx))
        .collect()
}

/// Every `<annotation>` under `el` at any depth, in document order.
pub(crate) fn collect_nested_annotations(
    el: &Element,
    ctx: &BuildCtx,
) -> FxmlResult<Vec<Annotation>> {
    el.descendants_named("annotation")
        .into_iter()
        .map(|a| Annotation::from_element(a, ctx))
        .collect()
}

/// Effect parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Parameter {
    /// Binding semantic, empty when not given.
    pub semantic: String,
    /// Declared type.
    pub value_type: ValueType,
    /// Parameter name.
    pub name: String,
    /// Element count for arrays, `0` for single values.
    pub array_size: u32,
    /// Initial value; `None` exactly when `array_size != 0`.
    pub value: Option<Value>,
    /// Owning constant buffer; `None` for samplers, which never join a group.
    pub cbuffer: Option<String>,
    /// Annotations in document order.
    pub annotations: Vec<Annotation>,
}

impl Parameter {
    /// Build from a `<parameter>` element whose parent is `parent`.
    pub(crate) fn from_element(el: &Element, parent: &Element, ctx: &BuildCtx) -> FxmlResult<Self> {
        let value_type = ValueType::from_name(el.required_attr("type")?)?;
        let name = el.required_attr("name")?.to_string();

        let array_size = match el.attr("array_size").map(str::trim) {
            None | Some("") => 0,
            Some(s) => parse_decimal(s)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    FxmlError::malformed(format!(
                        "parameter '{name}': array_size '{s}' is not a valid count"
                    ))
                })?,
        };
        let value = if array_size == 0 {
            Some(parse_value_with(value_type, el, ctx.strict)?)
        } else {
            None
        };

        let cbuffer = if value_type == ValueType::Sampler {
            None
        } else if parent.name == "cbuffer" {
            Some(parent.required_attr("name")?.to_string())
        } else {
            Some(GLOBAL_CBUFFER.to_string())
        };

        Ok(Self {
            semantic: el.attr("semantic").unwrap_or_default().to_string(),
            value_type,
            name,
            array_size,
            value,
            cbuffer,
            annotations: collect_annotations(el, ctx)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/parameter.rs"]
mod tests;
