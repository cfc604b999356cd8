use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::Element;
use crate::schema::states::render_state_def;
use crate::schema::types::ValueType;
use crate::schema::value::{Value, parse_decimal};
use std::borrow::Cow;

/// One resolved render state assignment.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderState {
    /// State name from the render-state table.
    pub name: String,
    /// Slot for per-render-target states.
    pub index: Option<u32>,
    /// Declared type of the state.
    pub value_type: ValueType,
    /// Resolved value.
    pub value: Value,
}

impl RenderState {
    /// Build from a `<state name=".." value=".."/>` element.
    pub fn from_element(el: &Element) -> FxmlResult<Self> {
        let name = el.required_attr("name")?;
        let def = render_state_def(name)?;

        let index = el
            .attr("index")
            .map(|s| {
                parse_decimal(s)
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| {
                        FxmlError::malformed(format!("state '{name}': invalid index '{s}'"))
                    })
            })
            .transpose()?;

        Ok(Self {
            name: def.name.to_string(),
            index,
            value_type: def.value_type,
            value: def.parse(el)?,
        })
    }

    /// Name as stored in KFX: `name[index]` for indexed states.
    pub fn wire_name(&self) -> Cow<'_, str> {
        match self.index {
            Some(i) => Cow::Owned(format!("{}[{i}]", self.name)),
            None => Cow::Borrowed(&self.name),
        }
    }

    /// Split a KFX state name back into name and index.
    pub(crate) fn split_wire_name(wire: &str) -> (String, Option<u32>) {
        if let Some(open) = wire.rfind('[') {
            if let Some(idx) = wire[open + 1..]
                .strip_suffix(']')
                .and_then(|s| s.parse::<u32>().ok())
            {
                return (wire[..open].to_string(), Some(idx));
            }
        }
        (wire.to_string(), None)
    }
}

/// Named, reusable list of render states.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StateBlock {
    /// Block name, matched by `<state_block name=".."/>` references.
    pub name: String,
    /// States in document order.
    pub states: Vec<RenderState>,
}

impl StateBlock {
    /// Build from a `<state_block>` definition.
    pub fn from_element(el: &Element) -> FxmlResult<Self> {
        Ok(Self {
            name: el.required_attr("name")?.to_string(),
            states: el
                .children_named("state")
                .map(RenderState::from_element)
                .collect::<FxmlResult<_>>()?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/state.rs"]
mod tests;
