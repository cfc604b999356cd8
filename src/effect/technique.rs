use crate::effect::context::BuildCtx;
use crate::effect::parameter::{Annotation, collect_annotations, collect_nested_annotations};
use crate::effect::state::RenderState;
use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::Element;

/// Weight added to any technique that enables blending in one of its passes.
pub const BLEND_WEIGHT: f32 = 10000.0;

/// One pipeline configuration: an ordered render-state list.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Pass {
    /// Pass name.
    pub name: String,
    /// Annotations in document order.
    pub annotations: Vec<Annotation>,
    /// Block-sourced states in reference order, then inline states. Duplicates are kept.
    pub states: Vec<RenderState>,
}

impl Pass {
    pub(crate) fn from_element(el: &Element, ctx: &BuildCtx) -> FxmlResult<Self> {
        let name = el.required_attr("name")?.to_string();

        let mut states = Vec::new();
        for r in el.children_named("state_block") {
            let block_name = r.required_attr("name")?;
            match ctx.block(block_name) {
                Some(block) => states.extend(block.states.iter().cloned()),
                None if ctx.strict => {
                    return Err(FxmlError::UnresolvedStateBlock {
                        pass: name,
                        block: block_name.to_string(),
                    });
                }
                None => {
                    tracing::warn!(
                        pass = %name,
                        block = block_name,
                        "unresolved state_block reference skipped"
                    );
                }
            }
        }
        for s in el.children_named("state") {
            states.push(RenderState::from_element(s)?);
        }

        Ok(Self {
            annotations: collect_annotations(el, ctx)?,
            name,
            states,
        })
    }
}

/// Named, weighted alternative implementation of an effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Technique {
    /// Technique name.
    pub name: String,
    /// Own annotations plus those of its passes, in document order.
    pub annotations: Vec<Annotation>,
    /// Passes in document order.
    pub passes: Vec<Pass>,
    /// Selection weight, see [`technique_weight`].
    pub weight: f32,
}

impl Technique {
    pub(crate) fn from_element(el: &Element, ctx: &BuildCtx) -> FxmlResult<Self> {
        let passes = el
            .children_named("pass")
            .map(|p| Pass::from_element(p, ctx))
            .collect::<FxmlResult<Vec<_>>>()?;
        Ok(Self {
            name: el.required_attr("name")?.to_string(),
            annotations: collect_nested_annotations(el, ctx)?,
            weight: technique_weight(&passes),
            passes,
        })
    }
}

/// `1 + total state count`, plus [`BLEND_WEIGHT`] when any pass sets `blend_enable`.
pub fn technique_weight(passes: &[Pass]) -> f32 {
    let state_count: usize = passes.iter().map(|p| p.states.len()).sum();
    let blends = passes
        .iter()
        .flat_map(|p| &p.states)
        .any(|s| s.name == "blend_enable" && s.value.is_truthy());

    let mut weight = 1.0 + state_count as f32;
    if blends {
        weight += BLEND_WEIGHT;
    }
    weight
}

#[cfg(test)]
#[path = "../../tests/unit/effect/technique.rs"]
mod tests;
