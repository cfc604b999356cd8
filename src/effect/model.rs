use crate::compile::CompileOpts;
use crate::effect::context::BuildCtx;
use crate::effect::parameter::Parameter;
use crate::effect::state::StateBlock;
use crate::effect::technique::Technique;
use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::Element;

/// Named constant buffer and the parameters bound into it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CBufferGroup {
    /// Buffer name.
    pub name: String,
    /// Indices into [`Effect::parameters`], in declaration order.
    pub members: Vec<u32>,
}

/// A fully assembled effect, ready for encoding.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Effect {
    /// Parameters in document order.
    pub parameters: Vec<Parameter>,
    /// Groups in order of first appearance.
    pub cbuffers: Vec<CBufferGroup>,
    /// Raw shader text blobs, verbatim.
    pub shaders: Vec<String>,
    /// Techniques in document order.
    pub techniques: Vec<Technique>,
}

impl Effect {
    /// Assemble an effect from an include-expanded document root.
    ///
    /// State blocks are registered before any pass is built; a pass only sees blocks through
    /// that registry.
    #[tracing::instrument(skip_all, fields(root = %root.name))]
    pub fn from_element(root: &Element, opts: &CompileOpts) -> FxmlResult<Self> {
        let mut ctx = BuildCtx::new(opts.strict);

        let mut parameters = Vec::new();
        let mut cbuffers: Vec<CBufferGroup> = Vec::new();
        for (parent, el) in collect(root, |_, e| e.name == "parameter") {
            let p = Parameter::from_element(el, parent, &ctx)?;
            if let Some(cb) = &p.cbuffer {
                let idx = u32::try_from(parameters.len())
                    .map_err(|_| FxmlError::malformed("too many parameters"))?;
                match cbuffers.iter_mut().find(|g| &g.name == cb) {
                    Some(g) => g.members.push(idx),
                    None => cbuffers.push(CBufferGroup {
                        name: cb.clone(),
                        members: vec![idx],
                    }),
                }
            }
            parameters.push(p);
        }

        // References inside a pass share the tag name; only definitions are registered.
        for (_, el) in collect(root, |parent, e| {
            e.name == "state_block" && parent.name != "pass"
        }) {
            ctx.register_block(StateBlock::from_element(el)?);
        }

        let shaders: Vec<String> = root
            .descendants_named("shader")
            .into_iter()
            .map(Element::text)
            .collect();

        let techniques = root
            .descendants_named("technique")
            .into_iter()
            .map(|t| Technique::from_element(t, &ctx))
            .collect::<FxmlResult<Vec<_>>>()?;

        tracing::debug!(
            parameters = parameters.len(),
            cbuffers = cbuffers.len(),
            state_blocks = ctx.block_count(),
            shaders = shaders.len(),
            techniques = techniques.len(),
            "effect assembled"
        );

        Ok(Self {
            parameters,
            cbuffers,
            shaders,
            techniques,
        })
    }

    /// Look up a technique by name.
    pub fn technique(&self, name: &str) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.name == name)
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

fn collect<'a>(
    root: &'a Element,
    pred: impl Fn(&Element, &Element) -> bool,
) -> Vec<(&'a Element, &'a Element)> {
    let mut out = Vec::new();
    root.walk(&mut |parent, e| {
        if pred(parent, e) {
            out.push((parent, e));
        }
    });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effect/model.rs"]
mod tests;
