use crate::effect::state::StateBlock;

/// Per-compilation assembly state.
///
/// Holds the state-block registry collected before any pass is built, plus the validation
/// mode. One context lives for exactly one [`crate::Effect`] build.
#[derive(Debug, Default)]
pub(crate) struct BuildCtx {
    pub(crate) strict: bool,
    blocks: Vec<StateBlock>,
}

impl BuildCtx {
    pub(crate) fn new(strict: bool) -> Self {
        Self {
            strict,
            blocks: Vec::new(),
        }
    }

    pub(crate) fn register_block(&mut self, block: StateBlock) {
        self.blocks.push(block);
    }

    /// First registered block named `name`.
    pub(crate) fn block(&self, name: &str) -> Option<&StateBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
