//! Effect model and its assembly.
//!
//! Assembly runs on a tree whose includes are already expanded. Parameters, state blocks,
//! shaders and techniques are collected in document order; every entity is immutable once
//! built.

pub(crate) mod context;
mod display;
/// Effect root and constant-buffer grouping.
pub mod model;
/// Parameters and annotations.
pub mod parameter;
/// Render states and state blocks.
pub mod state;
/// Passes, techniques and technique weighting.
pub mod technique;
