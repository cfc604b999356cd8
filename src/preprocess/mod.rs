//! Source preprocessing run once before effect assembly.

/// Recursive `<include>` splicing.
pub mod include;

pub use include::expand_includes;
