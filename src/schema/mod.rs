//! Fixed tables shared by the compiler and the runtime.
//!
//! Type codes and state names are part of the KFX wire format; the tables here are read-only
//! and identical for every compilation.

/// Symbolic value tables for enumerated states.
pub mod enums;
/// Render-state and sampler-field tables.
pub mod states;
/// Value type registry.
pub mod types;
/// Typed value storage and markup parsing.
pub mod value;
