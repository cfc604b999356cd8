//! `fxmlc` compiles FXML effect descriptions into the KFX binary format.
//!
//! An FXML document describes a GPU rendering effect: typed parameters grouped into constant
//! buffers, reusable render-state blocks, raw shader source, and techniques made of passes. The
//! compiler turns that document into a compact, versioned little-endian stream consumed by the
//! runtime renderer.
//!
//! # Pipeline overview
//!
//! 1. **Preprocess**: parse the input and splice every `<include>` until none remain
//! 2. **Assemble**: `Element -> Effect` (parameters, cbuffer groups, shaders, weighted techniques)
//! 3. **Encode**: `Effect -> Vec<u8>` in the KFX format (version 3)
//! 4. **Write**: atomically replace the output file
//!
//! Compilation is single-threaded and holds no process-wide mutable state: every input is
//! compiled against an explicit [`CompileOpts`], so independent compilations can run side by
//! side.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Top-level compile entry points.
pub mod compile;
/// Effect model and its assembly from an include-expanded document.
pub mod effect;
/// KFX binary encoder and decoder.
pub mod kfx;
/// `<include>` expansion.
pub mod preprocess;
/// Fixed type, enum and state tables plus typed value parsing.
pub mod schema;

pub use crate::compile::{
    CompileOpts, compile_file, compile_str, default_output_path, write_kfx_file,
};
pub use crate::effect::model::{CBufferGroup, Effect};
pub use crate::effect::parameter::{Annotation, Parameter};
pub use crate::effect::state::{RenderState, StateBlock};
pub use crate::effect::technique::{Pass, Technique};
pub use crate::foundation::error::{FxmlError, FxmlResult};
pub use crate::foundation::xml::{Element, Node};
pub use crate::kfx::reader::read_effect;
pub use crate::kfx::writer::{KFX_MAGIC, KFX_VERSION, encode_effect};
pub use crate::schema::types::ValueType;
pub use crate::schema::value::{SamplerDesc, ShaderRef, Value};
