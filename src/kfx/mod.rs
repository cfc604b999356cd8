//! KFX binary format (version 3).
//!
//! Little-endian throughout. Strings are "short strings": one length byte followed by raw
//! bytes, so names, semantics, profiles and string values are limited to 255 bytes. Shader
//! text uses a `u32` byte length instead.

/// Decoder.
pub mod reader;
/// Encoder.
pub mod writer;
