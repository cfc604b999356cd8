/// Error taxonomy shared by every stage.
pub mod error;
/// Owned XML element tree used by include expansion and assembly.
pub mod xml;
