use std::path::PathBuf;

/// Convenience result type used across the compiler.
pub type FxmlResult<T> = Result<T, FxmlError>;

/// Error taxonomy for FXML compilation and KFX decoding.
///
/// Every variant aborts the current compilation; nothing here is recoverable mid-build.
#[derive(thiserror::Error, Debug)]
pub enum FxmlError {
    /// An `<include>` target was found under none of the search roots.
    #[error("include error: cannot resolve '{name}' (searched {})", display_paths(.searched))]
    IncludeResolution {
        /// The `name` attribute as written.
        name: String,
        /// Candidate paths that were tried, in order.
        searched: Vec<PathBuf>,
    },

    /// An include chain refers back to a file that is already being expanded.
    #[error("include error: cycle through '{}'", .path.display())]
    IncludeCycle {
        /// Canonical path of the file that closes the cycle.
        path: PathBuf,
    },

    /// A type name outside the fixed type table.
    #[error("unknown type: '{0}'")]
    UnknownType(String),

    /// A render or sampler state name outside the fixed state tables.
    #[error("unknown state name: '{0}'")]
    UnknownStateName(String),

    /// A symbolic state value that is neither an integer nor in the field's enum table.
    #[error("unknown enum value: '{value}' for '{field}'")]
    UnknownEnumValue {
        /// State or sampler field name.
        field: String,
        /// Offending value text.
        value: String,
    },

    /// A pass references a state block that was never defined (strict mode only).
    #[error("unresolved state block: '{block}' referenced by pass '{pass}'")]
    UnresolvedStateBlock {
        /// Referencing pass name.
        pass: String,
        /// Missing block name.
        block: String,
    },

    /// A structurally required element or attribute is absent or unparsable.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The XML text itself could not be parsed.
    #[error("xml error in {origin}: {source}")]
    Xml {
        /// File path or `<memory>`.
        origin: String,
        /// Underlying parser error.
        #[source]
        source: roxmltree::Error,
    },

    /// A value does not fit the KFX wire format.
    #[error("encode error: {0}")]
    Encode(String),

    /// A KFX stream could not be decoded.
    #[error("kfx format error: {0}")]
    Kfx(String),

    /// File system failure with the path involved.
    #[error("io error on '{}': {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxmlError {
    /// Build a [`FxmlError::Malformed`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Build a [`FxmlError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FxmlError::Kfx`] value.
    pub fn kfx(msg: impl Into<String>) -> Self {
        Self::Kfx(msg.into())
    }

    /// Build a [`FxmlError::UnknownEnumValue`] value.
    pub fn unknown_enum(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownEnumValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Build a [`FxmlError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
