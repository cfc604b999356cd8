use crate::effect::model::Effect;
use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::Element;
use crate::kfx::writer::encode_effect;
use crate::preprocess::expand_includes;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Options for one compilation.
#[derive(Clone, Debug)]
pub struct CompileOpts {
    /// First root searched for `<include>` targets.
    pub working_dir: PathBuf,
    /// Extra include roots, tried after the including file's directory.
    pub include_dirs: Vec<PathBuf>,
    /// Reject unresolved state-block references and unknown sampler fields instead of
    /// logging and skipping them.
    pub strict: bool,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            include_dirs: Vec::new(),
            strict: false,
        }
    }
}

/// Parse, preprocess and assemble the effect in `path`.
#[tracing::instrument(skip(opts), fields(path = %path.display()))]
pub fn compile_file(path: &Path, opts: &CompileOpts) -> FxmlResult<Effect> {
    let mut root = Element::load(path, None)?;
    expand_includes(&mut root, opts)?;
    Effect::from_element(&root, opts)
}

/// Compile an in-memory document.
///
/// Includes resolve against [`CompileOpts::working_dir`] and [`CompileOpts::include_dirs`]
/// only, since the document has no directory of its own.
pub fn compile_str(text: &str, opts: &CompileOpts) -> FxmlResult<Effect> {
    let mut root = Element::parse(text)?;
    expand_includes(&mut root, opts)?;
    Effect::from_element(&root, opts)
}

/// `input` with its extension replaced by `kfx`, or `.kfx` appended when it has none.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("kfx")
}

/// Encode `effect` and atomically replace `path` with the result.
///
/// The stream is fully encoded before anything touches the file system, then written to a
/// temporary file beside `path` and renamed over it, so a failed compile never leaves a
/// truncated artifact behind. Returns the number of bytes written.
#[tracing::instrument(skip(effect), fields(path = %path.display()))]
pub fn write_kfx_file(path: &Path, effect: &Effect) -> FxmlResult<usize> {
    let bytes = encode_effect(effect)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| FxmlError::io(dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| FxmlError::io(dir, e))?;
    tmp.write_all(&bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| FxmlError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| FxmlError::io(path, e.error))?;

    tracing::info!(bytes = bytes.len(), "kfx written");
    Ok(bytes.len())
}

#[cfg(test)]
#[path = "../tests/unit/compile.rs"]
mod tests;
