use crate::compile::CompileOpts;
use crate::foundation::error::{FxmlError, FxmlResult};
use crate::foundation::xml::{Element, Node};
use std::path::{Path, PathBuf};

/// Splice every `<include name="...">` in `root` until none remain.
///
/// Each pass replaces the includes it finds with the element children of the included
/// document's root; nodes brought in by a pass are scanned again on the next one, so nested
/// includes resolve. A target is searched relative to [`CompileOpts::working_dir`], then to the
/// directory of the file holding the `<include>`, then each of [`CompileOpts::include_dirs`].
///
/// Returns the number of includes expanded. An already expanded tree is left untouched.
#[tracing::instrument(skip_all, fields(root = %root.name))]
pub fn expand_includes(root: &mut Element, opts: &CompileOpts) -> FxmlResult<usize> {
    let mut total = 0usize;
    let mut passes = 0usize;
    loop {
        let n = expand_pass(root, opts)?;
        if n == 0 {
            break;
        }
        total += n;
        passes += 1;
    }
    if total > 0 {
        tracing::debug!(total, passes, "includes expanded");
    }
    Ok(total)
}

fn expand_pass(el: &mut Element, opts: &CompileOpts) -> FxmlResult<usize> {
    let mut count = 0;
    let mut i = 0;
    while i < el.children.len() {
        let Node::Element(child) = &mut el.children[i] else {
            i += 1;
            continue;
        };
        if child.name != "include" {
            count += expand_pass(child, opts)?;
            i += 1;
            continue;
        }

        let included = load_include(child, opts)?;
        let spliced: Vec<Node> = included
            .children
            .into_iter()
            .filter(|n| matches!(n, Node::Element(_)))
            .collect();
        let n = spliced.len();
        el.children.splice(i..=i, spliced);
        i += n;
        count += 1;
    }
    Ok(count)
}

fn load_include(inc: &Element, opts: &CompileOpts) -> FxmlResult<Element> {
    let name = inc.required_attr("name")?.replace('\\', "/");
    let origin = inc.origin();
    let searched = candidates(&name, origin.and_then(|o| o.dir()), opts);

    let Some(found) = searched.iter().find(|p| p.is_file()) else {
        return Err(FxmlError::IncludeResolution { name, searched });
    };

    let canonical = std::fs::canonicalize(found).map_err(|e| FxmlError::io(found, e))?;
    if let Some(o) = origin {
        if o.chain_contains(&canonical) {
            return Err(FxmlError::IncludeCycle { path: canonical });
        }
    }

    tracing::debug!(name = %name, path = %found.display(), "include resolved");
    Element::load(found, origin.cloned())
}

fn candidates(name: &str, including_dir: Option<&Path>, opts: &CompileOpts) -> Vec<PathBuf> {
    let rel = Path::new(name);
    if rel.is_absolute() {
        return vec![rel.to_path_buf()];
    }

    let mut out = vec![opts.working_dir.join(rel)];
    if let Some(dir) = including_dir {
        out.push(dir.join(rel));
    }
    out.extend(opts.include_dirs.iter().map(|d| d.join(rel)));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/include.rs"]
mod tests;
