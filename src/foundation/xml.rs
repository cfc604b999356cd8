use crate::foundation::error::{FxmlError, FxmlResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A node of the owned document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text or CDATA content, verbatim.
    Text(String),
}

/// Owned, mutable XML element.
///
/// `roxmltree` trees are read-only, while include expansion needs to splice nodes across
/// documents, so every parsed file is converted once into this representation. Each element
/// remembers which file it came from (and through which include chain), which drives include
/// search paths and cycle detection.
#[derive(Debug, Clone)]
pub struct Element {
    /// Local tag name.
    pub name: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
    origin: Option<Arc<Origin>>,
}

/// Source file of an element plus the file that included it.
#[derive(Debug)]
pub(crate) struct Origin {
    pub(crate) path: PathBuf,
    pub(crate) parent: Option<Arc<Origin>>,
}

impl Origin {
    pub(crate) fn new(path: PathBuf, parent: Option<Arc<Origin>>) -> Arc<Self> {
        Arc::new(Self { path, parent })
    }

    pub(crate) fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Return `true` when `path` is this file or any file up the include chain.
    pub(crate) fn chain_contains(&self, path: &Path) -> bool {
        let mut cur = Some(self);
        while let Some(o) = cur {
            if o.path == path {
                return true;
            }
            cur = o.parent.as_deref();
        }
        false
    }
}

// Origins are bookkeeping, two trees with the same content compare equal.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.attrs == other.attrs && self.children == other.children
    }
}

impl Element {
    /// Parse an in-memory document and return its root element.
    pub fn parse(text: &str) -> FxmlResult<Self> {
        parse_document(text, None, "<memory>")
    }

    /// Read and parse `path`, recording `parent` as the including file.
    pub(crate) fn load(path: &Path, parent: Option<Arc<Origin>>) -> FxmlResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FxmlError::io(path, e))?;
        let canonical = std::fs::canonicalize(path).map_err(|e| FxmlError::io(path, e))?;
        let label = path.display().to_string();
        parse_document(&text, Some(Origin::new(canonical, parent)), &label)
    }

    pub(crate) fn origin(&self) -> Option<&Arc<Origin>> {
        self.origin.as_ref()
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value by name, failing with a malformed-document error when absent.
    pub fn required_attr(&self, name: &str) -> FxmlResult<&str> {
        self.attr(name).ok_or_else(|| {
            FxmlError::malformed(format!("<{}> is missing attribute '{name}'", self.name))
        })
    }

    /// Direct child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements with tag `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |e| e.name == name)
    }

    /// Visit every descendant in document order as `(parent, element)` pairs.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Element, &'a Element)) {
        for child in self.child_elements() {
            f(self, child);
            child.walk(f);
        }
    }

    /// All descendants named `name`, in document order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.walk(&mut |_, e| {
            if e.name == name {
                out.push(e);
            }
        });
        out
    }

    /// Concatenated direct text/CDATA content.
    pub fn text(&self) -> String {
        let mut s = String::new();
        for c in &self.children {
            if let Node::Text(t) = c {
                s.push_str(t);
            }
        }
        s
    }
}

fn parse_document(text: &str, origin: Option<Arc<Origin>>, label: &str) -> FxmlResult<Element> {
    let doc = roxmltree::Document::parse(text).map_err(|source| FxmlError::Xml {
        origin: label.to_string(),
        source,
    })?;
    Ok(convert(doc.root_element(), &origin))
}

fn convert(node: roxmltree::Node<'_, '_>, origin: &Option<Arc<Origin>>) -> Element {
    let mut children = Vec::new();
    for c in node.children() {
        if c.is_element() {
            children.push(Node::Element(convert(c, origin)));
        } else if c.is_text() {
            if let Some(t) = c.text() {
                children.push(Node::Text(t.to_string()));
            }
        }
    }

    Element {
        name: node.tag_name().name().to_string(),
        attrs: node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect(),
        children,
        origin: origin.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/xml.rs"]
mod tests;
