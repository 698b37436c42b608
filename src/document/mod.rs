//! document
//!
//! Minimal mutable XML tree for the Qalculate units file.
//!
//! # Design
//!
//! The units file is edited in place, so the tree keeps everything a reader
//! would notice in a diff: attribute order, comments, processing
//! instructions, CDATA sections and the whitespace between elements.
//! Only nodes the caller touches change on the way back out.
//!
//! Selection is done with explicit tree walks over [`Element`] children;
//! there is no query language.
//!
//! # Modules
//!
//! - [`parse`] - Build a [`Document`] from XML text
//! - [`write`] - Render a [`Document`] back to XML text
//!
//! # Example
//!
//! ```
//! use qalc_btc::document::{parse, write, Element};
//!
//! let mut doc = parse::parse("<QALCULATE><category/></QALCULATE>").unwrap();
//! doc.root.append_indented(Element::new("category"), 0);
//!
//! let xml = write::render(&doc);
//! assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
//! assert_eq!(doc.root.elements_named("category").count(), 2);
//! ```

pub mod parse;
pub mod write;

pub use parse::parse;
pub use write::render;

use thiserror::Error;

/// Errors from reading XML text into a [`Document`].
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The XML tokenizer rejected the input.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// The input contains no element at all.
    #[error("document has no root element")]
    NoRoot,

    /// A second top-level element was found.
    #[error("document has more than one root element (second is '{0}')")]
    MultipleRoots(String),

    /// Character data appeared outside the root element.
    #[error("unexpected text outside the root element")]
    TextOutsideRoot,

    /// The input ended before an element was closed.
    #[error("element '{0}' is never closed")]
    Unclosed(String),

    /// Names, text or markup were not valid UTF-8.
    #[error("document is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments, processing instructions and doctype before the root.
    pub prolog: Vec<Node>,
    /// The root element.
    pub root: Element,
    /// Comments and processing instructions after the root.
    pub epilog: Vec<Node>,
}

impl Document {
    /// Create a document holding only an empty root element.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            prolog: Vec::new(),
            root: Element::new(root_name),
            epilog: Vec::new(),
        }
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    /// Raw contents of a `<![CDATA[...]]>` section.
    CData(String),
    /// Raw contents of a `<!--...-->` comment.
    Comment(String),
    /// Raw contents of a `<?...?>` processing instruction.
    ProcessingInstruction(String),
    /// Raw contents of a `<!DOCTYPE ...>` declaration.
    DocType(String),
}

impl Node {
    /// Borrow the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutably borrow the element, if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if is_blank(text))
    }
}

/// An XML element.
///
/// Attributes keep their source order. Children are addressed by their
/// position in [`Element::children`], which counts every node (text and
/// comments included), not only elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder: add a text child.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Builder: add an element child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over element children in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterate over element children with the given tag name.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name == name)
    }

    /// Positions in [`Element::children`] of element children matching `predicate`.
    pub fn positions<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(&Element) -> bool,
    {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                node.as_element()
                    .filter(|element| predicate(element))
                    .map(|_| index)
            })
            .collect()
    }

    /// The element child at `index` in [`Element::children`].
    pub fn element_at(&self, index: usize) -> Option<&Element> {
        self.children.get(index).and_then(Node::as_element)
    }

    /// Mutable access to the element child at `index`.
    pub fn element_at_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index).and_then(Node::as_element_mut)
    }

    /// Direct character data of this element (text and CDATA, concatenated).
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace the direct character data of this element with `text`.
    ///
    /// Element, comment and processing-instruction children are untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children
            .retain(|node| !matches!(node, Node::Text(_) | Node::CData(_)));
        self.children.insert(0, Node::Text(text.into()));
    }

    /// True if some child element named `name` has text equal to `expected`.
    pub fn has_child_text(&self, name: &str, expected: &str) -> bool {
        self.elements_named(name)
            .any(|child| child.text() == expected)
    }

    /// Append `child` as the last element, matching the file's indentation.
    ///
    /// `depth` is the nesting depth of `self` (the root is 0). The child
    /// subtree is pretty-printed one level deeper, using the indent unit
    /// already used by `self`'s children (a tab if there is none to copy).
    /// Returns the position of the new child in [`Element::children`].
    pub fn append_indented(&mut self, mut child: Element, depth: usize) -> usize {
        let unit = self.indent_unit(depth + 1).unwrap_or_else(|| "\t".to_string());
        child.indent(depth + 1, &unit);
        let inner = Node::Text(indentation(depth + 1, &unit));

        match self.children.last() {
            Some(last) if last.is_blank_text() => {
                let at = self.children.len() - 1;
                self.children.insert(at, inner);
                self.children.insert(at + 1, Node::Element(child));
                at + 1
            }
            None => {
                self.children.push(inner);
                self.children.push(Node::Element(child));
                self.children.push(Node::Text(indentation(depth, &unit)));
                1
            }
            Some(_) => {
                self.children.push(Node::Element(child));
                self.children.len() - 1
            }
        }
    }

    /// The indent unit used by this element's children, if it can be read
    /// off the whitespace before its last element child.
    ///
    /// `child_depth` is the depth of the children; their line prefix must
    /// be that many copies of one unit.
    fn indent_unit(&self, child_depth: usize) -> Option<String> {
        let last = self
            .children
            .iter()
            .rposition(|node| matches!(node, Node::Element(_)))?;
        let Node::Text(before) = self.children.get(last.checked_sub(1)?)? else {
            return None;
        };
        if !is_blank(before) {
            return None;
        }

        let (_, prefix) = before.rsplit_once('\n')?;
        let ascii_indent = prefix.bytes().all(|b| b == b' ' || b == b'\t');
        if !ascii_indent || prefix.is_empty() || prefix.len() % child_depth != 0 {
            return None;
        }
        let unit = &prefix[..prefix.len() / child_depth];
        (unit.repeat(child_depth) == prefix).then(|| unit.to_string())
    }

    /// Pretty-print a freshly built subtree.
    ///
    /// Elements holding character data are left alone.
    fn indent(&mut self, depth: usize, unit: &str) {
        let has_elements = self.elements().next().is_some();
        let has_text = self
            .children
            .iter()
            .any(|node| matches!(node, Node::Text(_) | Node::CData(_)));
        if !has_elements || has_text {
            return;
        }

        let children = std::mem::take(&mut self.children);
        for mut node in children {
            if let Node::Element(element) = &mut node {
                element.indent(depth + 1, unit);
            }
            self.children.push(Node::Text(indentation(depth + 1, unit)));
            self.children.push(node);
        }
        self.children.push(Node::Text(indentation(depth, unit)));
    }
}

fn indentation(depth: usize, unit: &str) -> String {
    let mut out = String::with_capacity(1 + depth * unit.len());
    out.push('\n');
    for _ in 0..depth {
        out.push_str(unit);
    }
    out
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
