//! document::parse
//!
//! Build a [`Document`] from XML text using `quick-xml`'s event reader.
//!
//! Whitespace between elements is kept as text nodes inside the root so the
//! document can be written back without reformatting. Whitespace outside
//! the root is dropped; the writer emits its own line breaks there.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{is_blank, Document, DocumentError, Element, Node};

/// Parse XML text into a [`Document`].
///
/// A leading byte-order mark is ignored. The XML declaration is not kept;
/// [`super::write::render`] always emits a UTF-8 declaration.
///
/// # Errors
///
/// Returns [`DocumentError`] if the input is not well-formed, has no root
/// element, has more than one root element, or has character data outside
/// the root.
pub fn parse(input: &str) -> Result<Document, DocumentError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut builder = TreeBuilder::default();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| malformed(position, e))?;

        match event {
            Event::Start(start) => {
                let element = element_from_start(&start, position)?;
                builder.open.push(element);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start, position)?;
                builder.push(Node::Element(element))?;
            }
            Event::End(_) => {
                // quick-xml has already checked that the end tag matches.
                let element = builder.open.pop().ok_or_else(|| DocumentError::Malformed {
                    position,
                    message: "unexpected closing tag".to_string(),
                })?;
                builder.push(Node::Element(element))?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| malformed(position, e))?;
                builder.push(Node::Text(text.into_owned()))?;
            }
            Event::CData(data) => {
                let data = std::str::from_utf8(&data)?;
                builder.push(Node::CData(data.to_string()))?;
            }
            Event::Comment(comment) => {
                let comment = std::str::from_utf8(&comment)?;
                builder.push(Node::Comment(comment.to_string()))?;
            }
            Event::PI(instruction) => {
                let instruction = std::str::from_utf8(&instruction)?;
                builder.push(Node::ProcessingInstruction(instruction.to_string()))?;
            }
            Event::DocType(doctype) => {
                let doctype = std::str::from_utf8(&doctype)?;
                builder.push(Node::DocType(doctype.trim().to_string()))?;
            }
            Event::Decl(_) => {}
            Event::Eof => break,
        }
    }

    builder.finish()
}

/// Accumulates nodes while the reader walks the input.
#[derive(Default)]
struct TreeBuilder {
    /// Elements whose end tag has not been seen yet, outermost first.
    open: Vec<Element>,
    root: Option<Element>,
    prolog: Vec<Node>,
    epilog: Vec<Node>,
}

impl TreeBuilder {
    /// Attach a completed node to the innermost open element, or to the
    /// document level if nothing is open.
    fn push(&mut self, node: Node) -> Result<(), DocumentError> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
            return Ok(());
        }

        match node {
            Node::Element(element) => {
                if self.root.is_some() {
                    return Err(DocumentError::MultipleRoots(element.name));
                }
                self.root = Some(element);
            }
            Node::Text(text) if is_blank(&text) => {}
            Node::Text(_) | Node::CData(_) => return Err(DocumentError::TextOutsideRoot),
            other => {
                if self.root.is_none() {
                    self.prolog.push(other);
                } else {
                    self.epilog.push(other);
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Document, DocumentError> {
        if let Some(unclosed) = self.open.first() {
            return Err(DocumentError::Unclosed(unclosed.name.clone()));
        }
        let root = self.root.ok_or(DocumentError::NoRoot)?;
        Ok(Document {
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<Element, DocumentError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed(position, e))?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| malformed(position, e))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn malformed(position: u64, error: impl std::fmt::Display) -> DocumentError {
    DocumentError::Malformed {
        position,
        message: error.to_string(),
    }
}
