//! document::write
//!
//! Render a [`Document`] back to XML text.
//!
//! Text nodes are written exactly as held in the tree (escaped), so
//! whitespace that came in through [`super::parse`] goes back out
//! unchanged. Elements without children are written in empty-tag form.

use quick_xml::escape::{escape, partial_escape};

use super::{Document, Element, Node};

/// The declaration written at the top of every rendered document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render the whole document, including the XML declaration.
pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');

    for node in &doc.prolog {
        write_node(&mut out, node);
        out.push('\n');
    }

    write_element(&mut out, &doc.root);
    out.push('\n');

    for node in &doc.epilog {
        write_node(&mut out, node);
        out.push('\n');
    }

    out
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        write_attribute_value(out, value);
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

/// Escape an attribute value. Newlines, carriage returns and tabs are
/// written as character references so they survive attribute-value
/// normalization.
fn write_attribute_value(out: &mut String, value: &str) {
    let mut rest = value;
    while let Some(at) = rest.find(|c: char| matches!(c, '\n' | '\r' | '\t')) {
        out.push_str(&escape(&rest[..at]));
        out.push_str(match rest.as_bytes()[at] {
            b'\n' => "&#10;",
            b'\r' => "&#13;",
            _ => "&#9;",
        });
        rest = &rest[at + 1..];
    }
    out.push_str(&escape(rest));
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(element) => write_element(out, element),
        Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
        Node::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::ProcessingInstruction(instruction) => {
            out.push_str("<?");
            out.push_str(instruction);
            out.push_str("?>");
        }
        Node::DocType(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    #[test]
    fn empty_document_has_declaration_and_root() {
        let doc = Document::new("QALCULATE");
        assert_eq!(
            render(&doc),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<QALCULATE/>\n"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut doc = Document::new("r");
        doc.root = Element::new("r")
            .with_attribute("note", "say \"hi\" & <go>")
            .with_text("1 < 2 & 3");

        let xml = render(&doc);
        assert!(xml.contains(r#"note="say &quot;hi&quot; &amp; &lt;go&gt;""#));
        assert!(xml.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn attribute_whitespace_is_kept_as_references() {
        let doc = parse("<r note=\"a&#10;b&#9;c&#13;\"/>").unwrap();
        assert_eq!(doc.root.attribute("note"), Some("a\nb\tc\r"));

        let xml = render(&doc);
        assert!(xml.contains(r#"<r note="a&#10;b&#9;c&#13;"/>"#));
        assert_eq!(parse(&xml).unwrap(), doc);
    }

    #[test]
    fn formatted_input_is_reproduced() {
        let body = "<QALCULATE version=\"2.0\">\n\
                    \t<!-- user units -->\n\
                    \t<category>\n\
                    \t\t<title>Length</title>\n\
                    \t\t<unit type=\"alias\" active=\"true\">\n\
                    \t\t\t<title>Furlong</title>\n\
                    \t\t\t<names>fur</names>\n\
                    \t\t</unit>\n\
                    \t</category>\n\
                    </QALCULATE>";
        let input = format!("{XML_DECLARATION}\n{body}\n");

        let doc = parse(&input).unwrap();
        assert_eq!(render(&doc), input);
    }

    #[test]
    fn non_element_nodes_are_written_raw() {
        let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                     <?qalculate hint?>\n\
                     <r><![CDATA[a<b]]><!--c--></r>\n";
        let doc = parse(input).unwrap();
        assert_eq!(render(&doc), input);
    }
}
