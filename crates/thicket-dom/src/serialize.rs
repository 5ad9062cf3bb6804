//! Markup serialization.
//!
//! Writes a tree back out as markup, mirroring the tag-writing rules the
//! tokenizer reads: re-parsing the output yields the same element names,
//! attribute sets and child structure (attribute order and whitespace aside).
//! Raw-text element bodies are escaped like any other text.

use crate::{NodeRef, NodeType, is_self_closing};

/// Serialize `node` and everything below it.
///
/// The root serializes as the concatenation of its children.
#[must_use]
pub fn to_markup(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: NodeRef<'_>, out: &mut String) {
    match node.node_type() {
        NodeType::Root => {
            for child in node.children() {
                write_node(child, out);
            }
        }
        NodeType::Text(text) => escape_into(text, out),
        NodeType::Comment(body) => {
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
        NodeType::Doctype(body) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(body);
            out.push('>');
        }
        NodeType::Element(element) => {
            let qualified = element.qualified_name();
            out.push('<');
            out.push_str(&qualified);
            for attr in &element.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_into(&attr.value, out);
                out.push('"');
            }

            // Children of a self-closing element are dropped.
            if is_self_closing(&element.name) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in node.children() {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(&qualified);
            out.push('>');
        }
    }
}

/// Append `text` with the five HTML special characters escaped.
pub fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
}

/// Escape `text` into a new string.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}
