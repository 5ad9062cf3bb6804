use core::fmt::Write as _;

use crate::{NodeRef, NodeType};

/// Render `node` and its subtree as an indented outline, one node per line.
#[must_use]
pub fn format_tree(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    write_tree(node, 0, &mut out);
    out
}

/// Print `node` and its subtree to stdout.
pub fn print_tree(node: NodeRef<'_>) {
    print!("{}", format_tree(node));
}

fn write_tree(node: NodeRef<'_>, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let _ = match node.node_type() {
        NodeType::Root => writeln!(out, "{prefix}Root"),
        NodeType::Element(data) => {
            let _ = write!(out, "{prefix}<{}", data.qualified_name());
            for attr in &data.attributes {
                let _ = write!(out, " {}=\"{}\"", attr.name, attr.value);
            }
            writeln!(out, ">")
        }
        NodeType::Text(text) => writeln!(out, "{prefix}\"{text}\""),
        NodeType::Comment(body) => writeln!(out, "{prefix}<!-- {body} -->"),
        NodeType::Doctype(body) => writeln!(out, "{prefix}<!DOCTYPE {body}>"),
    };
    for child in node.children() {
        write_tree(child, indent + 1, out);
    }
}
