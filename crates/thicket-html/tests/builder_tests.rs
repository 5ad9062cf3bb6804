//! Integration tests for the tree builder.

use quickcheck_macros::quickcheck;
use thicket_dom::{Attributes, DomTree, NodeKind, NodeRef};
use thicket_html::{IssueKind, Token, TreeBuilder, tokenize};

/// Helper to tokenize and build a tree from well-formed input.
fn build(input: &str) -> DomTree {
    TreeBuilder::new(tokenize(input).unwrap()).run()
}

/// Child element names of `node`, in order.
fn child_names(node: NodeRef<'_>) -> Vec<&str> {
    node.children().filter_map(NodeRef::name).collect()
}

/// The first element named `name` in document order.
fn find<'a>(tree: &'a DomTree, name: &str) -> NodeRef<'a> {
    tree.root_ref()
        .descendants()
        .find(|node| node.name() == Some(name))
        .unwrap()
}

/// Every non-root node is one deeper than its parent, except the root's own
/// children, which share its depth of 0.
fn depths_consistent(tree: &DomTree) -> bool {
    tree.root_ref().descendants().all(|node| match node.parent() {
        None => node.depth() == 0,
        Some(parent) if parent.kind() == NodeKind::Root => node.depth() == 0,
        Some(parent) => node.depth() == parent.depth() + 1,
    })
}

#[test]
fn test_empty_input_gives_bare_root() {
    let tree = build("");
    assert!(tree.is_empty());
    assert_eq!(tree.root_ref().kind(), NodeKind::Root);
}

#[test]
fn test_simple_nesting() {
    let tree = build("<html><body><p>Hello</p></body></html>");
    let html = find(&tree, "html");
    let body = find(&tree, "body");
    let p = find(&tree, "p");

    assert_eq!(html.parent(), Some(tree.root_ref()));
    assert_eq!(body.parent(), Some(html));
    assert_eq!(p.parent(), Some(body));
    assert_eq!(p.text(), "Hello");
    assert_eq!((html.depth(), body.depth(), p.depth()), (0, 1, 2));
}

#[test]
fn test_siblings_in_document_order() {
    let tree = build("<ul><li>a</li><li>b</li><li>c</li></ul>");
    let ul = find(&tree, "ul");
    let texts: Vec<String> = ul.children().map(NodeRef::text).collect();
    assert_eq!(texts, ["a", "b", "c"]);
}

#[test]
fn test_self_closing_elements_take_no_children() {
    let tree = build("<div><br><img src=a.png/><span>x</span></div>");
    let div = find(&tree, "div");
    assert_eq!(child_names(div), ["br", "img", "span"]);
    assert_eq!(find(&tree, "br").children().len(), 0);
    assert_eq!(find(&tree, "span").depth(), 1);
}

#[test]
fn test_mismatched_close_closes_nested_elements() {
    let (tree, issues) = TreeBuilder::new(tokenize("<a><b><c></a><d/>").unwrap()).run_with_issues();

    let a = find(&tree, "a");
    let b = find(&tree, "b");
    let c = find(&tree, "c");
    let d = find(&tree, "d");
    assert_eq!(b.parent(), Some(a));
    assert_eq!(c.parent(), Some(b));
    assert_eq!(d.parent(), Some(tree.root_ref()));
    assert_eq!(d.depth(), 0);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::ImplicitlyClosed);
    assert!(issues[0].message.contains("<b>, <c>"));
    assert_eq!(issues[0].token_index, 3);
}

#[test]
fn test_unmatched_close_is_ignored() {
    let (tree, issues) =
        TreeBuilder::new(tokenize("<p>a</span>b</p>").unwrap()).run_with_issues();
    let p = find(&tree, "p");
    assert_eq!(p.children().len(), 2);
    assert_eq!(p.text(), "ab");
    assert_eq!(issues[0].kind, IssueKind::UnmatchedCloseTag);
}

#[test]
fn test_close_matches_nearest_open_element() {
    let tree = build("<div><div><p>x</div>y</div>");
    let outer = find(&tree, "div");
    let inner: Vec<NodeRef<'_>> = outer.children().filter(|n| n.is_element()).collect();
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].text(), "x");
    // `y` follows the inner div's close, so it belongs to the outer div.
    assert_eq!(outer.children().last().and_then(NodeRef::content), Some("y"));
}

#[test]
fn test_close_tag_namespace_is_ignored_when_matching() {
    let tree = build("<svg:g><svg:rect/></g>after");
    let g = find(&tree, "g");
    assert_eq!(g.namespace(), Some("svg"));
    assert_eq!(g.children().len(), 1);
    assert_eq!(tree.root_ref().children().len(), 2);
}

#[test]
fn test_unclosed_elements_at_end() {
    let (tree, issues) = TreeBuilder::new(tokenize("<html><body>text").unwrap()).run_with_issues();
    assert_eq!(find(&tree, "body").text(), "text");
    let last = issues.last().unwrap();
    assert_eq!(last.kind, IssueKind::UnclosedAtEnd);
    assert!(last.message.contains("<html>, <body>"));
}

#[test]
fn test_raw_text_body_is_single_text_node() {
    let tree = build("<script>if (x < 1) { y(); }</script>");
    let script = find(&tree, "script");
    assert_eq!(script.children().len(), 1);
    assert_eq!(script.text(), "if (x < 1) { y(); }");
}

#[test]
fn test_comment_and_doctype_nodes() {
    let tree = build("<!DOCTYPE html><!-- top --><p><!-- inner --></p>");
    let kinds: Vec<NodeKind> = tree.root_ref().children().map(NodeRef::kind).collect();
    assert_eq!(kinds, [NodeKind::Doctype, NodeKind::Comment, NodeKind::Element]);

    let inner = find(&tree, "p").children().next().unwrap();
    assert_eq!(inner.kind(), NodeKind::Comment);
    assert_eq!(inner.content(), Some("inner"));
    assert_eq!(inner.depth(), 1);
}

#[test]
fn test_dropped_constructs_are_reported() {
    let input = r#"<?xml version="1.0"?><?pi data?><r><![CDATA[x]]></r>"#;
    let (tree, issues) = TreeBuilder::new(tokenize(input).unwrap()).run_with_issues();
    assert_eq!(tree.len(), 2);
    let kinds: Vec<IssueKind> = issues.iter().map(|issue| issue.kind).collect();
    assert_eq!(
        kinds,
        [
            IssueKind::DroppedDeclaration,
            IssueKind::DroppedDeclaration,
            IssueKind::DroppedCData,
        ]
    );
}

#[test]
fn test_whitespace_only_text_tokens_are_skipped() {
    let tokens = vec![
        Token::OpenTag {
            name: "p".to_string(),
            namespace: None,
            attributes: Attributes::new(),
            self_closing: false,
        },
        Token::text("   "),
        Token::text("  x "),
    ];
    let tree = TreeBuilder::new(tokens).run();
    let p = find(&tree, "p");
    assert_eq!(p.children().len(), 1);
    assert_eq!(p.text(), "x");
}

#[test]
fn test_depths_consistent_after_repairs() {
    let tree = build("<a><b></a><c><d></x></d><e></c></b><f>");
    assert!(depths_consistent(&tree));
}

// ========== properties ==========

/// Build a token from a pair of small numbers, over a handful of names so
/// that close tags regularly match something.
fn token_from(kind: u8, name: u8) -> Token {
    const NAMES: &[&str] = &["a", "b", "div", "p", "br"];
    let name = NAMES[usize::from(name) % NAMES.len()].to_string();
    match kind % 6 {
        0 | 1 => Token::OpenTag {
            name,
            namespace: None,
            attributes: Attributes::new(),
            self_closing: false,
        },
        2 => Token::CloseTag {
            name,
            namespace: None,
        },
        3 => Token::text(name),
        4 => Token::Comment { content: name },
        _ => Token::OpenTag {
            name,
            namespace: None,
            attributes: Attributes::new(),
            self_closing: true,
        },
    }
}

#[quickcheck]
fn prop_builder_is_total_and_depths_consistent(script: Vec<(u8, u8)>) -> bool {
    let tokens: Vec<Token> = script.iter().map(|&(kind, name)| token_from(kind, name)).collect();
    let tree = TreeBuilder::new(tokens).run();
    depths_consistent(&tree)
}

#[quickcheck]
fn prop_every_node_is_reachable_from_root(script: Vec<(u8, u8)>) -> bool {
    let tokens: Vec<Token> = script.iter().map(|&(kind, name)| token_from(kind, name)).collect();
    let tree = TreeBuilder::new(tokens).run();
    tree.root_ref().descendants().count() == tree.len()
}
