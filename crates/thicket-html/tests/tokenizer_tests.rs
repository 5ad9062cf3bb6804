//! Integration tests for the markup tokenizer.

use thicket_dom::Attributes;
use thicket_html::{MalformedReason, Token, tokenize};

/// Helper to tokenize a string that must be well-formed.
fn tokens(input: &str) -> Vec<Token> {
    tokenize(input).unwrap()
}

/// Helper to get the reason and position of a tokenizer failure.
fn failure(input: &str) -> (MalformedReason, usize) {
    let err = tokenize(input).unwrap_err();
    (err.reason, err.position)
}

fn open_tag(name: &str) -> Token {
    Token::OpenTag {
        name: name.to_string(),
        namespace: None,
        attributes: Attributes::new(),
        self_closing: false,
    }
}

fn close_tag(name: &str) -> Token {
    Token::CloseTag {
        name: name.to_string(),
        namespace: None,
    }
}

#[test]
fn test_plain_text() {
    assert_eq!(tokens("  Hello  "), [Token::text("Hello")]);
}

#[test]
fn test_empty_and_whitespace_input() {
    assert!(tokens("").is_empty());
    assert!(tokens(" \n\t ").is_empty());
}

#[test]
fn test_tag_with_text_content() {
    assert_eq!(
        tokens("<p> Hi </p>"),
        [open_tag("p"), Token::text("Hi"), close_tag("p")]
    );
}

#[test]
fn test_whitespace_between_tags_dropped() {
    assert_eq!(
        tokens("<ul>\n  <li>a</li>\n</ul>"),
        [
            open_tag("ul"),
            open_tag("li"),
            Token::text("a"),
            close_tag("li"),
            close_tag("ul"),
        ]
    );
}

#[test]
fn test_attributes() {
    let result = tokens(r#"<input type="text" id='name' size=10 disabled>"#);
    match &result[0] {
        Token::OpenTag {
            name,
            attributes,
            self_closing,
            ..
        } => {
            assert_eq!(name, "input");
            assert!(self_closing, "input is in the self-closing set");
            let pairs: Vec<(&str, &str)> = attributes
                .iter()
                .map(|a| (a.name.as_str(), a.value.as_str()))
                .collect();
            assert_eq!(
                pairs,
                [("type", "text"), ("id", "name"), ("size", "10"), ("disabled", "")]
            );
        }
        other => panic!("Expected OpenTag token, got {other:?}"),
    }
}

#[test]
fn test_angle_brackets_inside_quotes_are_inert() {
    let result = tokens(r#"<a title="x > y < z">link</a>"#);
    assert_eq!(result.len(), 3);
    match &result[0] {
        Token::OpenTag { attributes, .. } => {
            assert_eq!(attributes.get("title"), Some("x > y < z"));
        }
        other => panic!("Expected OpenTag token, got {other:?}"),
    }
}

#[test]
fn test_escaped_quote_does_not_close_value() {
    let result = tokens(r#"<a data-x="say \"hi\" >" b=1>"#);
    assert_eq!(result.len(), 1);
    match &result[0] {
        Token::OpenTag { attributes, .. } => {
            assert_eq!(attributes.len(), 2);
            assert_eq!(attributes.get("data-x"), Some(r#"say \"hi\" >"#));
            assert_eq!(attributes.get("b"), Some("1"));
        }
        other => panic!("Expected OpenTag token, got {other:?}"),
    }
}

#[test]
fn test_escaped_quotes_keep_attribute_whole() {
    let result = tokens(r#"<a title="say \"hi\"">t</a>"#);
    match &result[0] {
        Token::OpenTag { attributes, .. } => {
            let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names, ["title"]);
            assert_eq!(attributes.get("title"), Some(r#"say \"hi\""#));
        }
        other => panic!("Expected OpenTag token, got {other:?}"),
    }
    assert_eq!(result[1], Token::text("t"));
}

#[test]
fn test_explicit_self_close() {
    let result = tokens("<widget/><br>");
    assert!(result[0].is_self_closing());
    assert!(result[1].is_self_closing());
    assert!(!tokens("<div>")[0].is_self_closing());
}

#[test]
fn test_namespace_prefix() {
    assert_eq!(
        tokens("<svg:rect width=1/></svg:g>"),
        [
            Token::OpenTag {
                name: "rect".to_string(),
                namespace: Some("svg".to_string()),
                attributes: [("width", "1")].into_iter().collect(),
                self_closing: true,
            },
            Token::CloseTag {
                name: "g".to_string(),
                namespace: Some("svg".to_string()),
            },
        ]
    );
}

#[test]
fn test_comment() {
    assert_eq!(
        tokens("a<!--  hello <b> -->b"),
        [
            Token::text("a"),
            Token::Comment {
                content: "hello <b>".to_string()
            },
            Token::text("b"),
        ]
    );
}

#[test]
fn test_doctype_case_insensitive() {
    let expected = [Token::Doctype {
        content: "html".to_string(),
    }];
    assert_eq!(tokens("<!DOCTYPE html>"), expected);
    assert_eq!(tokens("<!doctype  html >"), expected);
}

#[test]
fn test_cdata_content_verbatim() {
    assert_eq!(
        tokens("<x><![CDATA[ a < b ]]></x>"),
        [
            open_tag("x"),
            Token::CData {
                content: " a < b ".to_string()
            },
            close_tag("x"),
        ]
    );
}

#[test]
fn test_xml_declaration_and_processing_instruction() {
    assert_eq!(
        tokens(r#"<?xml version="1.0"?><?xml-stylesheet href="s.xsl"?><r/>"#),
        [
            Token::XmlDeclaration {
                content: r#"version="1.0""#.to_string()
            },
            Token::ProcessingInstruction {
                target: "xml-stylesheet".to_string(),
                content: r#"href="s.xsl""#.to_string()
            },
            Token::OpenTag {
                name: "r".to_string(),
                namespace: None,
                attributes: Attributes::new(),
                self_closing: true,
            },
        ]
    );
}

#[test]
fn test_raw_text_script() {
    assert_eq!(
        tokens("<script>if (x < 1) { y(); }</script>"),
        [
            open_tag("script"),
            Token::text("if (x < 1) { y(); }"),
            close_tag("script"),
        ]
    );
}

#[test]
fn test_raw_text_keeps_markup_and_whitespace() {
    assert_eq!(
        tokens("<style>\n  a > b { }\n  <!-- x -->\n</style><p>"),
        [
            open_tag("style"),
            Token::text("\n  a > b { }\n  <!-- x -->\n"),
            close_tag("style"),
            open_tag("p"),
        ]
    );
}

#[test]
fn test_raw_text_empty_body() {
    assert_eq!(
        tokens("<textarea></textarea>"),
        [open_tag("textarea"), close_tag("textarea")]
    );
}

#[test]
fn test_raw_text_is_case_sensitive() {
    // `SCRIPT` is not a raw-text element name, so its body is tokenized.
    assert_eq!(
        tokens("<SCRIPT><b></SCRIPT>"),
        [open_tag("SCRIPT"), open_tag("b"), close_tag("SCRIPT")]
    );
}

#[test]
fn test_namespaced_raw_text_element_closes_on_prefixed_tag() {
    assert_eq!(
        tokens("<svg:style>a{}</svg:style><p>x</p>"),
        [
            Token::OpenTag {
                name: "style".to_string(),
                namespace: Some("svg".to_string()),
                attributes: Attributes::new(),
                self_closing: false,
            },
            Token::text("a{}"),
            Token::CloseTag {
                name: "style".to_string(),
                namespace: Some("svg".to_string()),
            },
            open_tag("p"),
            Token::text("x"),
            close_tag("p"),
        ]
    );
    assert_eq!(tokens("<x:script></x:script>").len(), 2);
}

#[test]
fn test_unclosed_namespaced_raw_text_names_prefixed_element() {
    assert_eq!(
        failure("<svg:style>a{}</style>"),
        (
            MalformedReason::UnclosedRawText {
                element: "svg:style".to_string()
            },
            0
        )
    );
}

#[test]
fn test_self_closed_raw_text_element_is_not_raw() {
    assert_eq!(tokens("<script src=a.js /><p>x</p>").len(), 4);
}

#[test]
fn test_empty_tags_produce_nothing() {
    assert_eq!(tokens("<>a</>"), [Token::text("a")]);
}

#[test]
fn test_multibyte_text() {
    assert_eq!(
        tokens("<p>héllo · 世界</p>"),
        [open_tag("p"), Token::text("héllo · 世界"), close_tag("p")]
    );
}

// ========== failures ==========

#[test]
fn test_unterminated_comment() {
    assert_eq!(
        failure("<p>x</p><!-- never closed"),
        (MalformedReason::UnterminatedComment, 8)
    );
    assert_eq!(failure("<!-- never closed"), (MalformedReason::UnterminatedComment, 0));
}

#[test]
fn test_unterminated_cdata() {
    assert_eq!(failure("ab<![CDATA[x"), (MalformedReason::UnterminatedCData, 2));
}

#[test]
fn test_unterminated_doctype() {
    assert_eq!(failure("<!DOCTYPE html"), (MalformedReason::UnterminatedDoctype, 0));
}

#[test]
fn test_unterminated_declaration_and_pi() {
    assert_eq!(
        failure(r#"<?xml version="1.0""#),
        (MalformedReason::UnterminatedDeclaration, 0)
    );
    assert_eq!(
        failure("<a/><?php echo 1;"),
        (MalformedReason::UnterminatedProcessingInstruction, 4)
    );
}

#[test]
fn test_unterminated_tag_and_quote() {
    assert_eq!(failure("<div class=x"), (MalformedReason::UnterminatedTag, 0));
    assert_eq!(failure(r#"<p></p><a href="x>y"#), (MalformedReason::UnterminatedTag, 7));
}

#[test]
fn test_unclosed_raw_text_names_element() {
    let (reason, position) = failure("<div><script>let a = 1;");
    assert_eq!(
        reason,
        MalformedReason::UnclosedRawText {
            element: "script".to_string()
        }
    );
    assert_eq!(position, 5);

    let err = tokenize("<div><script>let a = 1;").unwrap_err();
    assert!(err.to_string().contains("<script>"));
}

#[test]
fn test_error_display() {
    let err = tokenize("<!-- never closed").unwrap_err();
    assert_eq!(err.to_string(), "malformed input: unterminated comment at byte 0");
}

#[test]
fn test_token_display() {
    let result = tokens(r#"<ns:a href="x"/>"#);
    assert_eq!(result[0].to_string(), r#"<ns:a href="x" />"#);
    assert_eq!(close_tag("p").to_string(), "</p>");
    assert_eq!(Token::text("hi").to_string(), "Text(\"hi\")");
}
