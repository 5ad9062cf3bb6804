use core::fmt;

use strum_macros::Display;
use thicket_common::warning::warn_once;
use thicket_dom::{DomTree, ElementData, NodeId, NodeType, TreeSink};

use crate::tokenizer::Token;

/// What kind of repair or omission a [`BuildIssue`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// A close tag with no open element of that name; it was ignored.
    UnmatchedCloseTag,
    /// A close tag also closed open elements nested inside its match.
    ImplicitlyClosed,
    /// An element was still open at end of input.
    UnclosedAtEnd,
    /// A CDATA section was recognised but not kept in the tree.
    DroppedCData,
    /// An XML declaration or processing instruction was not kept in the tree.
    DroppedDeclaration,
}

/// A recoverable oddity found while building the tree.
///
/// Building never fails; these are kept so callers can inspect what was
/// repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIssue {
    /// Category of the issue.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this was encountered.
    pub token_index: usize,
}

impl fmt::Display for BuildIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (token {})", self.kind, self.message, self.token_index)
    }
}

/// Assembles a token sequence into a [`DomTree`].
///
/// Keeps an explicit stack of open nodes, as arena indices, seeded with the
/// root. New nodes are appended to whatever is on top of the stack, with a
/// depth of stack height − 1.
pub struct TreeBuilder {
    tokens: Vec<Token>,
    sink: TreeSink,
    stack_of_open_elements: Vec<NodeId>,
    token_index: usize,
    issues: Vec<BuildIssue>,
}

impl TreeBuilder {
    /// Create a builder over a token sequence.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            sink: TreeSink::new(),
            stack_of_open_elements: vec![NodeId::ROOT],
            token_index: 0,
            issues: Vec::new(),
        }
    }

    /// Run the builder and return the tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the builder and return the tree along with everything it had to
    /// repair or drop.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<BuildIssue>) {
        let tokens = core::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            self.process_token(token);
        }
        self.report_unclosed();
        (self.sink.finish(), self.issues)
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::OpenTag {
                name,
                namespace,
                attributes,
                self_closing,
            } => {
                let element = ElementData {
                    name,
                    namespace,
                    attributes,
                };
                if let Some(id) = self.append(NodeType::Element(element))
                    && !self_closing
                {
                    self.stack_of_open_elements.push(id);
                }
            }
            Token::CloseTag { name, .. } => self.close_element(&name),
            Token::Text { content } => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    let _ = self.append(NodeType::Text(trimmed.to_string()));
                }
            }
            Token::Comment { content } => {
                let _ = self.append(NodeType::Comment(content));
            }
            Token::Doctype { content } => {
                let _ = self.append(NodeType::Doctype(content));
            }
            Token::CData { content } => {
                self.parse_warning(
                    IssueKind::DroppedCData,
                    &format!("dropping CDATA section ({} bytes)", content.len()),
                );
            }
            Token::XmlDeclaration { .. } => {
                self.record(
                    IssueKind::DroppedDeclaration,
                    "XML declaration not kept in the tree".to_string(),
                );
            }
            Token::ProcessingInstruction { target, .. } => {
                self.record(
                    IssueKind::DroppedDeclaration,
                    format!("processing instruction <?{target}?> not kept in the tree"),
                );
            }
        }
    }

    /// The node new children are appended to.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Only the root and elements are ever on the stack, so this always
    /// succeeds.
    fn append(&mut self, node_type: NodeType) -> Option<NodeId> {
        let depth = self.stack_of_open_elements.len() - 1;
        let parent = self.current_node();
        self.sink.append(parent, node_type, depth)
    }

    /// Pop up to and including the nearest open element named `name`.
    ///
    /// Elements above the match stay in the tree; they just stop receiving
    /// children. A close tag with no match leaves the stack alone.
    fn close_element(&mut self, name: &str) {
        let matched = self
            .stack_of_open_elements
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|&(_, &id)| self.sink.tree().as_element(id).is_some_and(|e| e.name == name))
            .map(|(index, _)| index);

        let Some(index) = matched else {
            self.parse_warning(
                IssueKind::UnmatchedCloseTag,
                &format!("ignoring unmatched close tag </{name}>"),
            );
            return;
        };

        let nested = self.stack_of_open_elements.len() - index - 1;
        if nested > 0 {
            let names = self.open_element_names(index + 1);
            self.record(
                IssueKind::ImplicitlyClosed,
                format!("</{name}> also closed {}", names.join(", ")),
            );
        }
        self.stack_of_open_elements.truncate(index);
    }

    fn report_unclosed(&mut self) {
        if self.stack_of_open_elements.len() > 1 {
            let names = self.open_element_names(1);
            self.record(
                IssueKind::UnclosedAtEnd,
                format!("still open at end of input: {}", names.join(", ")),
            );
        }
    }

    /// `<name>` for every open element from stack index `from` upward.
    fn open_element_names(&self, from: usize) -> Vec<String> {
        self.stack_of_open_elements[from..]
            .iter()
            .filter_map(|&id| self.sink.tree().as_element(id))
            .map(|e| format!("<{}>", e.name))
            .collect()
    }

    fn record(&mut self, kind: IssueKind, message: String) {
        self.issues.push(BuildIssue {
            kind,
            message,
            token_index: self.token_index,
        });
    }

    /// Record an issue that loses or ignores input, and log it through the
    /// common warning system.
    fn parse_warning(&mut self, kind: IssueKind, message: &str) {
        warn_once("Tree Builder", message);
        self.record(kind, message.to_string());
    }
}
