//! Markup tokenizer and tree builder for Thicket.
//!
//! # Scope
//!
//! This crate implements:
//! - **Declaration guard** - rejects a malformed leading `<?xml ...?>` before
//!   any tokenizing work happens
//! - **Tokenizer** - a character-position state machine turning markup text
//!   into a flat [`Token`] sequence
//!   - Text, tag, quoted attribute value, comment, DOCTYPE, XML declaration,
//!     processing instruction and CDATA states
//!   - Raw-text mode for `script`, `style`, `textarea`, `iframe`, `noscript`
//!   - Attribute parsing with boolean, quoted and unquoted values
//!
//! - **Tree Builder** - a stack-based assembler producing a [`DomTree`]
//!   - Repairs mismatched and unbalanced closing tags instead of failing
//!
//! # Not Implemented
//!
//! - Character reference decoding (`&amp;` stays as written)
//! - Implicit tag insertion (`<p>` auto-closing, `<tbody>` insertion)
//! - CDATA sections are recognised but not kept in the tree
//!
//! [`DomTree`]: thicket_dom::DomTree

/// Tree construction from a token sequence.
pub mod builder;
/// The error surfaced for unparseable input.
pub mod error;
/// Tokenizer for converting markup text into tokens.
pub mod tokenizer;

pub use builder::{BuildIssue, IssueKind, TreeBuilder};
pub use error::{MalformedInput, MalformedReason};
pub use tokenizer::{MarkupTokenizer, Token, tokenize, validate_declaration};
