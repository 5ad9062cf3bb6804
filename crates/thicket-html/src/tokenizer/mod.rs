//! Markup tokenizer module.

/// Attribute string scanning.
pub mod attributes;
/// Validation of a leading XML declaration.
pub mod declaration;
/// Helper methods for tokenizer state transitions and token emission.
pub mod helpers;
/// Tokenizer state machine implementation.
pub mod machine;
/// Token types produced by the tokenizer.
pub mod token;

pub use declaration::validate_declaration;
pub use machine::{MarkupTokenizer, TokenizerState};
pub use token::Token;

use crate::error::MalformedInput;

/// Elements whose body is copied verbatim instead of being tokenized.
///
/// Matched case-sensitively against the local tag name as written.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "iframe", "noscript"];

/// Tokenize `input` in one pass.
///
/// # Errors
///
/// Returns [`MalformedInput`] if a comment, CDATA section, declaration,
/// processing instruction, DOCTYPE, tag or raw-text element is still open at
/// end of input.
pub fn tokenize(input: &str) -> Result<Vec<Token>, MalformedInput> {
    let mut tokenizer = MarkupTokenizer::new(input.to_string());
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}
