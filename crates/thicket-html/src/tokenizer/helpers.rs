//! Helper functions for the markup tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions
//! - Input/character handling and lookahead
//! - Token emission and text buffer flushing
//! - Tag buffer parsing

use thicket_dom::is_self_closing;

use super::RAW_TEXT_ELEMENTS;
use super::attributes::parse_attributes;
use super::machine::{MarkupTokenizer, RawTextElement, TokenizerState};
use super::token::Token;
use crate::error::{MalformedInput, MalformedReason};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl MarkupTokenizer {
    /// Transitions to a new state.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// A `<` is at the read position: flush pending text and classify the
    /// construct by lookahead.
    pub(super) fn start_construct(&mut self) {
        self.flush_text();
        self.construct_start = self.current_pos;

        if self.next_few_characters_are("<!--") {
            self.consume_string("<!--");
            self.switch_to(TokenizerState::Comment);
        } else if self.at_xml_declaration() {
            self.consume_string("<?xml");
            self.switch_to(TokenizerState::XmlDecl);
        } else if self.next_few_characters_are("<?") {
            self.consume_string("<?");
            self.switch_to(TokenizerState::ProcessingInstruction);
        } else if self.next_few_characters_are_case_insensitive("<!DOCTYPE") {
            self.consume_string("<!DOCTYPE");
            self.switch_to(TokenizerState::Doctype);
        } else if self.next_few_characters_are("<![CDATA[") {
            self.consume_string("<![CDATA[");
            self.switch_to(TokenizerState::CData);
        } else {
            self.consume_string("<");
            self.tag_buffer.clear();
            self.switch_to(TokenizerState::Tag);
        }
    }

    /// `<?xml` followed by whitespace or `?`; `<?xml-stylesheet` is a
    /// processing instruction.
    fn at_xml_declaration(&self) -> bool {
        self.next_few_characters_are("<?xml")
            && self
                .peek_char_at(5)
                .is_some_and(|c| c.is_whitespace() || c == '?')
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl MarkupTokenizer {
    /// Returns the character at the read position and advances past it.
    /// Returns None at end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.current_char()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// The character at the read position, without consuming it.
    pub(super) fn current_char(&self) -> Option<char> {
        self.input[self.current_pos..].chars().next()
    }

    /// Peek at the character `offset` characters past the read position.
    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Check if the input at the read position starts with `target`.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Check if the input at the read position starts with `target`, using
    /// ASCII case-insensitive comparison.
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input
            .get(self.current_pos..self.current_pos + target.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// Return everything up to the next `terminator` and move past it, back
    /// into the text state.
    ///
    /// # Errors
    ///
    /// The current state's unterminated-construct error, positioned at the
    /// construct's opening `<`, if `terminator` never appears.
    pub(super) fn scan_to_terminator(&mut self, terminator: &str) -> Result<String, MalformedInput> {
        let rest = &self.input[self.current_pos..];
        let Some(end) = rest.find(terminator) else {
            let reason = self
                .state
                .unterminated_reason()
                .unwrap_or(MalformedReason::UnterminatedTag);
            return Err(MalformedInput::new(reason, self.construct_start));
        };
        let body = rest[..end].to_string();
        self.current_pos += end + terminator.len();
        self.switch_to(TokenizerState::Text);
        Ok(body)
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl MarkupTokenizer {
    /// Adds a token to the output stream.
    pub(super) fn emit(&mut self, token: Token) {
        self.token_stream.push(token);
    }

    /// Emit the pending character data as a trimmed text token. Buffers that
    /// are empty after trimming are dropped.
    pub(super) fn flush_text(&mut self) {
        let pending = core::mem::take(&mut self.text_buffer);
        let trimmed = pending.trim();
        if !trimmed.is_empty() {
            self.emit(Token::text(trimmed));
        }
    }

    /// The closing `>` of a tag was consumed: parse the buffer and emit the
    /// tag, entering raw-text mode after a raw-text element's opening tag.
    pub(super) fn finish_tag(&mut self) {
        let buffer = core::mem::take(&mut self.tag_buffer);
        let Some(token) = parse_tag(&buffer) else {
            return;
        };
        if let Token::OpenTag {
            name,
            namespace,
            self_closing: false,
            ..
        } = &token
            && RAW_TEXT_ELEMENTS.contains(&name.as_str())
        {
            // The body ends at the close tag as written, prefix included.
            let written = match namespace {
                Some(prefix) => format!("{prefix}:{name}"),
                None => name.clone(),
            };
            self.raw_text = Some(RawTextElement {
                closing: format!("</{written}"),
                name: written,
                start: self.construct_start,
            });
        }
        self.emit(token);
    }
}

// =============================================================================
// Tag Buffer Parsing
// =============================================================================

/// Split `prefix:name` once on `:`. An empty prefix counts as no prefix.
pub(super) fn split_qualified_name(qualified: &str) -> (Option<String>, String) {
    match qualified.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() => (Some(prefix.to_string()), local.to_string()),
        Some((_, local)) => (None, local.to_string()),
        None => (None, qualified.to_string()),
    }
}

/// Turn the text between `<` and `>` into an open or close tag token.
///
/// Returns `None` when no tag name is left after parsing (`<>`, `</>`).
pub(super) fn parse_tag(buffer: &str) -> Option<Token> {
    if let Some(rest) = buffer.strip_prefix('/') {
        let (namespace, name) = split_qualified_name(rest.trim());
        return (!name.is_empty()).then_some(Token::CloseTag { name, namespace });
    }

    let mut body = buffer.trim();
    let explicit_self_close = body.ends_with('/');
    if explicit_self_close {
        body = body[..body.len() - 1].trim_end();
    }

    let (tag_name, attribute_string) = body
        .split_once(char::is_whitespace)
        .unwrap_or((body, ""));
    let (namespace, name) = split_qualified_name(tag_name);
    if name.is_empty() {
        return None;
    }

    let self_closing = explicit_self_close || is_self_closing(&name);
    Some(Token::OpenTag {
        attributes: parse_attributes(attribute_string),
        name,
        namespace,
        self_closing,
    })
}
