use strum_macros::Display;

use super::token::Token;
use crate::error::{MalformedInput, MalformedReason};

/// The tokenizer state machine.
///
/// Raw-text mode is tracked separately (see [`MarkupTokenizer`]) because it
/// overrides every state while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Between constructs, accumulating character data.
    Text,
    /// Inside `<...>`, accumulating the tag buffer.
    Tag,
    /// Inside a quoted attribute value; `<` and `>` are inert here.
    Quote,
    /// After `<!--`, looking for `-->`.
    Comment,
    /// After `<!DOCTYPE`, looking for `>`.
    Doctype,
    /// After `<?xml`, looking for `?>`.
    XmlDecl,
    /// After `<?` (any target but `xml`), looking for `?>`.
    ProcessingInstruction,
    /// After `<![CDATA[`, looking for `]]>`.
    CData,
}

impl TokenizerState {
    /// The error raised when input ends while this state is active.
    pub(super) const fn unterminated_reason(self) -> Option<MalformedReason> {
        match self {
            Self::Text => None,
            Self::Tag | Self::Quote => Some(MalformedReason::UnterminatedTag),
            Self::Comment => Some(MalformedReason::UnterminatedComment),
            Self::Doctype => Some(MalformedReason::UnterminatedDoctype),
            Self::XmlDecl => Some(MalformedReason::UnterminatedDeclaration),
            Self::ProcessingInstruction => Some(MalformedReason::UnterminatedProcessingInstruction),
            Self::CData => Some(MalformedReason::UnterminatedCData),
        }
    }
}

/// The raw-text element currently being copied verbatim.
#[derive(Debug)]
pub(super) struct RawTextElement {
    /// Element name as written in the opening tag, namespace prefix included.
    pub(super) name: String,
    /// The literal `</name` that ends raw-text mode.
    pub(super) closing: String,
    /// Byte offset of the opening tag's `<`.
    pub(super) start: usize,
}

/// Character-position state machine turning markup text into tokens.
///
/// Tokenizing is one forward pass with no backtracking beyond the fixed-length
/// lookahead used to classify a `<`.
pub struct MarkupTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    /// Byte offset of the `<` that opened the construct in progress.
    pub(super) construct_start: usize,
    /// Quote character that opened the attribute value in progress.
    pub(super) quote: char,
    pub(super) text_buffer: String,
    pub(super) tag_buffer: String,
    pub(super) raw_text: Option<RawTextElement>,
    pub(super) raw_text_buffer: String,
    pub(super) token_stream: Vec<Token>,
}

impl MarkupTokenizer {
    /// Create a new tokenizer for the given input. The initial state is
    /// [`TokenizerState::Text`].
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Text,
            input,
            current_pos: 0,
            construct_start: 0,
            quote: '"',
            text_buffer: String::new(),
            tag_buffer: String::new(),
            raw_text: None,
            raw_text_buffer: String::new(),
            token_stream: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`run`](Self::run) to get the tokens for the builder.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// The current state (for debugging and tests).
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Run the state machine over the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInput`] as soon as a construct is found to be
    /// unterminated; no further tokens are produced after that.
    pub fn run(&mut self) -> Result<(), MalformedInput> {
        while self.current_pos < self.input.len() {
            if self.raw_text.is_some() {
                self.step_raw_text();
                continue;
            }
            match self.state {
                TokenizerState::Text => self.handle_text_state(),
                TokenizerState::Tag => self.handle_tag_state(),
                TokenizerState::Quote => self.handle_quote_state(),
                TokenizerState::Comment => self.handle_comment_state()?,
                TokenizerState::Doctype => self.handle_doctype_state()?,
                TokenizerState::XmlDecl => self.handle_xml_declaration_state()?,
                TokenizerState::ProcessingInstruction => {
                    self.handle_processing_instruction_state()?;
                }
                TokenizerState::CData => self.handle_cdata_state()?,
            }
        }
        self.finish()
    }

    /// Raw-text mode: copy characters verbatim until `</name` is at the read
    /// position, then hand that `<` back to the text state.
    fn step_raw_text(&mut self) {
        let Some(raw) = self.raw_text.as_ref() else {
            return;
        };
        if self.input[self.current_pos..].starts_with(raw.closing.as_str()) {
            let body = core::mem::take(&mut self.raw_text_buffer);
            if !body.is_empty() {
                self.emit(Token::Text { content: body });
            }
            self.raw_text = None;
            return;
        }
        if let Some(c) = self.consume() {
            self.raw_text_buffer.push(c);
        }
    }

    /// Text state: `<` starts a construct, anything else is character data.
    fn handle_text_state(&mut self) {
        if self.current_char() == Some('<') {
            self.start_construct();
        } else if let Some(c) = self.consume() {
            self.text_buffer.push(c);
        }
    }

    /// Tag state: quotes switch to the quote state, `>` ends the tag.
    fn handle_tag_state(&mut self) {
        match self.consume() {
            Some(c @ ('"' | '\'')) => {
                self.quote = c;
                self.tag_buffer.push(c);
                self.switch_to(TokenizerState::Quote);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Text);
                self.finish_tag();
            }
            Some(c) => self.tag_buffer.push(c),
            None => {}
        }
    }

    /// Quote state: only the matching, unescaped quote character leaves it.
    fn handle_quote_state(&mut self) {
        if let Some(c) = self.consume() {
            let escaped = self.tag_buffer.ends_with('\\');
            self.tag_buffer.push(c);
            if c == self.quote && !escaped {
                self.switch_to(TokenizerState::Tag);
            }
        }
    }

    fn handle_comment_state(&mut self) -> Result<(), MalformedInput> {
        let body = self.scan_to_terminator("-->")?;
        self.emit(Token::Comment {
            content: body.trim().to_string(),
        });
        Ok(())
    }

    fn handle_doctype_state(&mut self) -> Result<(), MalformedInput> {
        let body = self.scan_to_terminator(">")?;
        self.emit(Token::Doctype {
            content: body.trim().to_string(),
        });
        Ok(())
    }

    fn handle_xml_declaration_state(&mut self) -> Result<(), MalformedInput> {
        let body = self.scan_to_terminator("?>")?;
        self.emit(Token::XmlDeclaration {
            content: body.trim().to_string(),
        });
        Ok(())
    }

    fn handle_processing_instruction_state(&mut self) -> Result<(), MalformedInput> {
        let body = self.scan_to_terminator("?>")?;
        let (target, content) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body.as_str(), ""));
        let token = Token::ProcessingInstruction {
            target: target.to_string(),
            content: content.trim().to_string(),
        };
        self.emit(token);
        Ok(())
    }

    fn handle_cdata_state(&mut self) -> Result<(), MalformedInput> {
        let content = self.scan_to_terminator("]]>")?;
        self.emit(Token::CData { content });
        Ok(())
    }

    /// End of input: only the text state may still be active.
    fn finish(&mut self) -> Result<(), MalformedInput> {
        if let Some(raw) = self.raw_text.take() {
            return Err(MalformedInput::new(
                MalformedReason::UnclosedRawText { element: raw.name },
                raw.start,
            ));
        }
        if let Some(reason) = self.state.unterminated_reason() {
            return Err(MalformedInput::new(reason, self.construct_start));
        }
        self.flush_text();
        Ok(())
    }
}
