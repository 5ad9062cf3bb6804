use thiserror::Error;

/// Input the tokenizer cannot turn into tokens.
///
/// This is the only failure of the parse pipeline. It is raised before any
/// tree exists, so a caller never sees a partially built tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed input: {reason} at byte {position}")]
pub struct MalformedInput {
    /// What was wrong.
    pub reason: MalformedReason,
    /// Byte offset of the `<` that opened the offending construct.
    pub position: usize,
}

impl MalformedInput {
    /// Create an error for `reason` at byte offset `position`.
    #[must_use]
    pub const fn new(reason: MalformedReason, position: usize) -> Self {
        Self { reason, position }
    }
}

/// The detailed kind of a [`MalformedInput`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// `<!--` without a closing `-->`.
    #[error("unterminated comment")]
    UnterminatedComment,
    /// `<![CDATA[` without a closing `]]>`.
    #[error("unterminated CDATA section")]
    UnterminatedCData,
    /// `<?xml` without a closing `?>`.
    #[error("unterminated XML declaration")]
    UnterminatedDeclaration,
    /// `<?target` without a closing `?>`.
    #[error("unterminated processing instruction")]
    UnterminatedProcessingInstruction,
    /// `<!DOCTYPE` without a closing `>`.
    #[error("unterminated DOCTYPE")]
    UnterminatedDoctype,
    /// A tag (or a quoted attribute value inside one) still open at end of input.
    #[error("unterminated tag")]
    UnterminatedTag,
    /// A raw-text element whose closing tag never appears.
    #[error("unclosed raw-text element <{element}>")]
    UnclosedRawText {
        /// Name of the element, as written in its opening tag.
        element: String,
    },
    /// A leading XML declaration with invalid attributes.
    #[error("invalid XML declaration: {detail}")]
    InvalidDeclaration {
        /// Which rule the declaration broke.
        detail: String,
    },
}
