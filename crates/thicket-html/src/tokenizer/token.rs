use core::fmt;

use thicket_dom::Attributes;

/// One structural unit produced by the tokenizer.
///
/// Tokens are transient: produced once by the tokenizer, consumed once by the
/// tree builder, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr="value">`, `<ns:name/>`, `<br>`.
    OpenTag {
        /// Local tag name as written.
        name: String,
        /// Namespace prefix before the `:` in the tag name.
        namespace: Option<String>,
        /// Attributes in source order; later duplicates overwrite earlier ones.
        attributes: Attributes,
        /// Set by a trailing `/` or by a name from the self-closing set.
        self_closing: bool,
    },

    /// `</name>`.
    CloseTag {
        /// Local tag name as written.
        name: String,
        /// Namespace prefix before the `:` in the tag name.
        namespace: Option<String>,
    },

    /// Character data between tags, or the verbatim body of a raw-text element.
    Text {
        /// The data. Trimmed unless it is a raw-text body.
        content: String,
    },

    /// `<!-- content -->`.
    Comment {
        /// Trimmed comment body.
        content: String,
    },

    /// `<!DOCTYPE content>`.
    Doctype {
        /// Text after the `DOCTYPE` keyword, trimmed.
        content: String,
    },

    /// `<?xml content?>`.
    XmlDeclaration {
        /// Text between `<?xml` and `?>`, trimmed.
        content: String,
    },

    /// `<![CDATA[content]]>`.
    CData {
        /// Section body, verbatim.
        content: String,
    },

    /// `<?target content?>` for any target other than `xml`.
    ProcessingInstruction {
        /// The instruction target, e.g. `xml-stylesheet`.
        target: String,
        /// Text after the target, trimmed.
        content: String,
    },
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Returns true if this is an open tag that will not take children.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        matches!(
            self,
            Self::OpenTag {
                self_closing: true,
                ..
            }
        )
    }
}

/// Writes `prefix:name` or `name`.
fn write_qualified(f: &mut fmt::Formatter<'_>, namespace: Option<&str>, name: &str) -> fmt::Result {
    match namespace {
        Some(prefix) => write!(f, "{prefix}:{name}"),
        None => write!(f, "{name}"),
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTag {
                name,
                namespace,
                attributes,
                self_closing,
            } => {
                write!(f, "<")?;
                write_qualified(f, namespace.as_deref(), name)?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::CloseTag { name, namespace } => {
                write!(f, "</")?;
                write_qualified(f, namespace.as_deref(), name)?;
                write!(f, ">")
            }
            Self::Text { content } => write!(f, "Text({content:?})"),
            Self::Comment { content } => write!(f, "<!--{content}-->"),
            Self::Doctype { content } => write!(f, "<!DOCTYPE {content}>"),
            Self::XmlDeclaration { content } => write!(f, "<?xml {content}?>"),
            Self::CData { content } => write!(f, "<![CDATA[{content}]]>"),
            Self::ProcessingInstruction { target, content } => {
                write!(f, "<?{target} {content}?>")
            }
        }
    }
}
