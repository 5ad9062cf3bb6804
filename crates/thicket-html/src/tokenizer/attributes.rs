//! Attribute string scanning.
//!
//! The attribute string is what follows the tag name inside `<...>`. A name
//! starts with an ASCII letter or `_`, continues with letters, digits, `_` and
//! `-`, and may contain one embedded `:` (`xlink:href`). It is optionally
//! followed by `=` and a double-quoted, single-quoted or unquoted value.
//! Characters that cannot start a name are skipped.

use thicket_dom::Attributes;

/// One attribute as it appears in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    /// Attribute name.
    pub name: &'a str,
    /// Value without its quotes; empty for boolean attributes.
    pub value: &'a str,
    /// The quote character around the value, if it was quoted.
    pub quote: Option<char>,
}

/// Iterator over the attributes of an attribute string, in source order.
///
/// Duplicates are yielded as they appear; [`parse_attributes`] resolves them.
#[derive(Debug, Clone)]
pub struct AttributeScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> AttributeScanner<'a> {
    /// Scan `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            let _ = self.bump();
        }
    }

    fn skip_name_chars(&mut self) {
        while self.peek().is_some_and(is_name_char) {
            let _ = self.bump();
        }
    }

    fn scan_name(&mut self) -> &'a str {
        let start = self.pos;
        self.skip_name_chars();
        let rest = &self.input[self.pos..];
        if rest.starts_with(':') && rest[1..].chars().next().is_some_and(is_name_char) {
            self.pos += 1;
            self.skip_name_chars();
        }
        &self.input[start..self.pos]
    }

    fn scan_value(&mut self) -> (&'a str, Option<char>) {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                // An unmatched quote runs to the end of the string.
                let end = closing_quote(&self.input[start..], quote)
                    .map_or(self.input.len(), |offset| start + offset);
                self.pos = (end + 1).min(self.input.len());
                (&self.input[start..end], Some(quote))
            }
            Some(_) => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| !c.is_whitespace() && c != '>')
                {
                    let _ = self.bump();
                }
                (&self.input[start..self.pos], None)
            }
            None => ("", None),
        }
    }
}

impl<'a> Iterator for AttributeScanner<'a> {
    type Item = RawAttribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_whitespace();
            let c = self.peek()?;
            if is_name_start(c) {
                break;
            }
            let _ = self.bump();
        }

        let name = self.scan_name();
        let after_name = self.pos;
        self.skip_whitespace();
        if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_whitespace();
            let (value, quote) = self.scan_value();
            return Some(RawAttribute { name, value, quote });
        }

        self.pos = after_name;
        Some(RawAttribute {
            name,
            value: "",
            quote: None,
        })
    }
}

/// Offset of the first `quote` in `value` not preceded by a backslash, the
/// same rule the tokenizer's quote state uses to find the end of a value.
fn closing_quote(value: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (offset, c) in value.char_indices() {
        if c == quote && !escaped {
            return Some(offset);
        }
        escaped = c == '\\';
    }
    None
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Parse an attribute string into a map; later duplicates overwrite earlier
/// ones.
#[must_use]
pub fn parse_attributes(input: &str) -> Attributes {
    AttributeScanner::new(input)
        .map(|raw| (raw.name, raw.value))
        .collect()
}
