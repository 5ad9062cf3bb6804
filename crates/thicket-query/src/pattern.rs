//! Query pattern parsing.
//!
//! A pattern string is parsed once into a [`Query`] value and then evaluated
//! by structured recursion (see `evaluate`). Parsing never fails: anything
//! that is not one of the recognised forms is a bare tag-name search, and an
//! unrecognised predicate passes its base results through.

use thicket_common::warning::warn_once;

/// A parsed query pattern.
///
/// Forms are recognised on the trimmed pattern in this order:
///
/// | Pattern          | Variant                        |
/// |------------------|--------------------------------|
/// | `base[pred]`     | [`Query::Filtered`]            |
/// | `//name`         | [`Query::Descendants`]         |
/// | `/a/b/c`         | [`Query::Path`]                |
/// | `@attr`          | [`Query::HasAttribute`]        |
/// | `.class`         | [`Query::Class`]               |
/// | `#id`            | [`Query::Id`]                  |
/// | `name`           | [`Query::Descendants`]         |
///
/// The predicate form comes first so that `//p[2]` and `/a/b[1]` filter the
/// result of `//p` and `/a/b` rather than searching for a tag literally named
/// `p[2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Pre-order search of the receiver's subtree, receiver included, for
    /// elements with this tag name.
    Descendants(String),

    /// Child-name steps from the receiver. Empty segments are already dropped.
    ///
    /// Example: `/html/body/p` is `Path(["html", "body", "p"])`
    Path(Vec<String>),

    /// Elements carrying this attribute, with any value.
    HasAttribute(String),

    /// Elements whose `class` attribute contains this exact token.
    Class(String),

    /// The first element, in pre-order, whose `id` equals this value.
    Id(String),

    /// A base query narrowed by a bracketed predicate.
    ///
    /// Example: `//div[@class="a b"][1]` nests two `Filtered` levels.
    Filtered {
        /// The query whose ordered results are filtered.
        base: Box<Query>,
        /// How the base results are narrowed.
        predicate: Predicate,
    },
}

/// The part of a pattern inside its final `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// 1-indexed position in the base results: `[2]` or `[position()=2]`.
    Position(usize),

    /// `[@name="value"]` or `[@name='value']`: exact attribute value.
    AttributeEquals {
        /// Attribute name.
        name: String,
        /// Required value.
        value: String,
    },

    /// `[@name]`: the attribute is present.
    HasAttribute(String),

    /// Anything else. The base results pass through unchanged.
    Unrecognized(String),
}

impl Query {
    /// Parse a pattern.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim();

        if let Some((base, predicate)) = split_predicate(pattern) {
            return Self::Filtered {
                base: Box::new(Self::parse(base)),
                predicate: Predicate::parse(predicate),
            };
        }

        if let Some(name) = pattern.strip_prefix("//") {
            return Self::Descendants(name.to_string());
        }
        if let Some(path) = pattern.strip_prefix('/') {
            let segments = path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect();
            return Self::Path(segments);
        }
        if let Some(attr) = pattern.strip_prefix('@') {
            return Self::HasAttribute(attr.to_string());
        }
        if let Some(class) = pattern.strip_prefix('.') {
            return Self::Class(class.to_string());
        }
        if let Some(id) = pattern.strip_prefix('#') {
            return Self::Id(id.to_string());
        }
        Self::Descendants(pattern.to_string())
    }
}

impl From<&str> for Query {
    fn from(pattern: &str) -> Self {
        Self::parse(pattern)
    }
}

impl Predicate {
    /// Parse the text between the brackets.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Some(position) = parse_position(raw) {
            return Self::Position(position);
        }

        if let Some(attr) = raw.strip_prefix('@') {
            match attr.split_once('=') {
                Some((name, value)) => {
                    let name = name.trim();
                    if let Some(value) = unquote(value.trim())
                        && is_attribute_name(name)
                    {
                        return Self::AttributeEquals {
                            name: name.to_string(),
                            value: value.to_string(),
                        };
                    }
                }
                None if is_attribute_name(attr) => return Self::HasAttribute(attr.to_string()),
                None => {}
            }
        }

        warn_once(
            "Query",
            &format!("unrecognised predicate [{raw}], results are not filtered"),
        );
        Self::Unrecognized(raw.to_string())
    }
}

/// Split `base[predicate]` at the `[` matching the final `]`.
///
/// Returns `None` unless the pattern ends with `]` and that bracket has a
/// matching `[`. Brackets nested inside the predicate are balanced, and
/// brackets inside `"` or `'` quoted values are not brackets at all.
fn split_predicate(pattern: &str) -> Option<(&str, &str)> {
    let inner = pattern.strip_suffix(']')?;
    let mut depth = 0usize;
    let mut quote = None;
    for (index, c) in inner.char_indices().rev() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            ']' => depth += 1,
            '[' if depth == 0 => return Some((&inner[..index], &inner[index + 1..])),
            '[' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// `n` or `position()=n`. A number too large for `usize` is still a
/// position, just one that is always out of range.
fn parse_position(raw: &str) -> Option<usize> {
    let digits = match raw.strip_prefix("position()") {
        Some(rest) => rest.trim_start().strip_prefix('=')?.trim_start(),
        None => raw,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(usize::MAX))
}

/// Strip one pair of matching `"` or `'` quotes.
fn unquote(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '[' | ']'))
}
