//! Validation of a leading XML declaration.
//!
//! Runs before tokenizing. Only a declaration at the very start of the input
//! (after leading whitespace) is checked; everything else is left to the
//! tokenizer.

use super::attributes::{AttributeScanner, RawAttribute};
use crate::error::{MalformedInput, MalformedReason};

/// Check the `<?xml ...?>` declaration the input starts with, if any.
///
/// - `version` is required and must be dotted digits (`1.0`, `1.1`)
/// - `encoding`, if present, must be a quoted, non-empty value
/// - `standalone`, if present, must be exactly `yes` or `no`
/// - a doubled `?` (`<??xml`, `??>`) is rejected
///
/// # Errors
///
/// Returns [`MalformedInput`] positioned at the declaration's `<` when a rule
/// is broken or the declaration has no closing `?>`.
pub fn validate_declaration(input: &str) -> Result<(), MalformedInput> {
    let trimmed = input.trim_start();
    let position = input.len() - trimmed.len();
    let invalid = |detail: &str| {
        Err(MalformedInput::new(
            MalformedReason::InvalidDeclaration {
                detail: detail.to_string(),
            },
            position,
        ))
    };

    if trimmed.starts_with("<??xml") {
        return invalid("doubled `?` in `<??xml`");
    }
    let Some(rest) = trimmed.strip_prefix("<?xml") else {
        return Ok(());
    };
    // `<?xml-stylesheet ...?>` is a processing instruction, not a declaration.
    if rest
        .chars()
        .next()
        .is_some_and(|c| !c.is_whitespace() && c != '?')
    {
        return Ok(());
    }

    let Some(end) = rest.find("?>") else {
        return Err(MalformedInput::new(
            MalformedReason::UnterminatedDeclaration,
            position,
        ));
    };
    let body = &rest[..end];
    if body.ends_with('?') {
        return invalid("doubled `?` in `??>`");
    }

    let attributes: Vec<RawAttribute<'_>> = AttributeScanner::new(body).collect();
    let find = |name: &str| attributes.iter().rev().find(|attr| attr.name == name);

    match find("version") {
        None => return invalid("missing `version`"),
        Some(version) if !is_version_number(version.value) => {
            return invalid(&format!("`version` must be dotted digits, got `{}`", version.value));
        }
        Some(_) => {}
    }

    if let Some(encoding) = find("encoding")
        && (encoding.quote.is_none() || encoding.value.trim().is_empty())
    {
        return invalid("`encoding` must be a quoted, non-empty value");
    }

    if let Some(standalone) = find("standalone")
        && !matches!(standalone.value, "yes" | "no")
    {
        return invalid(&format!(
            "`standalone` must be `yes` or `no`, got `{}`",
            standalone.value
        ));
    }

    Ok(())
}

/// `1`, `1.0`, `1.10.2`: one or more runs of ASCII digits joined by dots.
fn is_version_number(value: &str) -> bool {
    !value.is_empty()
        && value
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
