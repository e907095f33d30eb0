//! Argument text helpers shared by every flag grammar.
//!
//! Argument text is split on `|`. Keywords are matched case-insensitively;
//! text captured after a keyword keeps its original case.

use super::FlagKind;
use crate::error::FlagError;

/// Non-empty, trimmed `|`-separated segments.
pub(crate) fn segments(value: &str) -> impl Iterator<Item = &str> {
    value.split('|').map(str::trim).filter(|s| !s.is_empty())
}

/// Returns the trimmed remainder if `segment` starts with `keyword` as a whole word.
pub(crate) fn keyword<'v>(segment: &'v str, keyword: &str) -> Option<&'v str> {
    let len = keyword.len();
    if segment.len() < len
        || !segment.is_char_boundary(len)
        || !segment[..len].eq_ignore_ascii_case(keyword)
    {
        return None;
    }
    let rest = &segment[len..];
    match rest.chars().next() {
        None => Some(""),
        Some(c) if c.is_whitespace() => Some(rest.trim()),
        Some(_) => None,
    }
}

/// Rejects absent or blank argument text.
pub(crate) fn required(kind: FlagKind, value: Option<&str>) -> Result<&str, FlagError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(FlagError::ValueRequired(kind)),
    }
}

pub(crate) fn unknown_argument(kind: FlagKind, segment: &str) -> String {
    format!("Flag {kind} has unknown argument: {segment}")
}
