//! # rootgen Content Comparison
//!
//! File: cli/src/core/diff.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! Decides whether proposed content differs from what is on disk. Line endings
//! are normalized first so a checkout with CRLF endings does not get rewritten
//! (and reported) on every run.
//!
use std::borrow::Cow;

/// Returns `true` when `a` and `b` differ after line-ending normalization.
///
/// Absent and empty inputs are treated alike: two of them are equal, and one
/// of them against real content is a difference.
pub fn differs(a: Option<&str>, b: Option<&str>) -> bool {
    let a = a.filter(|s| !s.is_empty());
    let b = b.filter(|s| !s.is_empty());

    match (a, b) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(a), Some(b)) => normalize_line_endings(a) != normalize_line_endings(b),
    }
}

/// Converts `\r\n` and bare `\r` to `\n`. Borrows when there is nothing to do.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}
