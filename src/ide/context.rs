//! Check that a reported location still holds the expected identifier.

use crate::base::{LineCol, SourceRange, line_text};

/// Whether the text starting at `at` is exactly `expected`.
///
/// Columns count characters. A position outside the text is a mismatch.
pub fn verify_location(source: &str, at: LineCol, expected: &str) -> bool {
    let Ok(text) = line_text(source, at.line) else {
        return false;
    };
    let col = at.col as usize;
    if col > text.chars().count() {
        return false;
    }
    let mut found = text.chars().skip(col);
    expected.chars().all(|c| found.next() == Some(c))
}

/// Like [`verify_location`], also requiring the range to span exactly
/// `expected`.
pub fn verify_range(source: &str, range: SourceRange, expected: &str) -> bool {
    range.len() as usize == expected.chars().count() && verify_location(source, range.start(), expected)
}
