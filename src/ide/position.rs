//! Caret position → identifier.

use std::fs;
use std::path::Path;

use smol_str::SmolStr;
use tracing::debug;

use crate::base::{LineCol, OutOfBounds, SourceRange, line_text};

/// The word found at a caret position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordAt {
    /// Possibly empty
    pub text: SmolStr,
    pub range: SourceRange,
}

impl WordAt {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Letters, digits and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The run of word characters containing `column`, or ending right before
/// it, or starting at it.
///
/// `column` counts characters. A column one past the end of the line is
/// valid (a caret after the last character); anything further, or a line
/// that does not exist, is [`OutOfBounds`].
pub fn word_at(source: &str, line: u32, column: u32) -> Result<WordAt, OutOfBounds> {
    let text = line_text(source, line).map_err(|_| OutOfBounds { line, column })?;
    let chars: Vec<char> = text.chars().collect();
    let col = column as usize;
    if col > chars.len() {
        return Err(OutOfBounds { line, column });
    }

    let mut start = col;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = col;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    Ok(WordAt {
        text: chars[start..end].iter().copied().collect(),
        range: SourceRange::new(line, start as u32, end as u32),
    })
}

/// The identifier under the caret, or the empty string when there is none.
///
/// The file is read when `source` is `None`. Unreadable files and positions
/// outside the text also yield the empty string.
pub fn resolve_word(file: &Path, source: Option<&str>, line: u32, column: u32) -> SmolStr {
    let owned;
    let source = match source {
        Some(text) => text,
        None => match fs::read_to_string(file) {
            Ok(text) => {
                owned = text;
                &owned
            }
            Err(err) => {
                debug!(file = %file.display(), error = %err, "cannot read file");
                return SmolStr::default();
            }
        },
    };

    match word_at(source, line, column) {
        Ok(word) => word.text,
        Err(err) => {
            debug!(file = %file.display(), pos = %LineCol::new(line, column), "{err}");
            SmolStr::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SOURCE: &str = "type Shape: void\n\nservice Main { x: Shape_2 }";

    #[rstest]
    #[case(0, 5, "Shape")]
    #[case(0, 7, "Shape")]
    // caret right after the word
    #[case(0, 10, "Shape")]
    #[case(0, 0, "type")]
    #[case(2, 18, "Shape_2")]
    #[case(2, 25, "Shape_2")]
    // empty line and non-word positions
    #[case(1, 0, "")]
    #[case(2, 27, "")]
    fn test_word_at(#[case] line: u32, #[case] column: u32, #[case] expected: &str) {
        assert_eq!(word_at(SOURCE, line, column).unwrap().text, expected);
    }

    #[test]
    fn test_word_at_range() {
        let word = word_at(SOURCE, 2, 20).unwrap();
        assert_eq!(word.range, SourceRange::new(2, 18, 25));
    }

    #[test]
    fn test_word_at_counts_characters() {
        let word = word_at("// é\ntype ñame é_x", 1, 12).unwrap();
        assert_eq!(word.text, "_x");
        assert_eq!(word.range, SourceRange::new(1, 11, 13));
    }

    #[test]
    fn test_word_at_out_of_bounds() {
        assert_eq!(word_at(SOURCE, 3, 4), Err(OutOfBounds { line: 3, column: 4 }));
        assert_eq!(word_at(SOURCE, 0, 17), Err(OutOfBounds { line: 0, column: 17 }));
    }

    #[test]
    fn test_resolve_word_never_fails() {
        let path = Path::new("/nonexistent/main.ol");
        assert_eq!(resolve_word(path, Some(SOURCE), 0, 6), "Shape");
        assert_eq!(resolve_word(path, Some(SOURCE), 9, 0), "");
        assert_eq!(resolve_word(path, None, 0, 0), "");
    }

    #[test]
    fn test_resolve_word_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("main.ol");
        std::fs::write(&path, SOURCE).unwrap();
        assert_eq!(resolve_word(&path, None, 2, 9), "Main");
    }
}
