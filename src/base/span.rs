//! Source text positions and ranges.
//!
//! Columns are counted in characters, not bytes, because that is what the
//! editor sends and what every location handed back to it must use.

use std::fmt;

use text_size::TextSize;
use thiserror::Error;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in characters)
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// A single-line identifier location: `end_col = start_col + name length`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceRange {
    pub line: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl SourceRange {
    pub const fn new(line: u32, start_col: u32, end_col: u32) -> Self {
        Self { line, start_col, end_col }
    }

    /// Range covering `name` when it starts at `start`.
    pub fn for_name(start: LineCol, name: &str) -> Self {
        let len = name.chars().count() as u32;
        Self::new(start.line, start.col, start.col + len)
    }

    pub const fn start(&self) -> LineCol {
        LineCol::new(self.line, self.start_col)
    }

    pub const fn len(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a caret at `pos` touches this range (end inclusive).
    pub fn touches(&self, pos: LineCol) -> bool {
        pos.line == self.line && pos.col >= self.start_col && pos.col <= self.end_col
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line + 1, self.start_col + 1, self.end_col + 1)
    }
}

/// A requested line or column lies outside the source text.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("position {line}:{column} is outside the source text")]
pub struct OutOfBounds {
    pub line: u32,
    pub column: u32,
}

/// Get the text of one line, without its terminator.
pub fn line_text(source: &str, line: u32) -> Result<&str, OutOfBounds> {
    source
        .lines()
        .nth(line as usize)
        .ok_or(OutOfBounds { line, column: 0 })
}

/// Index for converting byte offsets (as produced by the lexer) into
/// character-based line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset into `text` to a line/column position.
    ///
    /// `text` must be the string this index was built from.
    pub fn line_col(&self, text: &str, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = usize::from(self.line_starts[line]);
        let end = usize::from(offset).min(text.len());
        let col = text
            .get(line_start..end)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);

        LineCol::new(line as u32, col as u32)
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}
