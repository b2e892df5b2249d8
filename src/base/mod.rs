//! Foundation types for the inspector.
//!
//! This module provides the primitives every other layer builds on:
//! - [`FileId`] - Request-scoped module file identifiers
//! - [`FileSet`] - Path ↔ FileId mapping plus loaded contents
//! - [`LineCol`], [`LineIndex`] - Byte offset to line/column conversion
//! - [`SourceRange`] - The `(line, start_col, end_col)` triple handed to editors
//!
//! This module has NO dependencies on other inspector modules.

mod file_id;
mod source;
mod span;

pub use file_id::FileId;
pub use source::FileSet;
pub use span::{LineCol, LineIndex, OutOfBounds, SourceRange, line_text};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
