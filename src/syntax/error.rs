//! Syntax error types.

use thiserror::Error;

use crate::base::LineCol;

/// A lexical or structural error in one module's source text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("{at}: unrecognised input")]
    Lex { at: LineCol },

    #[error("{at}: unexpected `{found}`, expected {expected}")]
    UnexpectedToken {
        at: LineCol,
        found: String,
        expected: &'static str,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("{at}: unmatched `}}`")]
    UnmatchedBrace { at: LineCol },

    #[error("{at}: `{{` is never closed")]
    UnclosedBrace { at: LineCol },
}
