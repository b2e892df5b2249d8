//! Module compilation faults.

use std::io;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::SourceRange;
use crate::syntax::SyntaxError;

/// A module could not be compiled into a symbol table.
#[derive(Debug, Error)]
pub enum ParseFault {
    #[error("{}: {source}", .path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    #[error("{}:{range}: `{name}` is already defined", .path.display())]
    DuplicateSymbol {
        path: PathBuf,
        name: SmolStr,
        range: SourceRange,
    },

    #[error("{}:{range}: cannot find module `{package}`", .path.display())]
    ModuleNotFound {
        path: PathBuf,
        package: String,
        range: SourceRange,
    },

    #[error("{}:{range}: module {} does not define `{name}`", .path.display(), .module.display())]
    SymbolNotFound {
        path: PathBuf,
        module: PathBuf,
        name: SmolStr,
        range: SourceRange,
    },

    #[error("{}: import cycle through {}", .path.display(), .module.display())]
    ImportCycle { path: PathBuf, module: PathBuf },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ParseFault {
    /// The module the fault was raised in.
    pub fn path(&self) -> &Path {
        match self {
            ParseFault::Syntax { path, .. }
            | ParseFault::DuplicateSymbol { path, .. }
            | ParseFault::ModuleNotFound { path, .. }
            | ParseFault::SymbolNotFound { path, .. }
            | ParseFault::ImportCycle { path, .. }
            | ParseFault::Io { path, .. } => path,
        }
    }

    /// Location of the offending token, when there is one.
    pub fn range(&self) -> Option<SourceRange> {
        match self {
            ParseFault::DuplicateSymbol { range, .. }
            | ParseFault::ModuleNotFound { range, .. }
            | ParseFault::SymbolNotFound { range, .. } => Some(*range),
            ParseFault::Syntax { source, .. } => {
                let at = match source {
                    SyntaxError::Lex { at }
                    | SyntaxError::UnexpectedToken { at, .. }
                    | SyntaxError::UnmatchedBrace { at }
                    | SyntaxError::UnclosedBrace { at } => *at,
                    SyntaxError::UnexpectedEof { .. } => return None,
                };
                Some(SourceRange::new(at.line, at.col, at.col + 1))
            }
            ParseFault::ImportCycle { .. } | ParseFault::Io { .. } => None,
        }
    }
}
