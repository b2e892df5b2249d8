//! Syntax for Jolie-style modules: a logos lexer and a top-level parser that
//! extracts imports, declarations and identifier tokens.
//!
//! The parser is shallow: it understands only the parts of a
//! module that matter for symbol resolution; everything inside declaration
//! bodies is seen as a flat token stream.

mod error;
mod lexer;
mod parser;

pub use error::SyntaxError;
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{
    DeclKind, Declaration, Ident, ImportDecl, ImportItem, ModuleSyntax, PackagePath, parse,
};
