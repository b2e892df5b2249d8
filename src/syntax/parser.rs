//! Top-level module parser.
//!
//! Recognises, at brace depth 0:
//!
//! ```text
//! from <dots><seg>{.<seg>} import <name> [as <alias>] {, <name> [as <alias>]}
//! type <Name> ...
//! interface <Name> ...
//! service <Name> ...
//! ```
//!
//! Every other identifier token, at any depth, is collected as a candidate
//! reference.

use std::fmt;

use smol_str::SmolStr;

use super::lexer::{Token, TokenKind, tokenize};
use super::SyntaxError;
use crate::base::{LineIndex, SourceRange};

// ============================================================================
// SYNTAX TYPES
// ============================================================================

/// An identifier token with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub text: SmolStr,
    pub range: SourceRange,
}

/// The kind of a top-level declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DeclKind {
    Type,
    Interface,
    Service,
}

impl DeclKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DeclKind::Type => "type",
            DeclKind::Interface => "interface",
            DeclKind::Service => "service",
        }
    }
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: Ident,
}

/// A dotted package path such as `.shapes`, `..lib.geometry` or `console`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackagePath {
    /// Number of leading dots (0 = absolute package)
    pub dots: usize,
    pub segments: Vec<SmolStr>,
}

impl PackagePath {
    /// Parse the textual form used in import statements and completion requests.
    ///
    /// Empty segments after the leading dots are kept so that a partially
    /// typed path like `.shapes.` can still be completed.
    pub fn parse(text: &str) -> Self {
        let dots = text.chars().take_while(|&c| c == '.').count();
        let rest = &text[dots..];
        let segments = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('.').map(SmolStr::new).collect()
        };
        Self { dots, segments }
    }

    pub fn is_relative(&self) -> bool {
        self.dots > 0
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.dots {
            f.write_str(".")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// One `name [as alias]` item of an import statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportItem {
    /// The name as exported by the imported module
    pub name: Ident,
    pub alias: Option<Ident>,
}

impl ImportItem {
    /// The token that introduces the binding in this module.
    pub fn binding(&self) -> &Ident {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

/// A `from ... import ...` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDecl {
    pub package: PackagePath,
    pub items: Vec<ImportItem>,
}

/// Everything symbol resolution needs from one module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleSyntax {
    pub imports: Vec<ImportDecl>,
    pub declarations: Vec<Declaration>,
    /// Identifier tokens in source order. Includes declaration names and
    /// import bindings; excludes package path segments and the source name
    /// of aliased imports.
    pub identifiers: Vec<Ident>,
}

// ============================================================================
// PARSER
// ============================================================================

/// Parse a module's source text.
pub fn parse(source: &str) -> Result<ModuleSyntax, SyntaxError> {
    let tokens = tokenize(source)?;
    Parser::new(source, tokens).run()
}

struct Parser<'src> {
    source: &'src str,
    line_index: LineIndex,
    tokens: Vec<Token>,
    pos: usize,
    /// Positions of currently open braces
    open_braces: Vec<Token>,
    out: ModuleSyntax,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            line_index: LineIndex::new(source),
            tokens,
            pos: 0,
            open_braces: Vec::new(),
            out: ModuleSyntax::default(),
        }
    }

    fn run(mut self) -> Result<ModuleSyntax, SyntaxError> {
        while let Some(token) = self.bump() {
            let top_level = self.open_braces.is_empty();
            match token.kind {
                TokenKind::From if top_level => self.import_decl()?,
                TokenKind::Type if top_level => self.declaration(DeclKind::Type)?,
                TokenKind::Interface if top_level => self.declaration(DeclKind::Interface)?,
                TokenKind::Service if top_level => self.declaration(DeclKind::Service)?,
                TokenKind::Ident => {
                    let ident = self.ident(token);
                    self.out.identifiers.push(ident);
                }
                TokenKind::LBrace => self.open_braces.push(token),
                TokenKind::RBrace => {
                    if self.open_braces.pop().is_none() {
                        return Err(SyntaxError::UnmatchedBrace {
                            at: self.line_col(token),
                        });
                    }
                }
                _ => {}
            }
        }

        if let Some(open) = self.open_braces.first().copied() {
            return Err(SyntaxError::UnclosedBrace {
                at: self.line_col(open),
            });
        }

        Ok(self.out)
    }

    fn import_decl(&mut self) -> Result<(), SyntaxError> {
        let mut package = PackagePath::default();
        while self.peek_kind() == Some(TokenKind::Dot) {
            self.bump();
            package.dots += 1;
        }

        // segments: <ident> { . <ident> }
        loop {
            let segment = self.expect(TokenKind::Ident, "a package name")?;
            package.segments.push(SmolStr::new(segment.text(self.source)));
            if self.peek_kind() == Some(TokenKind::Dot) {
                self.bump();
            } else {
                break;
            }
        }

        self.expect(TokenKind::Import, "`import`")?;

        let mut items = Vec::new();
        loop {
            let name = self.expect(TokenKind::Ident, "a symbol name")?;
            let name = self.ident(name);
            let alias = if self.peek_kind() == Some(TokenKind::As) {
                self.bump();
                let alias = self.expect(TokenKind::Ident, "an alias")?;
                Some(self.ident(alias))
            } else {
                None
            };

            let item = ImportItem { name, alias };
            self.out.identifiers.push(item.binding().clone());
            items.push(item);

            if self.peek_kind() == Some(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }

        self.out.imports.push(ImportDecl { package, items });
        Ok(())
    }

    fn declaration(&mut self, kind: DeclKind) -> Result<(), SyntaxError> {
        let name = self.expect(TokenKind::Ident, "a declaration name")?;
        let name = self.ident(name);
        self.out.identifiers.push(name.clone());
        self.out.declarations.push(Declaration { kind, name });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // token helpers
    // ------------------------------------------------------------------------

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, SyntaxError> {
        match self.bump() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(SyntaxError::UnexpectedToken {
                at: self.line_col(token),
                found: token.text(self.source).to_string(),
                expected,
            }),
            None => Err(SyntaxError::UnexpectedEof { expected }),
        }
    }

    fn line_col(&self, token: Token) -> crate::base::LineCol {
        self.line_index.line_col(self.source, token.range.start())
    }

    fn ident(&self, token: Token) -> Ident {
        let text = token.text(self.source);
        Ident {
            text: SmolStr::new(text),
            range: SourceRange::for_name(self.line_col(token), text),
        }
    }
}
