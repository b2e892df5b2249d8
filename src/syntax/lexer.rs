//! Lexer for module source text.

use logos::{FilterResult, Lexer, Logos};
use text_size::{TextRange, TextSize};

use super::SyntaxError;
use crate::base::LineIndex;

/// Token kinds produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    #[token("from")]
    From,
    #[token("import")]
    Import,
    #[token("as")]
    As,
    #[token("type")]
    Type,
    #[token("interface")]
    Interface,
    #[token("service")]
    Service,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9]+)?")]
    Number,
    /// String literal; its contents are never identifiers
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    /// `/* ... */`, never emitted
    #[token("/*", block_comment)]
    BlockComment,
    /// Any other single character (operators, parentheses, colons...)
    #[regex(r#"[^A-Za-z0-9_ \t\r\n\f{},."]"#)]
    Punct,
}

/// Skip to the closing `*/`. An unterminated comment is an error.
fn block_comment(lex: &mut Lexer<'_, TokenKind>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

/// A token with its byte range in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
}

impl Token {
    pub fn text(self, source: &str) -> &str {
        &source[self.range]
    }
}

/// Tokenize a whole module, failing on the first unrecognised input.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );
        match kind {
            Ok(kind) => tokens.push(Token { kind, range }),
            Err(()) => {
                let at = LineIndex::new(source).line_col(source, range.start());
                return Err(SyntaxError::Lex { at });
            }
        }
    }

    Ok(tokens)
}
