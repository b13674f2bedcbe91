//! Token types for the outline lexer.
//!
//! ## Notes
//! - Literal tokens keep only their span. The outline parser never looks inside literals, it only
//!   needs them out of the way of brace matching.
//! - Keywords are not tokens of their own: whether `class` or `fun` is a keyword is decided by
//!   the parser through `sampledoc_core::lang`, since Kotlin keywords are soft.

use crate::ast::Span;

// ============================================================================
// TOKEN TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword. Kotlin backticked names are stored without the backticks.
    Ident(String),
    /// Any other single non-whitespace character (`{`, `(`, `@`, `=`, ...).
    Punct(char),
    StringLit,
    CharLit,
    Number,
    Newline,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_ident(&self, text: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(name) if name == text)
    }

    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_newline(&self) -> bool {
        self.kind == TokenKind::Newline
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
