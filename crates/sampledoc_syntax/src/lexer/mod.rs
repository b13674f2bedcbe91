//! Lexer for the Java/Kotlin subset sample sources use.
//!
//! Handles tokenization including:
//! - Identifiers, including Kotlin backticked names
//! - String literals (`"..."`, `"""..."""` text blocks, Kotlin `${...}` templates)
//! - Character and numeric literals
//! - Line, block and doc comments, which are dropped
//! - Newlines, which Kotlin uses as statement terminators
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::{SyntaxError, SyntaxErrorKind};

/// Lexer state over one source file.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token. Consecutive newlines collapse into one
    /// `Newline` token.
    ///
    /// ## Errors
    /// Returns every unterminated literal or comment found.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        while self.peek().is_some() {
            self.scan_token();
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.current_pos, self.current_pos)));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        Some(c)
    }

    fn starts_with(&self, text: &str) -> bool {
        self.source[self.current_pos..].starts_with(text)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn error(&mut self, kind: SyntaxErrorKind, message: &str, start: usize) {
        self.errors
            .push(SyntaxError::new(kind, message, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '\n' => {
                if !matches!(self.tokens.last(), Some(t) if t.is_newline()) {
                    self.push(TokenKind::Newline, start);
                }
            }
            c if c.is_whitespace() => {}
            '/' if self.peek() == Some('/') => self.skip_line_comment(),
            '/' if self.peek() == Some('*') => self.skip_block_comment(start),
            '"' => self.scan_string(start),
            '\'' => self.scan_char(start),
            '`' => self.scan_backticked(start),
            c if c.is_ascii_digit() => self.scan_number(start),
            c if is_ident_start(c) => self.scan_identifier(start),
            other => self.push(TokenKind::Punct(other), start),
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Block comments nest in Kotlin but not in Java; sample sources never rely on either, so
    /// the first `*/` closes the comment.
    fn skip_block_comment(&mut self, start: usize) {
        self.advance();
        loop {
            if self.starts_with("*/") {
                self.advance();
                self.advance();
                return;
            }
            if self.advance().is_none() {
                self.error(SyntaxErrorKind::UnterminatedComment, "unterminated block comment", start);
                return;
            }
        }
    }

    fn scan_string(&mut self, start: usize) {
        if self.starts_with("\"\"") {
            self.advance();
            self.advance();
            self.scan_text_block(start);
            return;
        }
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => {
                    self.advance();
                }
                Some('$') if self.peek() == Some('{') => self.skip_template(),
                Some('\n') | None => {
                    self.error(SyntaxErrorKind::UnterminatedString, "unterminated string literal", start);
                    return;
                }
                Some(_) => {}
            }
        }
        self.push(TokenKind::StringLit, start);
    }

    /// `"""` text block (Java) or raw string (Kotlin).
    fn scan_text_block(&mut self, start: usize) {
        loop {
            if self.starts_with("\"\"\"") {
                self.advance();
                self.advance();
                self.advance();
                // Kotlin allows extra quotes right before the closing delimiter.
                while self.peek() == Some('"') {
                    self.advance();
                }
                self.push(TokenKind::StringLit, start);
                return;
            }
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('$') if self.peek() == Some('{') => self.skip_template(),
                Some(_) => {}
                None => {
                    self.error(SyntaxErrorKind::UnterminatedString, "unterminated text block", start);
                    return;
                }
            }
        }
    }

    /// Skip a `${...}` template expression, balancing braces.
    fn skip_template(&mut self) {
        self.advance();
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                Some('{') => depth += 1,
                Some('}') => depth -= 1,
                Some('"') => {
                    // Nested string inside the template: skip to its end.
                    while let Some(c) = self.advance() {
                        if c == '\\' {
                            self.advance();
                        } else if c == '"' {
                            break;
                        }
                    }
                }
                Some(_) => {}
                None => return,
            }
        }
    }

    fn scan_char(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('\'') => break,
                Some('\\') => {
                    self.advance();
                }
                Some('\n') | None => {
                    self.error(SyntaxErrorKind::UnterminatedChar, "unterminated character literal", start);
                    return;
                }
                Some(_) => {}
            }
        }
        self.push(TokenKind::CharLit, start);
    }

    fn scan_backticked(&mut self, start: usize) {
        let mut name = String::new();
        loop {
            match self.advance() {
                Some('`') => break,
                Some('\n') | None => {
                    self.error(SyntaxErrorKind::UnterminatedIdentifier, "unterminated backticked name", start);
                    return;
                }
                Some(c) => name.push(c),
            }
        }
        self.push(TokenKind::Ident(name), start);
    }

    fn scan_number(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            // `1..10` is a range, not a decimal point.
            if c == '.' && self.peek_next() == Some('.') {
                break;
            }
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.advance();
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, start);
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        let name = self.source[start..self.current_pos].to_string();
        self.push(TokenKind::Ident(name), start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Convenience function to lex a source string.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Ident(name.to_string())
    }

    #[test]
    fn test_comments_are_dropped() {
        let source = "// leading\n/** doc { */ class /* { */ A";
        assert_eq!(
            kinds(source),
            vec![TokenKind::Newline, ident("class"), ident("A"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_braces_inside_literals_are_not_punctuation() {
        let source = r#"val s = "{ ${name.let { "}" }} }"; val c = '{'"#;
        let braces = kinds(source)
            .into_iter()
            .filter(|k| matches!(k, TokenKind::Punct('{') | TokenKind::Punct('}')))
            .count();
        assert_eq!(braces, 0);
    }

    #[test]
    fn test_text_block() {
        let source = "String s = \"\"\"\n  {\n  \"\"\";";
        assert_eq!(
            kinds(source),
            vec![
                ident("String"),
                ident("s"),
                TokenKind::Punct('='),
                TokenKind::StringLit,
                TokenKind::Punct(';'),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_backticked_identifier() {
        assert_eq!(
            kinds("fun `greets by name`()"),
            vec![
                ident("fun"),
                ident("greets by name"),
                TokenKind::Punct('('),
                TokenKind::Punct(')'),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_range_after_number() {
        assert_eq!(
            kinds("1..9"),
            vec![
                TokenKind::Number,
                TokenKind::Punct('.'),
                TokenKind::Punct('.'),
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_newlines_collapse() {
        assert_eq!(
            kinds("a\n\n\nb"),
            vec![ident("a"), TokenKind::Newline, ident("b"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string_reports_span() {
        let errors = lex("x = \"abc\ny").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnterminatedString);
        assert_eq!(errors[0].span.start, 4);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let errors = lex("class A { /* never closed").unwrap_err();
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnterminatedComment);
    }
}
