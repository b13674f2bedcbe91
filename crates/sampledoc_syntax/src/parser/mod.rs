//! Outline parser for Java and Kotlin sample sources.
//!
//! The parser walks the token stream once and recognises declarations only:
//! - `package` declaration (imports are skipped)
//! - class-like declarations (`class`, `interface`, `enum`, `record`, `object`), with nesting
//! - functions: Java methods by shape (`Type name(...)`), Kotlin functions by `fun`
//!
//! Function bodies are matched brace-for-brace and kept as text. Anything else (fields,
//! properties, initializer blocks, enum constants) is skipped statement by statement.
//!
//! ## Module Structure
//!
//! - `decl` - member, class and function declarations
//! - `tests` - parser unit tests

mod decl;
#[cfg(test)]
mod tests;

use sampledoc_core::LanguageId;

use crate::ast::{SourceOutline, Span, Spanned};
use crate::diagnostics::{SyntaxError, SyntaxErrorKind};
use crate::lexer::{self, Token, TokenKind};
use crate::text::trim_indent;

/// Lex and parse `source` into a [`SourceOutline`].
///
/// ## Errors
/// Returns every lexical and structural error found (unterminated literals, unbalanced braces,
/// declarations without a name).
pub fn parse(language: LanguageId, source: &str) -> Result<SourceOutline, Vec<SyntaxError>> {
    let tokens = lexer::lex(source)?;
    parse_tokens(language, source, &tokens)
}

/// Parse an already lexed token stream.
///
/// ## Parameters
/// - `source`: the text `tokens` were produced from; body text is sliced out of it.
#[tracing::instrument(skip_all, fields(language = %language, token_count = tokens.len()))]
pub fn parse_tokens(language: LanguageId, source: &str, tokens: &[Token]) -> Result<SourceOutline, Vec<SyntaxError>> {
    Parser::new(language, source, tokens).parse()
}

/// Parser state.
pub(crate) struct Parser<'a> {
    language: LanguageId,
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
    eof: Token,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(language: LanguageId, source: &'a str, tokens: &'a [Token]) -> Self {
        let end = source.len();
        Self {
            language,
            source,
            tokens,
            pos: 0,
            errors: Vec::new(),
            eof: Token::new(TokenKind::Eof, Span::new(end, end)),
        }
    }

    pub(crate) fn parse(mut self) -> Result<SourceOutline, Vec<SyntaxError>> {
        let mut outline = SourceOutline {
            language: self.language,
            package: None,
            classes: Vec::new(),
            functions: Vec::new(),
        };

        loop {
            self.skip_separators();
            let tok = self.peek().clone();
            if tok.is_eof() {
                break;
            }
            if tok.is_ident("package") && outline.package.is_none() && outline.classes.is_empty() {
                outline.package = self.package_decl();
                continue;
            }
            if tok.is_ident("import") {
                self.skip_statement(true);
                continue;
            }
            if tok.is_punct('}') {
                self.error(SyntaxErrorKind::UnexpectedClosingBrace, "unexpected `}`", tok.span);
                self.advance();
                continue;
            }
            if self.at_file_annotation() {
                self.annotation();
                continue;
            }
            match self.member(None) {
                decl::Member::Class(class) => outline.classes.push(class),
                decl::Member::Function(function) => outline.functions.push(function),
                decl::Member::Other => {}
            }
        }

        if self.errors.is_empty() {
            Ok(outline)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !tok.is_eof() {
            self.pos += 1;
        }
        tok
    }

    fn at_eof(&self) -> bool {
        self.peek().is_eof()
    }

    fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// First token at or after the cursor that is not a newline.
    fn next_significant(&self) -> &Token {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|t| !t.is_newline())
            .unwrap_or(&self.eof)
    }

    fn skip_newlines(&mut self) {
        while self.peek().is_newline() {
            self.advance();
        }
    }

    fn skip_separators(&mut self) {
        while self.peek().is_newline() || self.peek().is_punct(';') || self.peek().is_punct(',') {
            self.advance();
        }
    }

    fn error(&mut self, kind: SyntaxErrorKind, message: &str, span: Span) {
        self.errors.push(SyntaxError::new(kind, message, span));
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Skip a balanced `(...)` or `[...]` group starting at the cursor.
    fn skip_group(&mut self) {
        let (open, close) = match self.peek().kind {
            TokenKind::Punct('(') => ('(', ')'),
            TokenKind::Punct('[') => ('[', ']'),
            _ => return,
        };
        self.advance();
        let mut depth = 1usize;
        while depth > 0 && !self.at_eof() {
            let tok = self.advance();
            if tok.is_punct(open) {
                depth += 1;
            } else if tok.is_punct(close) {
                depth -= 1;
            }
        }
    }

    /// Skip a generic parameter list `<...>`, including nested ones and `->` inside function types.
    fn skip_angles(&mut self) {
        self.advance();
        let mut depth = 1usize;
        while depth > 0 && !self.at_eof() {
            let tok = self.advance();
            if tok.is_punct('-') && self.peek().is_punct('>') {
                self.advance();
            } else if tok.is_punct('<') {
                depth += 1;
            } else if tok.is_punct('>') {
                depth -= 1;
            } else if tok.is_punct('{') || tok.is_punct(';') {
                // Not a generic list after all (comparison operator).
                self.pos -= 1;
                return;
            }
        }
    }

    /// Index of the `}` matching the `{` at the cursor, if any.
    fn matching_brace(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (i, tok) in self.tokens.iter().enumerate().skip(self.pos) {
            if tok.is_punct('{') {
                depth += 1;
            } else if tok.is_punct('}') {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Consume a `{ ... }` block and return the text between the braces with its common
    /// indentation removed. Reports an error and moves to end of input when unclosed.
    fn block_body(&mut self) -> Option<String> {
        let open = self.peek().clone();
        match self.matching_brace() {
            Some(close) => {
                let close_span = self.tokens[close].span;
                self.pos = close + 1;
                Some(trim_indent(&self.source[open.span.end..close_span.start]))
            }
            None => {
                self.error(SyntaxErrorKind::UnclosedBrace, "unclosed `{`", open.span);
                self.pos = self.tokens.len();
                None
            }
        }
    }

    fn skip_block(&mut self) {
        self.block_body();
    }

    /// Whether a newline at the cursor continues the current expression instead of ending it.
    fn newline_continues(&self) -> bool {
        let continues_after = matches!(
            self.previous().map(|t| &t.kind),
            Some(TokenKind::Punct('.' | ',' | '(' | '[' | '=' | '+' | '-' | '*' | '/' | '%' | '&' | '|'))
        );
        let next = self.next_significant();
        let continues_before =
            matches!(next.kind, TokenKind::Punct('.' | '?' | '&' | '|')) || next.is_ident("else");
        continues_after || continues_before
    }

    /// Skip one statement: up to `;` (consumed), a terminating newline, or the `}` closing the
    /// enclosing body (not consumed). Nested groups and blocks are skipped whole.
    fn skip_statement(&mut self, newline_terminates: bool) {
        let mut depth = 0usize;
        let mut consumed = false;
        loop {
            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::Eof => return,
                TokenKind::Punct(';') if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::Newline if depth == 0 && newline_terminates && consumed && !self.newline_continues() => {
                    return;
                }
                TokenKind::Punct('}') if depth == 0 => return,
                TokenKind::Punct('{') => {
                    self.skip_block();
                    consumed = true;
                    continue;
                }
                TokenKind::Punct('(' | '[') => depth += 1,
                TokenKind::Punct(')' | ']') => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
            consumed = true;
        }
    }

    // ========================================================================
    // Package and annotations
    // ========================================================================

    fn package_decl(&mut self) -> Option<Spanned<String>> {
        let keyword = self.advance();
        let mut segments = Vec::new();
        let mut span: Option<Span> = None;
        while let Some(name) = self.peek().ident().map(str::to_string) {
            let tok = self.advance();
            span = Some(span.map_or(tok.span, |s| s.merge(tok.span)));
            segments.push(name);
            if self.peek().is_punct('.') {
                self.advance();
            } else {
                break;
            }
        }
        let Some(span) = span else {
            self.error(SyntaxErrorKind::InvalidPackage, "expected a package name", keyword.span);
            self.skip_statement(true);
            return None;
        };
        if self.peek().is_punct(';') {
            self.advance();
        }
        Some(Spanned::new(segments.join("."), span))
    }

    /// `@file:...` annotation before the package declaration (Kotlin).
    fn at_file_annotation(&self) -> bool {
        self.peek().is_punct('@') && self.peek_at(1).is_ident("file") && self.peek_at(2).is_punct(':')
    }

    /// Parse `@Name`, `@a.b.Name(args)` or `@target:Name`, returning the (possibly qualified) name.
    fn annotation(&mut self) -> Option<String> {
        self.advance();
        let mut name = self.peek().ident()?.to_string();
        self.advance();
        if self.peek().is_punct(':') {
            self.advance();
            if self.peek().is_punct('[') {
                self.skip_group();
                return Some(name);
            }
            name = self.peek().ident()?.to_string();
            self.advance();
        }
        while self.peek().is_punct('.') && self.peek_at(1).ident().is_some() {
            self.advance();
            if let Some(segment) = self.advance().ident() {
                name.push('.');
                name.push_str(segment);
            }
        }
        if self.peek().is_punct('(') {
            self.skip_group();
        }
        Some(name)
    }
}
