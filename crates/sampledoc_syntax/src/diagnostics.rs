//! Syntax diagnostics for sample sources.
//!
//! Every error carries the span it was detected at and renders with source context through
//! `miette`.
//!
//! ## Examples
//! ```rust
//! use sampledoc_core::LanguageId;
//! use sampledoc_syntax::parser;
//!
//! let source = "class BrokenSample {\n";
//! let errors = parser::parse(LanguageId::Java, source).unwrap_err();
//! let report = errors[0].to_report("BrokenSample.java", source);
//! assert!(report.to_string().contains("unclosed"));
//! ```

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// Category of a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnterminatedString,
    UnterminatedChar,
    UnterminatedComment,
    UnterminatedIdentifier,
    UnexpectedClosingBrace,
    UnclosedBrace,
    MissingName,
    InvalidPackage,
}

impl SyntaxErrorKind {
    fn help(self) -> Option<&'static str> {
        match self {
            SyntaxErrorKind::UnclosedBrace => Some("add the missing `}`"),
            SyntaxErrorKind::UnexpectedClosingBrace => Some("remove the extra `}` or add the matching `{`"),
            SyntaxErrorKind::UnterminatedComment => Some("close the comment with `*/`"),
            SyntaxErrorKind::InvalidPackage => Some("package names are dot-separated identifiers"),
            _ => None,
        }
    }
}

/// A syntax error found while lexing or parsing a sample source.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sampledoc::syntax))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub span: Span,
    #[label("here")]
    location: SourceSpan,
    #[help]
    help: Option<String>,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            location: (span.start, span.len()).into(),
            help: kind.help().map(str::to_string),
        }
    }

    /// 1-based line and column of the error start.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        line_col(source, self.span.start)
    }

    /// Attach the source text so the error renders with context.
    pub fn to_report(&self, name: &str, source: &str) -> Report {
        Report::new(self.clone()).with_source_code(NamedSource::new(name, source.to_string()))
    }
}

/// 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.chars().count(), |nl| before[nl + 1..].chars().count()) + 1;
    (line, column)
}

/// One-line rendering used in logs: `line:col: message`.
pub fn format_errors(source: &str, errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(|e| {
            let (line, col) = e.line_col(source);
            format!("{line}:{col}: {}", e.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
