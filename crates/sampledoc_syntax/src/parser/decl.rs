//! Member, class and function declarations.

use sampledoc_core::LanguageId;
use sampledoc_core::Visibility;
use sampledoc_core::lang::languages;
use sampledoc_core::lang::modifiers;

use super::Parser;
use crate::ast::{ClassDecl, ClassKind, FunctionBody, FunctionDecl, Span};
use crate::diagnostics::SyntaxErrorKind;
use crate::lexer::TokenKind;
use crate::text::trim_indent;

/// What one member position produced.
pub(super) enum Member {
    Class(ClassDecl),
    Function(FunctionDecl),
    Other,
}

/// Annotations and modifiers collected ahead of a declaration.
struct Prefix {
    annotations: Vec<String>,
    modifiers: Vec<String>,
}

impl Prefix {
    fn visibility(&self, language: LanguageId) -> Visibility {
        self.modifiers
            .iter()
            .find_map(|m| modifiers::visibility_from_keyword(language, m))
            .unwrap_or_else(|| modifiers::default_visibility(language))
    }

    fn has(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

impl Parser<'_> {
    /// Parse one member of a file or class body.
    ///
    /// ## Parameters
    /// - `container`: simple name of the enclosing class, used to recognise Java constructors.
    pub(super) fn member(&mut self, container: Option<&str>) -> Member {
        let prefix = self.prefix();
        let info = languages::info(self.language);

        let word = self.peek().ident().map(str::to_string);
        if let Some(word) = word.as_deref() {
            if word == "fun" && self.peek_at(1).is_ident("interface") {
                self.advance();
                return self.class_decl(prefix);
            }
            // `object` and `record` are soft keywords; the others always declare a type.
            let reserved = matches!(word, "class" | "interface" | "enum");
            let companion = word == "object" && prefix.has("companion");
            let named = self.peek_at(1).ident().is_some();
            if self.language.is_type_keyword(word) && (reserved || companion || named) {
                return self.class_decl(prefix);
            }
            if info.function_keyword == Some(word) {
                return match self.kotlin_function(prefix) {
                    Some(function) => Member::Function(function),
                    None => Member::Other,
                };
            }
        }

        match self.language {
            LanguageId::Java => self.java_member(container, prefix),
            LanguageId::Kotlin => {
                self.skip_statement(true);
                Member::Other
            }
        }
    }

    fn prefix(&mut self) -> Prefix {
        let mut prefix = Prefix {
            annotations: Vec::new(),
            modifiers: Vec::new(),
        };
        loop {
            self.skip_newlines();
            if self.peek().is_punct('@') {
                if self.peek_at(1).is_ident("interface") {
                    // `@interface` declares an annotation type.
                    self.advance();
                    break;
                }
                if let Some(name) = self.annotation() {
                    prefix.annotations.push(name);
                }
                continue;
            }
            match self.peek().ident() {
                Some(word) if modifiers::is_modifier(self.language, word) => {
                    prefix.modifiers.push(word.to_string());
                    self.advance();
                }
                _ => break,
            }
        }
        prefix
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn class_decl(&mut self, prefix: Prefix) -> Member {
        let visibility = prefix.visibility(self.language);
        let keyword = self.advance();
        let mut kind = keyword.ident().and_then(ClassKind::from_keyword).unwrap_or(ClassKind::Class);
        if kind == ClassKind::Object && prefix.has("companion") {
            kind = ClassKind::CompanionObject;
        }

        let mut span = keyword.span;
        let name = match self.peek().ident().map(str::to_string) {
            Some(name) => {
                span = span.merge(self.advance().span);
                name
            }
            None if kind == ClassKind::CompanionObject => "Companion".to_string(),
            None => {
                self.error(SyntaxErrorKind::MissingName, "expected a class name", keyword.span);
                self.skip_statement(true);
                return Member::Other;
            }
        };

        let mut class = ClassDecl {
            name,
            kind,
            visibility,
            modifiers: prefix.modifiers,
            annotations: prefix.annotations,
            span,
            functions: Vec::new(),
            nested: Vec::new(),
        };

        // Header: type parameters, primary constructor / record components, supertypes.
        loop {
            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::Punct('{') => {
                    self.class_body(&mut class);
                    break;
                }
                TokenKind::Punct('(' | '[') => self.skip_group(),
                TokenKind::Punct('<') => self.skip_angles(),
                TokenKind::Punct('}') | TokenKind::Eof => break,
                TokenKind::Punct(';') if self.language == LanguageId::Java => {
                    self.advance();
                    break;
                }
                TokenKind::Newline => {
                    let next = self.next_significant();
                    let continues = next.is_punct('{') || next.is_punct(':') || next.is_punct(',') || next.is_ident("where");
                    if self.language == LanguageId::Kotlin && !continues {
                        break;
                    }
                    self.skip_newlines();
                }
                _ => {
                    self.advance();
                }
            }
        }

        Member::Class(class)
    }

    fn class_body(&mut self, class: &mut ClassDecl) {
        let open = self.advance();
        loop {
            self.skip_separators();
            if self.peek().is_punct('}') {
                self.advance();
                return;
            }
            if self.at_eof() {
                self.error(SyntaxErrorKind::UnclosedBrace, "unclosed `{` of class body", open.span);
                return;
            }
            let name = class.name.clone();
            match self.member(Some(&name)) {
                Member::Class(nested) => class.nested.push(nested),
                Member::Function(function) => class.functions.push(function),
                Member::Other => {}
            }
        }
    }

    // ========================================================================
    // Java members
    // ========================================================================

    /// Java field, method, constructor, initializer or enum constant.
    fn java_member(&mut self, container: Option<&str>, prefix: Prefix) -> Member {
        let mut header_tokens = 0usize;
        let mut last_ident: Option<(String, Span)> = None;

        loop {
            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::Eof | TokenKind::Punct('}') => return Member::Other,
                TokenKind::Punct(';' | ',') => {
                    self.advance();
                    return Member::Other;
                }
                TokenKind::Punct('=') => {
                    self.skip_statement(false);
                    return Member::Other;
                }
                TokenKind::Punct('{') => {
                    self.skip_block();
                    return Member::Other;
                }
                TokenKind::Punct('<') => {
                    self.skip_angles();
                    header_tokens += 1;
                    last_ident = None;
                }
                TokenKind::Punct('(') => {
                    let method = last_ident.take().and_then(|(name, span)| {
                        let is_constructor = container == Some(name.as_str()) && header_tokens == 1;
                        (container.is_some() && (header_tokens >= 2 || is_constructor))
                            .then_some((name, span, is_constructor))
                    });
                    match method {
                        Some((name, span, is_constructor)) => {
                            return Member::Function(self.java_method(prefix, name, span, is_constructor));
                        }
                        None => self.skip_group(),
                    }
                }
                TokenKind::Ident(name) => {
                    self.advance();
                    header_tokens += 1;
                    last_ident = Some((name, tok.span));
                }
                TokenKind::Newline => {
                    self.advance();
                }
                _ => {
                    self.advance();
                    header_tokens += 1;
                    last_ident = None;
                }
            }
        }
    }

    fn java_method(&mut self, prefix: Prefix, name: String, span: Span, is_constructor: bool) -> FunctionDecl {
        let visibility = prefix.visibility(self.language);
        self.skip_group();

        // `throws` clause, annotation defaults, then the body.
        let body = loop {
            match self.peek().kind {
                TokenKind::Punct('{') => break self.block_body().map_or(FunctionBody::Absent, FunctionBody::Block),
                TokenKind::Punct(';') => {
                    self.advance();
                    break FunctionBody::Absent;
                }
                TokenKind::Punct('}') | TokenKind::Eof => break FunctionBody::Absent,
                _ => {
                    self.advance();
                }
            }
        };

        FunctionDecl {
            name,
            visibility,
            modifiers: prefix.modifiers,
            annotations: prefix.annotations,
            body,
            span,
            is_constructor,
        }
    }

    // ========================================================================
    // Kotlin functions
    // ========================================================================

    fn kotlin_function(&mut self, prefix: Prefix) -> Option<FunctionDecl> {
        let keyword = self.advance();
        let visibility = prefix.visibility(self.language);
        if self.peek().is_punct('<') {
            self.skip_angles();
        }

        // Receiver types come first: `fun Int.isEven()`, `fun <T> List<T>.second()`.
        let mut name: Option<(String, Span)> = None;
        loop {
            let tok = self.peek().clone();
            match &tok.kind {
                TokenKind::Ident(ident) => {
                    self.advance();
                    name = Some((ident.clone(), tok.span));
                    if self.peek().is_punct('<') {
                        self.skip_angles();
                    }
                    if self.peek().is_punct('?') {
                        self.advance();
                    }
                }
                TokenKind::Punct('(') if name.is_none() => self.skip_group(),
                _ => break,
            }
            if self.peek().is_punct('.') {
                self.advance();
            } else {
                break;
            }
        }

        let Some((name, span)) = name else {
            self.error(SyntaxErrorKind::MissingName, "expected a function name", keyword.span);
            self.skip_statement(true);
            return None;
        };
        if !self.peek().is_punct('(') {
            self.error(SyntaxErrorKind::MissingName, "expected `(` after the function name", span);
            self.skip_statement(true);
            return None;
        }
        self.skip_group();

        // Return type and `where` clause, then the body.
        let body = loop {
            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::Punct('{') => break self.block_body().map_or(FunctionBody::Absent, FunctionBody::Block),
                TokenKind::Punct('=') => {
                    self.advance();
                    break FunctionBody::Expression(self.expression_body());
                }
                TokenKind::Newline => {
                    let next = self.next_significant();
                    if next.is_punct('{') || next.is_punct('=') || next.is_punct(':') || next.is_ident("where") {
                        self.skip_newlines();
                    } else {
                        break FunctionBody::Absent;
                    }
                }
                TokenKind::Punct('}' | ';') | TokenKind::Eof => break FunctionBody::Absent,
                TokenKind::Punct('(' | '[') => self.skip_group(),
                TokenKind::Punct('<') => self.skip_angles(),
                _ => {
                    self.advance();
                }
            }
        };

        Some(FunctionDecl {
            name,
            visibility,
            modifiers: prefix.modifiers,
            annotations: prefix.annotations,
            body,
            span,
            is_constructor: false,
        })
    }

    /// Text of a single-expression body, from after `=` to the end of the expression.
    fn expression_body(&mut self) -> String {
        self.skip_newlines();
        let start = self.peek().span.start;
        let mut end = start;
        let mut depth = 0usize;
        loop {
            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Newline if depth == 0 && !self.newline_continues() => break,
                TokenKind::Punct('}' | ';') if depth == 0 => break,
                TokenKind::Punct('{') => {
                    self.skip_block();
                    end = self.previous().map_or(end, |t| t.span.end);
                    continue;
                }
                TokenKind::Punct('(' | '[') => depth += 1,
                TokenKind::Punct(')' | ']') => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
            if !tok.is_newline() {
                end = tok.span.end;
            }
        }
        expression_text(&self.source[start..end])
    }
}

/// Normalize a possibly multi-line expression: the first line is kept as written and
/// continuation lines are re-indented by four spaces relative to it.
fn expression_text(raw: &str) -> String {
    let mut lines = raw.lines();
    let first = lines.next().unwrap_or_default().trim().to_string();
    let rest: Vec<&str> = lines.collect();
    if rest.iter().all(|l| l.trim().is_empty()) {
        return first;
    }
    let continuation = trim_indent(&rest.join("\n"));
    let indented = continuation
        .lines()
        .map(|l| if l.is_empty() { String::new() } else { format!("    {l}") })
        .collect::<Vec<_>>()
        .join("\n");
    format!("{first}\n{indented}")
}
