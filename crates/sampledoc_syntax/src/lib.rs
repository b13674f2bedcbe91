//! Outline frontend for Java and Kotlin sample sources: lexer, parser, AST, diagnostics.
//!
//! The parser does not build expression trees. It recovers exactly what sample tooling needs:
//! the package declaration, class declarations with their visibility and nesting, and function
//! declarations with their annotations and body text.
//!
//! ## Notes
//! - Comments, string literals and character literals never influence brace matching.
//! - Vocabulary (type keywords, modifiers) comes from `sampledoc_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use sampledoc_core::LanguageId;
//! use sampledoc_syntax::parser;
//!
//! let outline = parser::parse(LanguageId::Kotlin, "package demo\n\nclass GreetSample {\n    fun greet() {\n        check(true)\n    }\n}\n").unwrap();
//! assert_eq!(outline.package_name(), Some("demo"));
//! assert_eq!(outline.classes[0].functions[0].name, "greet");
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod text;

pub use ast::{ClassDecl, ClassKind, FunctionBody, FunctionDecl, SourceOutline, Span, Spanned};
pub use diagnostics::{SyntaxError, SyntaxErrorKind};
