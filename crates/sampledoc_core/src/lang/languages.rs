//! Define the languages a sample source can be written in.
//!
//! Every supported language has a stable identifier ([`LanguageId`]) and a const metadata entry in
//! [`LANGUAGES`] recording its file extension, Markdown fence tag and declaration keywords.
//!
//! ## Examples
//! ```rust
//! use sampledoc_core::lang::languages::{self, LanguageId};
//!
//! assert_eq!(languages::from_extension("kt"), Some(LanguageId::Kotlin));
//! assert_eq!(LanguageId::Java.markdown_identifier(), "java");
//! ```

use std::fmt;
use std::path::Path;

/// Stable identifier for every supported sample language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LanguageId {
    Java,
    Kotlin,
}

/// Metadata describing how a language spells the declarations samples rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    pub id: LanguageId,
    /// Human-readable name used in diagnostics (`Java`, `Kotlin`).
    pub name: &'static str,
    /// File extension without the leading dot.
    pub file_extension: &'static str,
    /// Info string of a fenced Markdown code block.
    pub markdown_identifier: &'static str,
    pub package_keyword: &'static str,
    pub import_keyword: &'static str,
    /// Keywords that introduce a class-like declaration.
    pub type_keywords: &'static [&'static str],
    /// Keyword that introduces a function, when the language has one.
    ///
    /// Java methods are recognised by their shape (`Type name(...)`) instead.
    pub function_keyword: Option<&'static str>,
    /// Whether declarations end with `;` (otherwise a newline may end them).
    pub semicolon_terminated: bool,
}

/// Registry of supported languages.
pub const LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        id: LanguageId::Java,
        name: "Java",
        file_extension: "java",
        markdown_identifier: "java",
        package_keyword: "package",
        import_keyword: "import",
        type_keywords: &["class", "interface", "enum", "record"],
        function_keyword: None,
        semicolon_terminated: true,
    },
    LanguageInfo {
        id: LanguageId::Kotlin,
        name: "Kotlin",
        file_extension: "kt",
        markdown_identifier: "kotlin",
        package_keyword: "package",
        import_keyword: "import",
        type_keywords: &["class", "interface", "object"],
        function_keyword: Some("fun"),
        semicolon_terminated: false,
    },
];

/// Return the metadata entry for a language.
pub fn info(id: LanguageId) -> &'static LanguageInfo {
    match id {
        LanguageId::Java => &LANGUAGES[0],
        LanguageId::Kotlin => &LANGUAGES[1],
    }
}

/// Look up a language by file extension (without the dot). Case-sensitive.
pub fn from_extension(extension: &str) -> Option<LanguageId> {
    LANGUAGES.iter().find(|l| l.file_extension == extension).map(|l| l.id)
}

/// Look up the language of a path from its extension.
pub fn from_path(path: &Path) -> Option<LanguageId> {
    path.extension().and_then(|e| e.to_str()).and_then(from_extension)
}

impl LanguageId {
    pub fn name(self) -> &'static str {
        info(self).name
    }

    pub fn file_extension(self) -> &'static str {
        info(self).file_extension
    }

    pub fn markdown_identifier(self) -> &'static str {
        info(self).markdown_identifier
    }

    /// Check whether `word` introduces a class-like declaration in this language.
    pub fn is_type_keyword(self, word: &str) -> bool {
        info(self).type_keywords.contains(&word)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
