//! Modifier keywords and the visibility they imply.
//!
//! ## Notes
//! - Java declarations without an access modifier are package-private.
//! - Kotlin declarations without a visibility modifier are public.

use std::fmt;

use super::languages::LanguageId;

/// Declared (or implied) visibility of a class or function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    /// Kotlin `internal`.
    Internal,
    /// Java default access.
    PackagePrivate,
    Private,
}

const JAVA_MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "sealed",
    "strictfp",
    "synchronized",
    "native",
    "transient",
    "volatile",
    "default",
];

const KOTLIN_MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "internal",
    "open",
    "final",
    "abstract",
    "sealed",
    "data",
    "inner",
    "enum",
    "annotation",
    "companion",
    "override",
    "lateinit",
    "inline",
    "suspend",
    "tailrec",
    "operator",
    "infix",
    "external",
    "const",
    "value",
];

/// Check whether `word` is a declaration modifier in `language`.
pub fn is_modifier(language: LanguageId, word: &str) -> bool {
    match language {
        LanguageId::Java => JAVA_MODIFIERS.contains(&word),
        LanguageId::Kotlin => KOTLIN_MODIFIERS.contains(&word),
    }
}

/// Map an access-modifier keyword to its visibility.
pub fn visibility_from_keyword(language: LanguageId, word: &str) -> Option<Visibility> {
    match (language, word) {
        (_, "public") => Some(Visibility::Public),
        (_, "protected") => Some(Visibility::Protected),
        (_, "private") => Some(Visibility::Private),
        (LanguageId::Kotlin, "internal") => Some(Visibility::Internal),
        _ => None,
    }
}

/// Visibility of a declaration that carries no access modifier.
pub fn default_visibility(language: LanguageId) -> Visibility {
    match language {
        LanguageId::Java => Visibility::PackagePrivate,
        LanguageId::Kotlin => Visibility::Public,
    }
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::PackagePrivate => "package-private",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
