use std::collections::HashMap;

use sampledoc_core::lang::languages::{self, LanguageId};
use sampledoc_core::lang::modifiers;

#[test]
fn language_extensions_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, LanguageId> = HashMap::new();

    for info in languages::LANGUAGES {
        assert_eq!(
            languages::from_extension(info.file_extension),
            Some(info.id),
            "extension not resolvable: {}",
            info.file_extension
        );
        if let Some(prev) = seen.insert(info.file_extension, info.id) {
            panic!(
                "duplicate extension {:?}: {:?} and {:?}",
                info.file_extension, prev, info.id
            );
        }
    }
}

#[test]
fn type_keywords_are_never_modifiers() {
    for info in languages::LANGUAGES {
        for keyword in info.type_keywords {
            assert!(
                !modifiers::is_modifier(info.id, keyword),
                "{keyword:?} is both a type keyword and a modifier in {}",
                info.name
            );
        }
        if let Some(function_keyword) = info.function_keyword {
            assert!(!modifiers::is_modifier(info.id, function_keyword));
        }
    }
}

#[test]
fn markdown_identifiers_are_lowercase() {
    for info in languages::LANGUAGES {
        assert!(
            info.markdown_identifier.chars().all(|c| c.is_ascii_lowercase()),
            "markdown identifier must be lowercase: {}",
            info.markdown_identifier
        );
    }
}
