//! Property-based tests for naming, indentation and inlining
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use sampledoc::pipeline::{find_references, inline_text};
use sampledoc_core::naming::{SampleIdentifier, SamplePath};
use sampledoc_syntax::text::trim_indent;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
}

fn package() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..4).prop_map(|s| s.join(".")))
}

// =============================================================================
// Naming Properties
// =============================================================================

proptest! {
    /// Property: the sample path is the identifier with dots as slashes, plus `.md`
    #[test]
    fn sample_path_mirrors_identifier(package in package(), class in "[A-Z][A-Za-z]{0,8}", function in segment()) {
        let id = SampleIdentifier::of_function(package.as_deref(), &class, &function).unwrap();
        let path = id.to_sample_path();

        prop_assert_eq!(path.as_str().strip_suffix(".md").unwrap().replace('/', "."), id.as_str());
        prop_assert_eq!(SamplePath::parse(path.as_str()).unwrap(), path.clone());
        prop_assert_eq!(id.segments().last(), Some(function.as_str()));
    }

    /// Property: an identifier with an empty segment is rejected
    #[test]
    fn empty_segment_is_rejected(head in segment(), tail in segment()) {
        let double_dot = format!("{head}..{tail}");
        let leading_dot = format!(".{head}");
        let trailing_dot = format!("{head}.");
        prop_assert!(SampleIdentifier::parse(&double_dot).is_err());
        prop_assert!(SampleIdentifier::parse(&leading_dot).is_err());
        prop_assert!(SampleIdentifier::parse(&trailing_dot).is_err());
    }
}

// =============================================================================
// Indentation Properties
// =============================================================================

proptest! {
    /// Property: trimming is idempotent and leaves some line unindented
    #[test]
    fn trim_indent_is_idempotent(
        indent in 0usize..12,
        lines in prop::collection::vec(("[ ]{0,4}", "[a-z(){}.=]{1,12}"), 1..8),
    ) {
        let text: String = lines
            .iter()
            .map(|(extra, code)| format!("{}{extra}{code}\n", " ".repeat(indent)))
            .collect();
        let once = trim_indent(&text);
        prop_assert_eq!(trim_indent(&once), once.clone());
        prop_assert!(once.lines().any(|l| !l.starts_with(' ')));
    }
}

// =============================================================================
// Inlining Properties
// =============================================================================

proptest! {
    /// Property: text without references is never changed
    #[test]
    fn text_without_references_is_untouched(text in "[a-zA-Z *\n/]{0,200}") {
        prop_assert_eq!(inline_text(&text, |_| Some(vec!["x".to_string()])), text);
    }

    /// Property: every sample line lands under the reference prefix, and no reference remains
    #[test]
    fn prefixed_reference_is_fully_replaced(
        prefix in "[ ]{0,8}\\* ",
        sample in prop::collection::vec("[a-z =()]{0,16}", 1..6),
    ) {
        let text = format!("/**\n{prefix}SAMPLE: [demo.IntSample.addition]\n */\n");
        let inlined = inline_text(&text, |_| Some(sample.clone()));

        prop_assert!(find_references(&inlined).is_empty());
        prop_assert_eq!(inlined.lines().count(), 2 + sample.len());
        for (line, expected) in inlined.lines().skip(1).zip(&sample) {
            prop_assert_eq!(line, format!("{prefix}{expected}"));
        }
    }
}
