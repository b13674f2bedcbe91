//! Built-in fixture set.
//!
//! One fixture per class-shape convention, in both languages where the convention applies:
//! no package, a package, a nested private class, and a test calling into a sibling source.

use super::{Sample, SampleRegistry, SourceFile};

/// Relative path and content of every built-in sample, in listing order.
const SAMPLES: &[(&str, &str)] = &[
    (
        "SinglePublicClassSample.java",
        include_str!("../../fixtures/SinglePublicClassSample.java"),
    ),
    (
        "sample/SinglePublicClassWithPackageSample.java",
        include_str!("../../fixtures/sample/SinglePublicClassWithPackageSample.java"),
    ),
    (
        "MultipleClassesJavaSample.java",
        include_str!("../../fixtures/MultipleClassesJavaSample.java"),
    ),
    ("HelloJavaSample.java", include_str!("../../fixtures/HelloJavaSample.java")),
    (
        "SinglePublicClassSample.kt",
        include_str!("../../fixtures/SinglePublicClassSample.kt"),
    ),
    (
        "sample/SinglePublicClassWithPackageSample.kt",
        include_str!("../../fixtures/sample/SinglePublicClassWithPackageSample.kt"),
    ),
];

/// Support sources, keyed by the identifier of the sample that needs them.
const SUPPORT: &[(&str, &str, &str)] = &[(
    "HelloJavaSample.java",
    "support/Hello.kt",
    include_str!("../../fixtures/support/Hello.kt"),
)];

pub(super) fn registry() -> SampleRegistry {
    let mut registry = SampleRegistry::new();
    for (path, text) in SAMPLES {
        let Some(source) = SourceFile::new(*path, *text) else {
            continue;
        };
        let mut sample = Sample::from_source(source);
        for (owner, support_path, support_text) in SUPPORT {
            if *owner == sample.identifier {
                if let Some(support) = SourceFile::new(*support_path, *support_text) {
                    sample = sample.with_support(support);
                }
            }
        }
        if let Err(err) = registry.register(sample) {
            tracing::warn!(%err, "skipping built-in sample");
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use sampledoc_core::{LanguageId, Visibility};

    use super::*;

    #[test]
    fn test_builtin_listing_order() {
        let registry = registry();
        let ids: Vec<_> = registry.list().iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, SAMPLES.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    }

    #[test]
    fn test_builtin_expectations() {
        let registry = registry();

        let with_package = registry.get("sample/SinglePublicClassWithPackageSample.java").unwrap();
        assert_eq!(with_package.package.as_deref(), Some("sample"));
        assert_eq!(with_package.class_name, "SinglePublicClassWithPackageSample");

        let kotlin = registry.get("sample/SinglePublicClassWithPackageSample.kt").unwrap();
        assert_eq!(kotlin.language(), LanguageId::Kotlin);
        assert_eq!(kotlin.package.as_deref(), Some("sample"));

        let nested = registry.get("MultipleClassesJavaSample.java").unwrap();
        assert_eq!(nested.nested_classes.len(), 1);
        assert_eq!(nested.nested_classes[0].visibility, Visibility::Private);
        assert!(nested.nested_classes[0].is_static);

        let hello = registry.get("HelloJavaSample.java").unwrap();
        assert_eq!(hello.support_sources.len(), 1);
        assert_eq!(hello.support_sources[0].language, LanguageId::Kotlin);
        assert!(registry.get("SinglePublicClassSample.java").unwrap().package.is_none());
    }
}
