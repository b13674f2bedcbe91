//! Outlines of the built-in fixture sources.

use sampledoc_core::LanguageId;
use sampledoc_core::lang::modifiers::Visibility;
use sampledoc_syntax::parser;
use sampledoc_syntax::{FunctionBody, SourceOutline};

fn parse(language: LanguageId, source: &str) -> SourceOutline {
    match parser::parse(language, source) {
        Ok(outline) => outline,
        Err(errors) => panic!("fixture failed to parse: {errors:?}"),
    }
}

#[test]
fn single_public_class_samples() {
    let java = parse(
        LanguageId::Java,
        include_str!("../../../fixtures/SinglePublicClassSample.java"),
    );
    let kotlin = parse(
        LanguageId::Kotlin,
        include_str!("../../../fixtures/SinglePublicClassSample.kt"),
    );
    for outline in [&java, &kotlin] {
        assert_eq!(outline.package_name(), None);
        assert_eq!(outline.class_count(), 1);
        let class = outline.find_class("SinglePublicClassSample").unwrap();
        assert_eq!(class.visibility, Visibility::Public);
        let tests: Vec<&str> = class.test_functions().map(|f| f.name.as_str()).collect();
        assert_eq!(tests, vec!["isPositive"]);
    }
}

#[test]
fn packaged_samples_declare_the_sample_package() {
    let java = parse(
        LanguageId::Java,
        include_str!("../../../fixtures/sample/SinglePublicClassWithPackageSample.java"),
    );
    let kotlin = parse(
        LanguageId::Kotlin,
        include_str!("../../../fixtures/sample/SinglePublicClassWithPackageSample.kt"),
    );
    assert_eq!(java.package_name(), Some("sample"));
    assert_eq!(kotlin.package_name(), Some("sample"));

    let function = &kotlin.classes[0].functions[0];
    assert_eq!(
        function.body,
        FunctionBody::Block("val number: Int = (1..Int.MAX_VALUE)\n    .random()\nassertTrue(number > 0)".to_string())
    );
}

#[test]
fn nested_class_is_private_static() {
    let outline = parse(
        LanguageId::Java,
        include_str!("../../../fixtures/MultipleClassesJavaSample.java"),
    );
    assert_eq!(outline.classes.len(), 1);
    assert_eq!(outline.class_count(), 2);

    let nested = outline.classes[0].find_nested("Nested").unwrap();
    assert_eq!(nested.visibility, Visibility::Private);
    assert!(nested.is_static());
    assert!(nested.functions.is_empty());
}

#[test]
fn kotlin_support_source_is_a_top_level_function() {
    let outline = parse(LanguageId::Kotlin, include_str!("../../../fixtures/support/Hello.kt"));
    assert!(outline.classes.is_empty());
    assert_eq!(outline.functions.len(), 1);
    assert_eq!(outline.functions[0].name, "greet");
    assert!(outline.functions[0].is_single_expression());
}
