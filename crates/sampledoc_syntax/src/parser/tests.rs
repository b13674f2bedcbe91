use sampledoc_core::{LanguageId, Visibility};

use super::parse;
use crate::ast::{ClassKind, FunctionBody, SourceOutline};
use crate::diagnostics::SyntaxErrorKind;

fn java(source: &str) -> SourceOutline {
    parse(LanguageId::Java, source).unwrap()
}

fn kotlin(source: &str) -> SourceOutline {
    parse(LanguageId::Kotlin, source).unwrap()
}

/// Compact rendering of an outline used by the snapshot tests.
fn render(outline: &SourceOutline) -> String {
    fn class(out: &mut String, c: &crate::ast::ClassDecl, depth: usize) {
        let pad = "  ".repeat(depth);
        out.push_str(&format!(
            "{pad}{:?} {} {} [{}]\n",
            c.kind,
            c.visibility,
            c.name,
            c.modifiers.join(" ")
        ));
        for f in &c.functions {
            let body = match &f.body {
                FunctionBody::Block(_) => "block",
                FunctionBody::Expression(_) => "expr",
                FunctionBody::Absent => "none",
            };
            let test = if f.is_test() { " @Test" } else { "" };
            out.push_str(&format!("{pad}  fn {} {} {body}{test}\n", f.visibility, f.name));
        }
        for n in &c.nested {
            class(out, n, depth + 1);
        }
    }

    let mut out = format!("package {}\n", outline.package_name().unwrap_or("<none>"));
    for c in &outline.classes {
        class(&mut out, c, 0);
    }
    for f in &outline.functions {
        out.push_str(&format!("top fn {}\n", f.name));
    }
    out
}

#[test]
fn test_java_single_public_class() {
    let outline = java(
        r#"import org.junit.jupiter.api.Assertions;
import org.junit.jupiter.api.Test;

import java.util.Random;

public class SinglePublicClassSample {
    @Test
    void isPositive() {
        final int number = new Random()
                .nextInt(1, Integer.MAX_VALUE);
        Assertions.assertTrue(number > 0);
    }
}
"#,
    );
    assert_eq!(outline.package, None);
    assert_eq!(outline.classes.len(), 1);
    let class = &outline.classes[0];
    assert_eq!(class.name, "SinglePublicClassSample");
    assert_eq!(class.visibility, Visibility::Public);
    let tests: Vec<_> = class.test_functions().map(|f| f.name.as_str()).collect();
    assert_eq!(tests, vec!["isPositive"]);
    assert_eq!(
        class.functions[0].body,
        FunctionBody::Block(
            "final int number = new Random()\n        .nextInt(1, Integer.MAX_VALUE);\nAssertions.assertTrue(number > 0);"
                .to_string()
        )
    );
}

#[test]
fn test_java_nested_private_static_class() {
    let outline = java(
        r#"package sample;

public class MultipleClassesJavaSample {
    @Test
    void nestedValue() {
        Assertions.assertEquals(42, new Nested().number);
    }

    private static class Nested {
        private final int number = 42;

        Nested() {
        }
    }
}
"#,
    );
    insta::assert_snapshot!(render(&outline), @r"
    package sample
    Class public MultipleClassesJavaSample [public]
      fn package-private nestedValue block @Test
      Class private Nested [private static]
        fn package-private Nested block
    ");
    let nested = outline.classes[0].find_nested("Nested").unwrap();
    assert!(nested.is_static());
    assert!(nested.functions[0].is_constructor);
    assert_eq!(outline.class_count(), 2);
}

#[test]
fn test_java_enum_constants_are_not_methods() {
    let outline = java(
        r#"enum Color {
    RED("r"), GREEN("g");

    private final String code;

    Color(String code) { this.code = code; }

    String code() { return code; }
}
"#,
    );
    let names: Vec<_> = outline.classes[0].functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Color", "code"]);
    assert_eq!(outline.classes[0].kind, ClassKind::Enum);
    assert_eq!(outline.classes[0].visibility, Visibility::PackagePrivate);
}

#[test]
fn test_java_generic_method_and_throws_clause() {
    let outline = java(
        r#"public class Util {
    public static <T extends Comparable<T>> T max(T a, T b) throws IllegalStateException {
        return a.compareTo(b) >= 0 ? a : b;
    }

    abstract void later();
}
"#,
    );
    let functions = &outline.classes[0].functions;
    assert_eq!(functions[0].name, "max");
    assert_eq!(functions[0].body_text(), Some("return a.compareTo(b) >= 0 ? a : b;"));
    assert_eq!(functions[1].body, FunctionBody::Absent);
}

#[test]
fn test_kotlin_package_and_default_public_class() {
    let outline = kotlin(
        r#"package sample

import kotlin.test.Test
import kotlin.test.assertTrue

class SinglePublicClassWithPackageSample {
    @Test
    fun isPositive() {
        val number: Int = (1..Int.MAX_VALUE).random()
        assertTrue(number > 0)
    }
}
"#,
    );
    assert_eq!(outline.package_name(), Some("sample"));
    let class = &outline.classes[0];
    assert_eq!(class.visibility, Visibility::Public);
    assert_eq!(
        class.functions[0].body_text(),
        Some("val number: Int = (1..Int.MAX_VALUE).random()\nassertTrue(number > 0)")
    );
}

#[test]
fn test_kotlin_single_expression_and_top_level_functions() {
    let outline = kotlin(
        r#"@file:JvmName("HelloKt")
package greeting

public fun greet(name: String = "World"): String = "Hello $name!"

internal class Greeter {
    fun twice(name: String): String = greet(name)
        .repeat(2)

    private fun shout(): String {
        return greet().uppercase()
    }

    companion object {
        fun create(): Greeter = Greeter()
    }
}
"#,
    );
    assert_eq!(outline.package_name(), Some("greeting"));
    assert_eq!(outline.functions.len(), 1);
    assert_eq!(outline.functions[0].body, FunctionBody::Expression("\"Hello $name!\"".to_string()));

    let greeter = &outline.classes[0];
    assert_eq!(greeter.visibility, Visibility::Internal);
    assert_eq!(
        greeter.functions[0].body,
        FunctionBody::Expression("greet(name)\n    .repeat(2)".to_string())
    );
    assert_eq!(greeter.functions[1].visibility, Visibility::Private);
    assert!(!greeter.functions[1].is_single_expression());

    let companion = &greeter.nested[0];
    assert_eq!(companion.kind, ClassKind::CompanionObject);
    assert_eq!(companion.name, "Companion");
    assert_eq!(outline.class_count(), 1);
}

#[test]
fn test_kotlin_backticked_test_names_and_qualified_annotation() {
    let outline = kotlin(
        r#"class IntegersSample {
    @org.junit.jupiter.api.Test
    fun `sum is positive`() {
        check(1 + 1 > 0)
    }

    @Suppress("unused")
    fun helper(): Int = 1
}
"#,
    );
    let class = &outline.classes[0];
    let tests: Vec<_> = class.test_functions().map(|f| f.name.as_str()).collect();
    assert_eq!(tests, vec!["sum is positive"]);
    assert!(class.functions[1].is_single_expression());
}

#[test]
fn test_kotlin_data_class_without_body_and_extension_function() {
    let outline = kotlin(
        r#"data class Point(val x: Int, val y: Int)

fun Point.norm(): Int = x * x + y * y

private class Hidden
"#,
    );
    insta::assert_snapshot!(render(&outline), @r"
    package <none>
    Class public Point [data]
    Class private Hidden [private]
    top fn norm
    ");
}

#[test]
fn test_braces_in_strings_and_comments_do_not_unbalance() {
    let outline = java(
        r#"public class BracesSample {
    // }
    /* } */
    @Test
    void braces() {
        String s = "}}}";
        char c = '{';
    }
}
"#,
    );
    assert_eq!(outline.classes[0].functions.len(), 1);
}

#[test]
fn test_unclosed_class_body_is_an_error() {
    let errors = parse(LanguageId::Java, "public class Broken {\n    void f() {\n").unwrap_err();
    assert!(errors.iter().any(|e| e.kind == SyntaxErrorKind::UnclosedBrace));
}

#[test]
fn test_stray_closing_brace_is_an_error() {
    let errors = parse(LanguageId::Kotlin, "class A {\n}\n}\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, SyntaxErrorKind::UnexpectedClosingBrace);
}

#[test]
fn test_missing_class_name() {
    let errors = parse(LanguageId::Java, "public class {\n}\n").unwrap_err();
    assert_eq!(errors[0].kind, SyntaxErrorKind::MissingName);
}

#[test]
fn test_lexer_errors_surface_through_parse() {
    let errors = parse(LanguageId::Kotlin, "class A {\n    val s = \"open\n}\n").unwrap_err();
    assert_eq!(errors[0].kind, SyntaxErrorKind::UnterminatedString);
}
