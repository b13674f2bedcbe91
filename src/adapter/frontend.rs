//! Structural front-end shared by every toolchain.
//!
//! Parses the sample with `sampledoc_syntax` and checks it against the registry's expectations
//! before anything external runs. A violation is a [`CompileError`]: the sample could not
//! compile, or could not be the sample it claims to be.

use sampledoc_core::Visibility;
use sampledoc_core::naming::qualified_name;
use sampledoc_syntax::diagnostics::format_errors;
use sampledoc_syntax::{ClassDecl, ClassKind, parser};

use super::CompileError;
use crate::registry::{NestedClassDescriptor, Sample};

/// What the front-end learned about a valid sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleShape {
    pub qualified_class: String,
    /// `@Test` methods of the sample class, in declaration order
    pub tests: Vec<String>,
}

/// Validate `sample` and collect its test methods.
///
/// ## Errors
/// A [`CompileError`] when the source has a syntax error, declares a package other than the
/// expected one, lacks exactly one public top-level class named as expected, has a nested class
/// that differs from its descriptor, or declares no test methods.
pub fn check(sample: &Sample) -> Result<SampleShape, CompileError> {
    let path = &sample.source.relative_path;
    let outline = parser::parse(sample.language(), &sample.source.text).map_err(|errors| {
        CompileError::new(format!(
            "syntax error in '{path}':\n{}",
            format_errors(&sample.source.text, &errors)
        ))
    })?;

    let declared = outline.package_name();
    if declared != sample.package.as_deref() {
        return Err(CompileError::new(format!(
            "package mismatch in '{path}': declared {}, expected {}",
            describe_package(declared),
            describe_package(sample.package.as_deref())
        )));
    }

    let public: Vec<&ClassDecl> = outline.public_classes().collect();
    if public.len() > 1 {
        let names: Vec<&str> = public.iter().map(|c| c.name.as_str()).collect();
        return Err(CompileError::new(format!(
            "more than one public top-level class in '{path}': {}",
            names.join(", ")
        )));
    }
    let Some(class) = public.into_iter().find(|c| c.name == sample.class_name) else {
        return Err(CompileError::new(format!(
            "no public top-level class named '{}' in '{path}'",
            sample.class_name
        )));
    };

    for expected in &sample.nested_classes {
        check_nested(class, expected)?;
    }

    let tests: Vec<String> = class.test_functions().map(|f| f.name.clone()).collect();
    if tests.is_empty() {
        return Err(CompileError::new(format!(
            "no test methods found in '{}'",
            sample.class_name
        )));
    }

    Ok(SampleShape {
        qualified_class: qualified_name(declared, &class.name),
        tests,
    })
}

fn check_nested(class: &ClassDecl, expected: &NestedClassDescriptor) -> Result<(), CompileError> {
    let Some(nested) = class
        .nested
        .iter()
        .find(|n| n.name == expected.name && n.kind != ClassKind::CompanionObject)
    else {
        return Err(CompileError::new(format!(
            "nested class '{}' not found in '{}'",
            expected.name, class.name
        )));
    };
    if nested.visibility != expected.visibility || nested.is_static() != expected.is_static {
        return Err(CompileError::new(format!(
            "nested class '{}.{}' is {}, expected {}",
            class.name,
            nested.name,
            describe_nested(nested.visibility, nested.is_static()),
            describe_nested(expected.visibility, expected.is_static)
        )));
    }
    Ok(())
}

fn describe_package(package: Option<&str>) -> String {
    match package {
        Some(package) => format!("'{package}'"),
        None => "no package".to_string(),
    }
}

fn describe_nested(visibility: Visibility, is_static: bool) -> String {
    if is_static {
        format!("{visibility} static")
    } else {
        visibility.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{SampleRegistry, SourceFile};

    fn sample(path: &str, text: &str) -> Sample {
        Sample::from_source(SourceFile::new(path, text).unwrap())
    }

    #[test]
    fn test_every_builtin_sample_is_structurally_valid() {
        for sample in SampleRegistry::builtin().list() {
            let shape = check(sample).unwrap_or_else(|e| panic!("{}: {e}", sample.identifier));
            assert!(!shape.tests.is_empty());
        }
    }

    #[test]
    fn test_qualified_class_includes_package() {
        let registry = SampleRegistry::builtin();
        let shape = check(registry.get("sample/SinglePublicClassWithPackageSample.kt").unwrap()).unwrap();
        assert_eq!(shape.qualified_class, "sample.SinglePublicClassWithPackageSample");
        assert_eq!(shape.tests, vec!["isPositive"]);
    }

    #[test]
    fn test_package_not_matching_location() {
        let sample = sample(
            "MisplacedSample.java",
            "package misplaced;\npublic class MisplacedSample {\n    @Test\n    void t() {}\n}\n",
        );
        let err = check(&sample).unwrap_err();
        assert_eq!(
            err.message,
            "package mismatch in 'MisplacedSample.java': declared 'misplaced', expected no package"
        );
    }

    #[test]
    fn test_missing_public_class() {
        let sample = sample("HiddenSample.java", "class HiddenSample {\n    @Test\n    void t() {}\n}\n");
        let err = check(&sample).unwrap_err();
        assert!(err.message.starts_with("no public top-level class named 'HiddenSample'"));
    }

    #[test]
    fn test_two_public_classes() {
        let sample = sample(
            "TwoSample.kt",
            "class TwoSample {\n    @Test\n    fun t() {}\n}\n\nclass Other\n",
        );
        let err = check(&sample).unwrap_err();
        assert_eq!(
            err.message,
            "more than one public top-level class in 'TwoSample.kt': TwoSample, Other"
        );
    }

    #[test]
    fn test_nested_class_visibility_mismatch() {
        let mut sample = sample(
            "OuterSample.java",
            "public class OuterSample {\n    @Test\n    void t() {}\n    public static class Inner {}\n}\n",
        );
        sample.nested_classes[0].visibility = Visibility::Private;
        let err = check(&sample).unwrap_err();
        assert_eq!(
            err.message,
            "nested class 'OuterSample.Inner' is public static, expected private static"
        );
    }

    #[test]
    fn test_missing_nested_class() {
        let sample = sample(
            "OuterSample.java",
            "public class OuterSample {\n    @Test\n    void t() {}\n}\n",
        )
        .with_nested(NestedClassDescriptor {
            name: "Inner".to_string(),
            visibility: Visibility::Private,
            is_static: true,
        });
        let err = check(&sample).unwrap_err();
        assert_eq!(err.message, "nested class 'Inner' not found in 'OuterSample'");
    }

    #[test]
    fn test_no_test_methods() {
        let sample = sample("IdleSample.java", "public class IdleSample {\n    void helper() {}\n}\n");
        assert_eq!(check(&sample).unwrap_err().message, "no test methods found in 'IdleSample'");
    }

    #[test]
    fn test_syntax_error_is_a_compile_error() {
        let sample = sample("BrokenSample.java", "public class BrokenSample {\n");
        let err = check(&sample).unwrap_err();
        assert!(err.message.starts_with("syntax error in 'BrokenSample.java':\n1:"));
    }
}
