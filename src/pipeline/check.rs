//! Documentation-shape check of sample sources.
//!
//! A sample source must hold exactly one class, public and top-level. Kotlin samples also
//! must not declare top-level functions, nor single-expression functions in the sample class:
//! neither can be extracted as a block of statements.

use std::path::Path;

use sampledoc_core::LanguageId;
use sampledoc_core::conventions::{DEPRECATED_SAMPLE_SOURCE_SET, is_sample_file_stem};
use sampledoc_core::errors::{
    DEPRECATED_SAMPLE_SOURCE_SET_NOTICE, multiple_classes_found, no_public_class_found, sample_source_subject,
    single_expression_function_found, top_level_function_found,
};
use sampledoc_syntax::diagnostics::format_errors;
use sampledoc_syntax::parser;
use thiserror::Error;

use super::{FileError, read_sources};
use crate::registry::SourceFile;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error("Errors found while checking the content of sample sources ({0} found).")]
    ContentErrors(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Syntax,
    MultipleClasses,
    NoPublicClass,
    SingleExpressionFunction,
    TopLevelFunction,
}

/// One rule violation in one sample source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    pub path: String,
    pub kind: IssueKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Sample sources checked
    pub checked: usize,
    pub issues: Vec<SourceIssue>,
    /// Sample sources still living in the deprecated `sample` source set
    pub deprecated: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// The number of checked sources, or [`CheckError::ContentErrors`] when any issue was found.
    pub fn into_result(self) -> Result<usize, CheckError> {
        if self.is_ok() {
            Ok(self.checked)
        } else {
            Err(CheckError::ContentErrors(self.issues.len()))
        }
    }
}

/// Check every sample source under `root`. Each issue is logged as an error.
///
/// ## Errors
/// Only when a source cannot be read; rule violations are reported in the [`CheckReport`].
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn check_sources(root: &Path) -> Result<CheckReport, CheckError> {
    let sources = read_sources(root, |s| is_sample_file_stem(s.file_stem()))?;
    let mut report = CheckReport {
        checked: sources.len(),
        ..CheckReport::default()
    };

    for source in &sources {
        if in_deprecated_source_set(&source.relative_path) {
            tracing::warn!(path = %source.relative_path, "{DEPRECATED_SAMPLE_SOURCE_SET_NOTICE}");
            report.deprecated.push(source.relative_path.clone());
        }
        for issue in check_source(source) {
            tracing::error!("{}", issue.message);
            report.issues.push(issue);
        }
    }
    tracing::info!(checked = report.checked, issues = report.issues.len(), "sample sources checked");
    Ok(report)
}

/// Apply the documentation-shape rules to one sample source.
pub fn check_source(source: &SourceFile) -> Vec<SourceIssue> {
    let subject = sample_source_subject(&source.relative_path, source.language);
    let issue = |kind, message| SourceIssue {
        path: source.relative_path.clone(),
        kind,
        message,
    };

    let outline = match parser::parse(source.language, &source.text) {
        Ok(outline) => outline,
        Err(errors) => {
            let message = format!("Syntax error in {subject}:\n{}", format_errors(&source.text, &errors));
            return vec![issue(IssueKind::Syntax, message)];
        }
    };

    let mut issues = Vec::new();
    if outline.class_count() > 1 {
        issues.push(issue(IssueKind::MultipleClasses, multiple_classes_found(&subject)));
    }
    if outline.public_classes().next().is_none() {
        issues.push(issue(IssueKind::NoPublicClass, no_public_class_found(&subject)));
    }
    if source.language == LanguageId::Kotlin {
        let single_expression = outline
            .classes
            .iter()
            .flat_map(|c| &c.functions)
            .any(|f| f.is_single_expression());
        if single_expression {
            issues.push(issue(
                IssueKind::SingleExpressionFunction,
                single_expression_function_found(&subject),
            ));
        }
        if !outline.functions.is_empty() {
            issues.push(issue(IssueKind::TopLevelFunction, top_level_function_found(&subject)));
        }
    }
    issues
}

/// `…/sample/kotlin/…` or `…/sample/java/…`
fn in_deprecated_source_set(relative_path: &str) -> bool {
    let parts: Vec<&str> = relative_path.split('/').collect();
    parts
        .windows(2)
        .any(|w| w[0] == DEPRECATED_SAMPLE_SOURCE_SET && (w[1] == "kotlin" || w[1] == "java"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(path: &str, text: &str) -> Vec<IssueKind> {
        check_source(&SourceFile::new(path, text).unwrap())
            .into_iter()
            .map(|i| i.kind)
            .collect()
    }

    #[test]
    fn test_valid_kotlin_sample() {
        let text = "package demo\n\nclass IntSample {\n    fun addition() {\n        check(1 + 1 == 2)\n    }\n}\n";
        assert!(issues("IntSample.kt", text).is_empty());
    }

    #[test]
    fn test_multiple_classes_counts_nested() {
        let text = "public class NestedSample {\n    private static class Inner {}\n}\n";
        let found = check_source(&SourceFile::new("NestedSample.java", text).unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].message,
            "Multiple classes found in 'NestedSample.java' Java sample source."
        );
    }

    #[test]
    fn test_java_class_without_modifier_is_not_public() {
        assert_eq!(
            issues("HiddenSample.java", "class HiddenSample {\n    void run() {}\n}\n"),
            vec![IssueKind::NoPublicClass]
        );
        assert!(issues("ShownSample.kt", "class ShownSample {\n    fun run() {}\n}\n").is_empty());
    }

    #[test]
    fn test_kotlin_single_expression_function() {
        assert_eq!(
            issues("ExprSample.kt", "class ExprSample {\n    fun answer(): Int = 42\n}\n"),
            vec![IssueKind::SingleExpressionFunction]
        );
    }

    #[test]
    fn test_kotlin_top_level_function() {
        let found = check_source(&SourceFile::new("TopSample.kt", "class TopSample\n\nfun helper() {}\n").unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, IssueKind::TopLevelFunction);
        assert_eq!(found[0].message, "Top-level function found in 'TopSample.kt' Kotlin sample source.");
    }

    #[test]
    fn test_syntax_error_is_an_issue() {
        assert_eq!(issues("BrokenSample.kt", "class BrokenSample {\n"), vec![IssueKind::Syntax]);
    }

    #[test]
    fn test_deprecated_source_set() {
        assert!(in_deprecated_source_set("src/sample/kotlin/FooSample.kt"));
        assert!(!in_deprecated_source_set("sample/SinglePublicClassWithPackageSample.kt"));
        assert!(!in_deprecated_source_set("src/test/kotlin/sample/FooSample.kt"));
    }

    #[test]
    fn test_report_result() {
        let report = CheckReport {
            checked: 2,
            ..CheckReport::default()
        };
        assert_eq!(report.into_result().unwrap(), 2);

        let report = CheckReport {
            checked: 1,
            issues: vec![SourceIssue {
                path: "A.kt".to_string(),
                kind: IssueKind::TopLevelFunction,
                message: String::new(),
            }],
            deprecated: Vec::new(),
        };
        assert!(matches!(report.into_result(), Err(CheckError::ContentErrors(1))));
    }
}
