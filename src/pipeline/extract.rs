//! Extraction of sample functions into Markdown code blocks.
//!
//! `IntSample.addition` declared in package `demo` is written to `demo/IntSample/addition.md`:
//!
//! ````text
//! ```kotlin
//! val x = 1
//! check(x + 1 == 2)
//! ```
//! ````

use std::path::Path;

use sampledoc_core::conventions::is_sample_file_stem;
use sampledoc_core::{LanguageId, NamingError, SampleIdentifier, SamplePath};
use sampledoc_syntax::diagnostics::format_errors;
use sampledoc_syntax::{FunctionBody, parser};
use thiserror::Error;

use super::{FileError, read_sources, write_file};
use crate::registry::SourceFile;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error("syntax error in '{path}':\n{message}")]
    Syntax { path: String, message: String },

    #[error("Sample '{identifier}' has a blank body.")]
    BlankBody { identifier: String },

    #[error(transparent)]
    Naming(#[from] NamingError),
}

/// One sample function, ready to be written as Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSample {
    pub identifier: SampleIdentifier,
    pub language: LanguageId,
    /// Function body, common indentation removed
    pub body: String,
}

impl ExtractedSample {
    pub fn path(&self) -> SamplePath {
        self.identifier.to_sample_path()
    }

    /// Fenced code block tagged with the language's Markdown identifier.
    pub fn to_markdown(&self) -> String {
        format!("```{}\n{}\n```\n", self.language.markdown_identifier(), self.body)
    }
}

/// Collect the functions declared directly in the top-level classes of `source`.
///
/// Constructors and functions without a body are skipped.
///
/// ## Errors
/// - [`ExtractError::Syntax`] when the source does not parse.
/// - [`ExtractError::BlankBody`] when a function body is blank.
/// - [`ExtractError::Naming`] when a name does not form a valid identifier.
pub fn extract_samples(source: &SourceFile) -> Result<Vec<ExtractedSample>, ExtractError> {
    let outline = parser::parse(source.language, &source.text).map_err(|errors| ExtractError::Syntax {
        path: source.relative_path.clone(),
        message: format_errors(&source.text, &errors),
    })?;

    let mut samples = Vec::new();
    for class in &outline.classes {
        for function in class.functions.iter().filter(|f| !f.is_constructor) {
            let body = match &function.body {
                FunctionBody::Block(text) | FunctionBody::Expression(text) => text,
                FunctionBody::Absent => continue,
            };
            let identifier = SampleIdentifier::of_function(outline.package_name(), &class.name, &function.name)?;
            if body.trim().is_empty() {
                return Err(ExtractError::BlankBody {
                    identifier: identifier.to_string(),
                });
            }
            samples.push(ExtractedSample {
                identifier,
                language: source.language,
                body: body.clone(),
            });
        }
    }
    Ok(samples)
}

/// Extract every sample source under `source_dir` into `output_dir`.
///
/// Returns the written paths, relative to `output_dir`, in source order.
///
/// ## Errors
/// The first [`ExtractError`] met; files written before it stay in place.
#[tracing::instrument(skip_all, fields(source_dir = %source_dir.display(), output_dir = %output_dir.display()))]
pub fn extract_dir(source_dir: &Path, output_dir: &Path) -> Result<Vec<SamplePath>, ExtractError> {
    let sources = read_sources(source_dir, |s| is_sample_file_stem(s.file_stem()))?;
    let mut written = Vec::new();
    for source in &sources {
        for sample in extract_samples(source)? {
            let path = sample.path();
            write_file(&output_dir.join(path.as_str()), &sample.to_markdown())?;
            tracing::debug!(sample = %sample.identifier, path = %path, "extracted");
            written.push(path);
        }
    }
    tracing::info!(count = written.len(), "samples extracted");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(path: &str, text: &str) -> Vec<ExtractedSample> {
        extract_samples(&SourceFile::new(path, text).unwrap()).unwrap()
    }

    #[test]
    fn test_kotlin_block_body() {
        let samples = extract(
            "IntSample.kt",
            "package demo\n\nclass IntSample {\n    @Test\n    fun addition() {\n        val x = 1\n        check(x + 1 == 2)\n    }\n}\n",
        );
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].identifier.as_str(), "demo.IntSample.addition");
        assert_eq!(samples[0].path().as_str(), "demo/IntSample/addition.md");
        assert_eq!(samples[0].to_markdown(), "```kotlin\nval x = 1\ncheck(x + 1 == 2)\n```\n");
    }

    #[test]
    fn test_java_without_package() {
        let samples = extract(
            "GreetSample.java",
            "public class GreetSample {\n    public GreetSample() {}\n\n    @Test\n    void greet() {\n        String s = \"hi\";\n    }\n}\n",
        );
        let ids: Vec<_> = samples.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["GreetSample.greet"]);
        assert_eq!(samples[0].to_markdown(), "```java\nString s = \"hi\";\n```\n");
    }

    #[test]
    fn test_single_expression_body() {
        let samples = extract("ExprSample.kt", "class ExprSample {\n    fun answer(): Int = 42\n}\n");
        assert_eq!(samples[0].body, "42");
    }

    #[test]
    fn test_blank_body_is_rejected() {
        let err = extract_samples(&SourceFile::new("EmptySample.kt", "class EmptySample {\n    fun nothing() {\n    }\n}\n").unwrap())
            .unwrap_err();
        assert_eq!(err.to_string(), "Sample 'EmptySample.nothing' has a blank body.");
    }

    #[test]
    fn test_syntax_error() {
        let err = extract_samples(&SourceFile::new("BadSample.kt", "class BadSample {\n").unwrap()).unwrap_err();
        assert!(matches!(err, ExtractError::Syntax { path, .. } if path == "BadSample.kt"));
    }
}
