//! Shared user-facing messages.
//!
//! The harness, the source check and the reference check all report through these builders so the
//! wording stays identical wherever a problem is detected.

use crate::lang::languages::LanguageId;

/// Describe a sample source in messages: `'<path>' Java sample source`.
pub fn sample_source_subject(path: &str, language: LanguageId) -> String {
    format!("'{path}' {language} sample source")
}

pub fn multiple_classes_found(subject: &str) -> String {
    format!("Multiple classes found in {subject}.")
}

pub fn no_public_class_found(subject: &str) -> String {
    format!("No public class found in {subject}.")
}

pub fn single_expression_function_found(subject: &str) -> String {
    format!("Single-expression Kotlin function found in {subject}.")
}

pub fn top_level_function_found(subject: &str) -> String {
    format!("Top-level function found in {subject}.")
}

pub fn sample_not_found(identifier: &str) -> String {
    format!("'{identifier}' sample not found.")
}

/// Deprecation notice logged when samples live in the `sample` source set.
pub const DEPRECATED_SAMPLE_SOURCE_SET_NOTICE: &str = "The 'sample' source set is deprecated. Please move your \
     samples to the 'test' source set and suffix their file name with 'Sample'.";
