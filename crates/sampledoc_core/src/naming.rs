//! Naming rules for qualified names, sample identifiers and sample paths.
//!
//! ## Notes
//! - A *sample identifier* is the qualified name of a sample function (`sample.IntSample.addition`).
//!   Its path is the identifier with dots replaced by `/`, plus `.md`.
//!
//! ## Examples
//! ```rust
//! use sampledoc_core::naming::SampleIdentifier;
//!
//! let id = SampleIdentifier::parse("test.IntSample.addition").unwrap();
//! assert_eq!(id.to_sample_path().as_str(), "test/IntSample/addition.md");
//! ```

use std::fmt;

use crate::conventions::MARKDOWN_EXTENSION;

/// Error produced when a name does not follow its naming rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    BlankSampleIdentifier,
    InvalidSampleIdentifier(String),
    InvalidSamplePath(String),
}

impl fmt::Display for NamingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingError::BlankSampleIdentifier => write!(f, "Sample identifier can't be blank."),
            NamingError::InvalidSampleIdentifier(text) => write!(
                f,
                "Sample identifier must contain identifiers separated by dots (was: {text})."
            ),
            NamingError::InvalidSamplePath(text) => {
                write!(f, "Sample path must end with 'md' file extension (was: {text}).")
            }
        }
    }
}

impl std::error::Error for NamingError {}

/// Join an optional package and a simple name into a qualified name.
pub fn qualified_name(package: Option<&str>, name: &str) -> String {
    match package {
        Some(package) if !package.is_empty() => format!("{package}.{name}"),
        _ => name.to_string(),
    }
}

fn is_identifier_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Qualified name of a sample function, unique across a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleIdentifier(String);

impl SampleIdentifier {
    /// Parse a sample identifier from its textual form.
    ///
    /// ## Errors
    /// - [`NamingError::BlankSampleIdentifier`] when `text` is blank.
    /// - [`NamingError::InvalidSampleIdentifier`] when a segment is empty or not an identifier.
    pub fn parse(text: &str) -> Result<Self, NamingError> {
        if text.trim().is_empty() {
            return Err(NamingError::BlankSampleIdentifier);
        }
        if !text.split('.').all(is_identifier_segment) {
            return Err(NamingError::InvalidSampleIdentifier(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    /// Build the identifier of `function` declared in `class`, optionally inside `package`.
    pub fn of_function(package: Option<&str>, class: &str, function: &str) -> Result<Self, NamingError> {
        let class = qualified_name(package, class);
        Self::parse(&format!("{class}.{function}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Relative path of the extracted Markdown file for this sample.
    pub fn to_sample_path(&self) -> SamplePath {
        SamplePath(format!("{}.{MARKDOWN_EXTENSION}", self.0.replace('.', "/")))
    }
}

impl fmt::Display for SampleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relative, `/`-separated path of an extracted sample file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SamplePath(String);

impl SamplePath {
    /// ## Errors
    /// Returns [`NamingError::InvalidSamplePath`] if `text` doesn't end with `.md`.
    pub fn parse(text: &str) -> Result<Self, NamingError> {
        let suffix = format!(".{MARKDOWN_EXTENSION}");
        if text.len() <= suffix.len() || !text.ends_with(&suffix) {
            return Err(NamingError::InvalidSamplePath(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SamplePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
