//! Sample registry: the named sample sources and the shape each one is expected to have.
//!
//! ## Notes
//! - Insertion order is the listing order; identifiers are unique.
//! - A registry is built once ([`SampleRegistry::builtin`], [`SampleRegistry::discover`] or
//!   repeated [`SampleRegistry::register`] calls) and only read afterwards.
//!
//! ## Module Structure
//!
//! - `builtin` - fixture set embedded in the binary
//! - `discover` - filesystem discovery

mod builtin;
mod discover;

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use sampledoc_core::lang::languages;
use sampledoc_core::naming::qualified_name;
use sampledoc_core::{LanguageId, Visibility};
use sampledoc_syntax::{ClassKind, parser};
use thiserror::Error;

pub use discover::{discover_source_files, expected_java_package};
pub(crate) use discover::relative_path;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate sample identifier '{0}'")]
    DuplicateIdentifier(String),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A source file, addressed by its `/`-separated path relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub relative_path: String,
    pub language: LanguageId,
    pub text: String,
}

impl SourceFile {
    /// Returns `None` when the extension is not a supported language, or when the path is not
    /// relative (absolute, or with `.`/`..` components).
    pub fn new(relative_path: impl Into<String>, text: impl Into<String>) -> Option<Self> {
        let relative_path = relative_path.into();
        let path = Path::new(&relative_path);
        if !path.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        let language = languages::from_path(path)?;
        Some(Self {
            relative_path,
            language,
            text: text.into(),
        })
    }

    pub fn file_stem(&self) -> &str {
        Path::new(&self.relative_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// Expected shape of a class nested in the sample class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedClassDescriptor {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub identifier: String,
    pub source: SourceFile,
    /// Expected package declaration, `None` for the default package
    pub package: Option<String>,
    /// Expected public top-level class
    pub class_name: String,
    pub nested_classes: Vec<NestedClassDescriptor>,
    /// Sources compiled alongside the sample
    pub support_sources: Vec<SourceFile>,
}

impl Sample {
    /// Sample named after its relative path, with the class name taken from the file stem and
    /// no package or nested-class expectations.
    pub fn new(source: SourceFile) -> Self {
        Self {
            identifier: source.relative_path.clone(),
            class_name: source.file_stem().to_string(),
            source,
            package: None,
            nested_classes: Vec::new(),
            support_sources: Vec::new(),
        }
    }

    /// Sample whose expectations are derived from its location and content.
    ///
    /// ## Notes
    /// - Java: the package is the directory path below the `java` source root.
    /// - Kotlin: the package is whatever the file declares.
    /// - Nested classes: those declared in the expected class. A source that does not parse gets
    ///   no nested expectations; the syntax error surfaces when the sample is run.
    pub fn from_source(source: SourceFile) -> Self {
        let outline = parser::parse(source.language, &source.text).ok();
        let package = match source.language {
            LanguageId::Java => expected_java_package(&source.relative_path),
            LanguageId::Kotlin => outline
                .as_ref()
                .and_then(|o| o.package_name())
                .map(str::to_string),
        };

        let mut sample = Self::new(source).with_package(package);
        if let Some(class) = outline.as_ref().and_then(|o| o.find_class(&sample.class_name)) {
            sample.nested_classes = class
                .nested
                .iter()
                .filter(|n| n.kind != ClassKind::CompanionObject)
                .map(|n| NestedClassDescriptor {
                    name: n.name.clone(),
                    visibility: n.visibility,
                    is_static: n.is_static(),
                })
                .collect();
        }
        sample
    }

    pub fn with_package(mut self, package: Option<String>) -> Self {
        self.package = package.filter(|p| !p.is_empty());
        self
    }

    pub fn with_nested(mut self, nested: NestedClassDescriptor) -> Self {
        self.nested_classes.push(nested);
        self
    }

    pub fn with_support(mut self, source: SourceFile) -> Self {
        self.support_sources.push(source);
        self
    }

    pub fn language(&self) -> LanguageId {
        self.source.language
    }

    /// Fully qualified name of the expected class.
    pub fn qualified_class_name(&self) -> String {
        qualified_name(self.package.as_deref(), &self.class_name)
    }
}

/// Ordered, identifier-unique collection of samples.
#[derive(Debug, Clone, Default)]
pub struct SampleRegistry {
    samples: Vec<Sample>,
    index: HashMap<String, usize>,
}

impl SampleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample at the end of the listing.
    ///
    /// ## Errors
    /// [`RegistryError::DuplicateIdentifier`] when the identifier is already registered.
    pub fn register(&mut self, sample: Sample) -> Result<(), RegistryError> {
        if self.index.contains_key(&sample.identifier) {
            return Err(RegistryError::DuplicateIdentifier(sample.identifier));
        }
        self.index.insert(sample.identifier.clone(), self.samples.len());
        self.samples.push(sample);
        Ok(())
    }

    /// Every sample, in insertion order.
    pub fn list(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, identifier: &str) -> Option<&Sample> {
        self.index.get(identifier).map(|&i| &self.samples[i])
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples whose identifier contains `keyword`, in insertion order.
    pub fn select(&self, keyword: &str) -> Vec<&Sample> {
        self.samples.iter().filter(|s| s.identifier.contains(keyword)).collect()
    }

    /// The fixture set embedded in the binary.
    pub fn builtin() -> Self {
        builtin::registry()
    }

    /// Walk `root` and register every sample source found, sorted by path.
    ///
    /// Non-sample sources under `root` become support sources of every sample.
    ///
    /// ## Errors
    /// [`RegistryError::Io`] when a file cannot be read.
    #[tracing::instrument(skip_all, fields(root = %root.display()))]
    pub fn discover(root: &Path) -> Result<Self, RegistryError> {
        discover::registry(root)
    }
}
