//! Filesystem discovery of sample sources.

use std::fs;
use std::path::{Path, PathBuf};

use sampledoc_core::conventions::{SKIPPED_DIRS, is_sample_file_stem};
use sampledoc_core::lang::languages;

use super::{RegistryError, Sample, SampleRegistry, SourceFile};

/// Source directory name below which Java directories mirror packages.
const JAVA_SOURCE_ROOT: &str = "java";

pub(super) fn registry(root: &Path) -> Result<SampleRegistry, RegistryError> {
    let files = discover_source_files(root);
    let mut samples = Vec::new();
    let mut support = Vec::new();

    for path in files {
        let text = fs::read_to_string(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;
        let relative = relative_path(root, &path);
        let Some(source) = SourceFile::new(relative, text) else {
            continue;
        };
        if is_sample_file_stem(source.file_stem()) {
            samples.push(source);
        } else {
            support.push(source);
        }
    }

    let mut registry = SampleRegistry::new();
    for source in samples {
        let mut sample = Sample::from_source(source);
        sample.support_sources = support.clone();
        tracing::debug!(sample = %sample.identifier, package = ?sample.package, "discovered sample");
        registry.register(sample)?;
    }
    tracing::info!(count = registry.len(), "sample discovery complete");
    Ok(registry)
}

/// Recursively collect Java and Kotlin sources under `path`, sorted.
///
/// Hidden directories and build output directories are skipped. A file path is returned as is
/// when it has a supported extension.
pub fn discover_source_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if path.is_file() {
        if languages::from_path(path).is_some() {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if entry_path.is_dir() {
                    if !name.starts_with('.') && !SKIPPED_DIRS.contains(&name) {
                        files.extend(discover_source_files(&entry_path));
                    }
                } else if languages::from_path(&entry_path).is_some() {
                    files.push(entry_path);
                }
            }
        }
    }
    files.sort();
    files
}

/// `/`-separated path of `path` relative to `root` (the file name when `root` is the file).
pub(crate) fn relative_path(root: &Path, path: &Path) -> String {
    let relative = match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        _ => Path::new(path.file_name().unwrap_or(path.as_os_str())),
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Package a Java source is expected to declare, given its relative path.
///
/// The directories below the last `java` directory name the package; without a `java`
/// directory, all directories of the relative path do.
///
/// ## Examples
/// ```rust
/// use sampledoc::registry::expected_java_package;
///
/// assert_eq!(expected_java_package("src/test/java/org/demo/FooSample.java").as_deref(), Some("org.demo"));
/// assert_eq!(expected_java_package("sample/BarSample.java").as_deref(), Some("sample"));
/// assert_eq!(expected_java_package("BazSample.java"), None);
/// ```
pub fn expected_java_package(relative_path: &str) -> Option<String> {
    let mut dirs: Vec<&str> = relative_path.split('/').collect();
    dirs.pop();
    if let Some(root) = dirs.iter().rposition(|d| *d == JAVA_SOURCE_ROOT) {
        dirs.drain(..=root);
    }
    if dirs.is_empty() { None } else { Some(dirs.join(".")) }
}
