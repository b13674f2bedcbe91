//! Shared sampledoc conventions (well-known names and locations).

/// Suffix a file stem must carry to be treated as a sample source.
pub const SAMPLE_SUFFIX: &str = "Sample";

/// Marker introducing a sample reference inside a documentation comment.
pub const SAMPLE_REFERENCE_KEYWORD: &str = "SAMPLE: [";

/// Closing delimiter of a sample reference.
pub const SAMPLE_REFERENCE_END: char = ']';

/// Extension of extracted sample files.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Annotation marking a test method in a sample class.
pub const TEST_ANNOTATION: &str = "Test";

/// Source-set directory whose samples are deprecated in favour of the `test` source set.
pub const DEPRECATED_SAMPLE_SOURCE_SET: &str = "sample";

/// Top-level source directories never copied by the main-sources backup.
pub const BACKUP_EXCLUDED_DIRS: &[&str] = &["api", "sample", "test"];

/// Directory names skipped while walking source trees.
pub const SKIPPED_DIRS: &[&str] = &["build", "target", "node_modules"];

/// Default location of project sources.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Default output directory for extracted samples.
pub const DEFAULT_EXTRACTED_DIR: &str = "build/sampledoc/extracted";

/// Default location of the main-sources backup taken before inlining.
pub const DEFAULT_BACKUP_DIR: &str = "build/sampledoc/sources-backup";

/// Check whether a file stem names a sample source.
pub fn is_sample_file_stem(stem: &str) -> bool {
    stem.ends_with(SAMPLE_SUFFIX)
}
