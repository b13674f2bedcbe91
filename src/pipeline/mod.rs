//! Documentation pipeline: samples become Markdown blocks inlined into KDoc.
//!
//! ```text
//! check → extract → check references → backup → inline
//! ```
//!
//! [`prepare`] runs every stage in that order over a [`LayoutConfig`]; `restore` undoes the
//! in-place inlining from the backup.
//!
//! ## Module Structure
//!
//! - `check` - documentation-shape rules for sample sources
//! - `extract` - sample functions to `<identifier path>.md`
//! - `references` - `SAMPLE: [identifier]` markers: lookup and inlining
//! - `backup` - main-sources backup and restore

pub mod backup;
pub mod check;
pub mod extract;
pub mod references;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::LayoutConfig;
use crate::registry::{SourceFile, discover_source_files, relative_path};

pub use backup::{BackupError, backup_sources, restore_sources};
pub use check::{CheckError, CheckReport, IssueKind, SourceIssue, check_sources};
pub use extract::{ExtractError, ExtractedSample, extract_dir, extract_samples};
pub use references::{InlineTarget, ReferenceError, check_references, find_references, inline_samples, inline_text};

/// A file or directory operation failed.
#[derive(Debug, Error)]
#[error("failed to access '{}': {source}", .path.display())]
pub struct FileError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FileError {
    pub(crate) fn at(path: &Path) -> impl FnOnce(io::Error) -> FileError + '_ {
        move |source| FileError {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read the supported sources under `root` that `keep` accepts, sorted by path.
fn read_sources(root: &Path, keep: impl Fn(&SourceFile) -> bool) -> Result<Vec<SourceFile>, FileError> {
    let mut sources = Vec::new();
    for path in discover_source_files(root) {
        let text = fs::read_to_string(&path).map_err(FileError::at(&path))?;
        if let Some(source) = SourceFile::new(relative_path(root, &path), text) {
            if keep(&source) {
                sources.push(source);
            }
        }
    }
    Ok(sources)
}

/// Write `contents` to `path`, creating parent directories.
fn write_file(path: &Path, contents: &str) -> Result<(), FileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(FileError::at(parent))?;
    }
    fs::write(path, contents).map_err(FileError::at(path))
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Check(#[from] CheckError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Backup(#[from] BackupError),
}

/// What [`prepare`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    pub checked: usize,
    pub extracted: usize,
    pub backed_up: usize,
    pub inlined_files: usize,
}

/// Check, extract, verify references, back up and inline in place.
///
/// Stops at the first failing stage; nothing is inlined unless every earlier stage succeeded.
///
/// ## Errors
/// The error of the first failing stage.
#[tracing::instrument(skip_all, fields(source_dir = %layout.source_dir.display()))]
pub fn prepare(layout: &LayoutConfig) -> Result<PrepareSummary, PipelineError> {
    let checked = check_sources(&layout.source_dir)?.into_result()?;
    let extracted = extract_dir(&layout.source_dir, &layout.extracted_dir)?;
    check_references(&layout.source_dir, &layout.extracted_dir)?;
    let backed_up = backup_sources(&layout.source_dir, &layout.backup_dir, &layout.backup_excluded)?;
    let inlined_files = inline_samples(&layout.source_dir, &layout.extracted_dir, InlineTarget::InPlace)?;

    let summary = PrepareSummary {
        checked,
        extracted: extracted.len(),
        backed_up,
        inlined_files,
    };
    tracing::info!(?summary, "sources prepared");
    Ok(summary)
}
