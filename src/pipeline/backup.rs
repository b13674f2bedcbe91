//! Backup of main sources before in-place inlining, and restore afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::FileError;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error("no backup found at '{}'", .0.display())]
    MissingBackup(PathBuf),
}

/// Copy `source_dir` into `backup_dir`, leaving out the top-level directories named in
/// `excluded`. A previous backup is deleted first.
///
/// Returns the number of files copied.
///
/// ## Errors
/// [`BackupError::File`] when a file cannot be read, copied or deleted.
#[tracing::instrument(skip_all, fields(source_dir = %source_dir.display(), backup_dir = %backup_dir.display()))]
pub fn backup_sources(source_dir: &Path, backup_dir: &Path, excluded: &[String]) -> Result<usize, BackupError> {
    if backup_dir.exists() {
        tracing::debug!("deleting stale backup");
        fs::remove_dir_all(backup_dir).map_err(FileError::at(backup_dir))?;
    }
    let copied = copy_tree(source_dir, backup_dir, excluded)?;
    tracing::info!(files = copied, "sources backed up");
    Ok(copied)
}

/// Copy the backup in `backup_dir` back over `source_dir`.
///
/// Returns the number of files restored.
///
/// ## Errors
/// - [`BackupError::MissingBackup`] when `backup_dir` is not a directory.
/// - [`BackupError::File`] when a file cannot be copied.
#[tracing::instrument(skip_all, fields(source_dir = %source_dir.display(), backup_dir = %backup_dir.display()))]
pub fn restore_sources(source_dir: &Path, backup_dir: &Path) -> Result<usize, BackupError> {
    if !backup_dir.is_dir() {
        return Err(BackupError::MissingBackup(backup_dir.to_path_buf()));
    }
    let restored = copy_tree(backup_dir, source_dir, &[])?;
    tracing::info!(files = restored, "sources restored");
    Ok(restored)
}

/// Recursively copy `from` into `to`; `skip` applies to the entries of `from` only.
fn copy_tree(from: &Path, to: &Path, skip: &[String]) -> Result<usize, FileError> {
    fs::create_dir_all(to).map_err(FileError::at(to))?;
    let mut entries: Vec<_> = fs::read_dir(from)
        .map_err(FileError::at(from))?
        .collect::<Result<_, _>>()
        .map_err(FileError::at(from))?;
    entries.sort_by_key(|e| e.file_name());

    let mut copied = 0;
    for entry in entries {
        let name = entry.file_name();
        if skip.iter().any(|s| name.to_str() == Some(s.as_str())) {
            continue;
        }
        let source = entry.path();
        let target = to.join(&name);
        if source.is_dir() {
            copied += copy_tree(&source, &target, &[])?;
        } else {
            fs::copy(&source, &target).map_err(FileError::at(&source))?;
            copied += 1;
        }
    }
    Ok(copied)
}
