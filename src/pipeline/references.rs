//! Sample references (`SAMPLE: [identifier]`) in Kotlin main sources.
//!
//! Inlining replaces a reference line with the lines of the extracted sample:
//!
//! ```text
//! /** SAMPLE: [demo.IntSample.addition] */     /**
//!                                          →     * ```kotlin
//!                                                * val x = 1
//!                                                * ```
//!                                                */
//! ```
//!
//! Any other reference line keeps the text before `SAMPLE: [` as the prefix of every sample line.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sampledoc_core::LanguageId;
use sampledoc_core::conventions::{SAMPLE_REFERENCE_END, SAMPLE_REFERENCE_KEYWORD, is_sample_file_stem};
use sampledoc_core::errors::sample_not_found;
use sampledoc_core::naming::SampleIdentifier;
use thiserror::Error;

use super::{FileError, read_sources, write_file};
use crate::registry::SourceFile;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error("Errors found while checking sample references: {} not found.", .0.join(", "))]
    SamplesNotFound(Vec<String>),
}

/// Where inlined sources are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTarget<'a> {
    /// Overwrite the sources that changed
    InPlace,
    /// Mirror every source below this directory
    Directory(&'a Path),
}

/// A reference found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReference {
    pub identifier: String,
    /// 1-based
    pub line: usize,
}

/// The identifier referenced by `line`, if any.
pub fn parse_reference(line: &str) -> Option<&str> {
    let start = line.find(SAMPLE_REFERENCE_KEYWORD)? + SAMPLE_REFERENCE_KEYWORD.len();
    let rest = &line[start..];
    let end = rest.find(SAMPLE_REFERENCE_END)?;
    Some(rest[..end].trim())
}

/// Every reference in `text`, in line order.
pub fn find_references(text: &str) -> Vec<SampleReference> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            parse_reference(line).map(|identifier| SampleReference {
                identifier: identifier.to_string(),
                line: i + 1,
            })
        })
        .collect()
}

/// Kotlin sources that may reference samples (sample sources themselves excluded).
fn referencing_sources(source_dir: &Path) -> Result<Vec<SourceFile>, FileError> {
    read_sources(source_dir, |s| {
        s.language == LanguageId::Kotlin && !is_sample_file_stem(s.file_stem())
    })
}

fn sample_file(samples_dir: &Path, identifier: &str) -> Option<PathBuf> {
    let identifier = SampleIdentifier::parse(identifier).ok()?;
    Some(samples_dir.join(identifier.to_sample_path().as_str()))
}

/// Verify that every referenced sample was extracted into `samples_dir`.
///
/// Each missing sample is logged as `'<identifier>' sample not found.`. Returns the number of
/// distinct identifiers referenced.
///
/// ## Errors
/// [`ReferenceError::SamplesNotFound`] listing the missing identifiers, sorted.
#[tracing::instrument(skip_all, fields(source_dir = %source_dir.display(), samples_dir = %samples_dir.display()))]
pub fn check_references(source_dir: &Path, samples_dir: &Path) -> Result<usize, ReferenceError> {
    let identifiers: BTreeSet<String> = referencing_sources(source_dir)?
        .iter()
        .flat_map(|s| find_references(&s.text))
        .map(|r| r.identifier)
        .collect();

    let missing: Vec<String> = identifiers
        .iter()
        .filter(|id| !sample_file(samples_dir, id).is_some_and(|p| p.is_file()))
        .cloned()
        .collect();
    for identifier in &missing {
        tracing::error!("{}", sample_not_found(identifier));
    }
    if !missing.is_empty() {
        return Err(ReferenceError::SamplesNotFound(missing));
    }
    tracing::info!(count = identifiers.len(), "sample references checked");
    Ok(identifiers.len())
}

/// Replace every reference line of `text` whose sample `lookup` knows.
///
/// Lines referencing unknown samples are kept as they are. A trailing newline is preserved.
pub fn inline_text(text: &str, lookup: impl Fn(&str) -> Option<Vec<String>>) -> String {
    let mut lines = Vec::new();
    for line in text.lines() {
        let sample = parse_reference(line).and_then(&lookup);
        match sample {
            Some(sample) => lines.push(inline_line(line, &sample)),
            None => lines.push(line.to_string()),
        }
    }
    let mut inlined = lines.join("\n");
    if text.ends_with('\n') {
        inlined.push('\n');
    }
    inlined
}

fn inline_line(line: &str, sample: &[String]) -> String {
    if let (Some(open), true) = (line.find("/** "), line.contains(" */")) {
        let indent = &line[..open];
        let mut kdoc = vec![format!("{indent}/**")];
        kdoc.extend(sample.iter().map(|l| format!("{indent} * {l}")));
        kdoc.push(format!("{indent} */"));
        return kdoc.join("\n");
    }
    let prefix = line.find(SAMPLE_REFERENCE_KEYWORD).map_or("", |i| &line[..i]);
    sample
        .iter()
        .map(|l| format!("{prefix}{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inline the samples of `samples_dir` into the Kotlin sources of `source_dir`.
///
/// Returns the number of files written.
///
/// ## Errors
/// [`ReferenceError::File`] when a source or sample cannot be read, or an output written.
#[tracing::instrument(skip_all, fields(source_dir = %source_dir.display(), samples_dir = %samples_dir.display()))]
pub fn inline_samples(source_dir: &Path, samples_dir: &Path, target: InlineTarget<'_>) -> Result<usize, ReferenceError> {
    let sources = referencing_sources(source_dir)?;

    let mut samples: HashMap<String, Vec<String>> = HashMap::new();
    for reference in sources.iter().flat_map(|s| find_references(&s.text)) {
        if samples.contains_key(&reference.identifier) {
            continue;
        }
        let Some(path) = sample_file(samples_dir, &reference.identifier) else {
            continue;
        };
        match fs::read_to_string(&path) {
            Ok(text) => {
                samples.insert(reference.identifier, text.lines().map(str::to_string).collect());
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("{}", sample_not_found(&reference.identifier));
            }
            Err(source) => return Err(FileError { path, source }.into()),
        }
    }

    let mut written = 0;
    for source in &sources {
        let inlined = inline_text(&source.text, |id| samples.get(id).cloned());
        let destination = match target {
            InlineTarget::InPlace if inlined == source.text => continue,
            InlineTarget::InPlace => source_dir.join(&source.relative_path),
            InlineTarget::Directory(dir) => dir.join(&source.relative_path),
        };
        write_file(&destination, &inlined)?;
        tracing::debug!(path = %source.relative_path, "inlined");
        written += 1;
    }
    tracing::info!(files = written, "samples inlined");
    Ok(written)
}
