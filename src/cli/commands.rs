//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sampledoc_core::lang::languages;
use sampledoc_syntax::parser;

use super::{CliError, CliResult, ExitCode, ReportFormat};
use crate::adapter::{CompileOnlyToolchain, JvmToolchain, Toolchain};
use crate::config::{HarnessConfig, LayoutConfig};
use crate::pipeline::{self, InlineTarget};
use crate::registry::SampleRegistry;
use crate::report::{ConsoleReporter, JsonReporter, Reporter, report};
use crate::runner::{RunOptions, run_samples};

// ============================================================================
// Samples
// ============================================================================

/// Settings of the `test` command.
#[derive(Debug, Clone, Default)]
pub struct TestSettings {
    /// Directory to discover samples in; the built-in fixtures when `None`
    pub path: Option<PathBuf>,
    pub verbose: bool,
    pub stop_on_fail: bool,
    pub filter: Option<String>,
    pub dry_run: bool,
    pub format: ReportFormat,
    /// Seconds; `Some(0)` disables the timeout
    pub timeout: Option<u64>,
}

/// Build the registry: discovered under `path`, or the built-in fixtures.
pub fn load_registry(path: Option<&Path>) -> CliResult<SampleRegistry> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::failure(format!("Path not found: {}", path.display())));
            }
            SampleRegistry::discover(path).map_err(|e| CliError::failure(format!("Error discovering samples: {e}")))
        }
        None => Ok(SampleRegistry::builtin()),
    }
}

/// Environment configuration with the `--timeout` override (`Some(0)` disables the timeout).
pub fn harness_config(timeout: Option<u64>) -> HarnessConfig {
    let config = HarnessConfig::from_env();
    match timeout {
        Some(secs) => config.with_timeout((secs > 0).then(|| Duration::from_secs(secs))),
        None => config,
    }
}

/// Start the JVM toolchain. An unusable JDK is only logged: samples then fail one by one.
pub fn jvm_toolchain(config: HarnessConfig) -> CliResult<JvmToolchain> {
    let jvm = JvmToolchain::new(config).map_err(|e| CliError::failure(format!("Error starting toolchain: {e}")))?;
    if let Err(e) = jvm.probe() {
        tracing::warn!(error = %e, "JVM toolchain unavailable; samples will fail with toolchain errors");
    }
    if jvm.kotlin_stdlib().is_none() {
        tracing::debug!("kotlin-stdlib not found; Kotlin samples and support sources may not run");
    }
    Ok(jvm)
}

fn toolchain(settings: &TestSettings) -> CliResult<Box<dyn Toolchain>> {
    if settings.dry_run {
        return Ok(Box::new(CompileOnlyToolchain));
    }
    Ok(Box::new(jvm_toolchain(harness_config(settings.timeout))?))
}

/// Run the samples and report them. Fails (exit 1) when any sample failed.
pub fn run_tests(settings: &TestSettings) -> CliResult<ExitCode> {
    let registry = load_registry(settings.path.as_deref())?;
    let toolchain = toolchain(settings)?;
    let options = RunOptions::new()
        .with_stop_on_fail(settings.stop_on_fail)
        .with_filter(settings.filter.clone());

    let mut reporter: Box<dyn Reporter> = match settings.format {
        ReportFormat::Console => Box::new(ConsoleReporter::new(settings.verbose)),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    };
    let outcomes = run_samples(&registry, toolchain.as_ref(), reporter.as_mut(), &options)
        .map_err(|e| CliError::failure(format!("Error writing report: {e}")))?;

    let summary = report(&outcomes);
    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Summary already printed
        Err(CliError::new("", ExitCode(summary.exit_code())))
    }
}

/// Print every sample with its language and expected class.
pub fn list_samples(path: Option<&Path>) -> CliResult<ExitCode> {
    let registry = load_registry(path)?;
    if registry.is_empty() {
        eprintln!("No samples found");
        return Ok(ExitCode::SUCCESS);
    }
    for sample in registry.list() {
        let mut line = format!(
            "{} [{}] {}",
            sample.identifier,
            sample.language(),
            sample.qualified_class_name()
        );
        for nested in &sample.nested_classes {
            let statik = if nested.is_static { " static" } else { "" };
            line.push_str(&format!(" ({}{statik} {})", nested.visibility, nested.name));
        }
        println!("{line}");
    }
    println!("\n{} sample(s)", registry.len());
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Documentation pipeline
// ============================================================================

fn require_dir(path: &Path) -> CliResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CliError::failure(format!("Directory not found: {}", path.display())))
    }
}

/// Check the content of sample sources.
pub fn check(path: &Path) -> CliResult<ExitCode> {
    require_dir(path)?;
    let checked = pipeline::check_sources(path)
        .and_then(|report| report.into_result())
        .map_err(|e| CliError::failure(e.to_string()))?;
    println!("✓ {checked} sample source(s) checked");
    Ok(ExitCode::SUCCESS)
}

/// Extract sample functions into `output_dir`.
pub fn extract(source_dir: &Path, output_dir: &Path) -> CliResult<ExitCode> {
    require_dir(source_dir)?;
    let written = pipeline::extract_dir(source_dir, output_dir).map_err(|e| CliError::failure(e.to_string()))?;
    println!("✓ {} sample(s) extracted to {}", written.len(), output_dir.display());
    Ok(ExitCode::SUCCESS)
}

/// Check that every sample referenced from `source_dir` exists in `samples_dir`.
pub fn check_refs(source_dir: &Path, samples_dir: &Path) -> CliResult<ExitCode> {
    require_dir(source_dir)?;
    let count = pipeline::check_references(source_dir, samples_dir).map_err(|e| CliError::failure(e.to_string()))?;
    println!("✓ {count} sample reference(s) resolved");
    Ok(ExitCode::SUCCESS)
}

/// Inline samples in place, or into `output`.
pub fn inline(source_dir: &Path, samples_dir: &Path, output: Option<&Path>) -> CliResult<ExitCode> {
    require_dir(source_dir)?;
    require_dir(samples_dir)?;
    let target = match output {
        Some(dir) => InlineTarget::Directory(dir),
        None => InlineTarget::InPlace,
    };
    let written =
        pipeline::inline_samples(source_dir, samples_dir, target).map_err(|e| CliError::failure(e.to_string()))?;
    println!("✓ {written} file(s) written");
    Ok(ExitCode::SUCCESS)
}

/// Run the whole pipeline in place.
pub fn prepare(source_dir: &Path, extracted_dir: &Path, backup_dir: &Path) -> CliResult<ExitCode> {
    require_dir(source_dir)?;
    let layout = LayoutConfig::new()
        .with_source_dir(source_dir)
        .with_extracted_dir(extracted_dir)
        .with_backup_dir(backup_dir);
    let summary = pipeline::prepare(&layout).map_err(|e| CliError::failure(e.to_string()))?;
    println!(
        "✓ {} sample source(s) checked, {} sample(s) extracted, {} file(s) backed up, {} file(s) inlined",
        summary.checked, summary.extracted, summary.backed_up, summary.inlined_files
    );
    Ok(ExitCode::SUCCESS)
}

/// Copy the backup back over the sources.
pub fn restore(source_dir: &Path, backup_dir: &Path) -> CliResult<ExitCode> {
    let restored = pipeline::restore_sources(source_dir, backup_dir).map_err(|e| CliError::failure(e.to_string()))?;
    println!("✓ {restored} file(s) restored");
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Debug
// ============================================================================

/// Print the outline of a source file, or its syntax errors with source context.
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    let language = languages::from_path(path)
        .ok_or_else(|| CliError::failure(format!("Not a Java or Kotlin file: {}", path.display())))?;
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading {}: {e}", path.display())))?;

    match parser::parse(language, &source) {
        Ok(outline) => {
            println!("{outline:#?}");
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            let name = path.display().to_string();
            for error in errors {
                eprintln!("{:?}", error.to_report(&name, &source));
            }
            Err(CliError::new("", ExitCode::FAILURE))
        }
    }
}
