//! CLI module for sampledoc
//!
//! ## Commands
//!
//! - `test [PATH]` - Compile and run samples (pytest-style report)
//! - `list [PATH]` - List samples and their expected class
//! - `check [PATH]` - Check the documentation shape of sample sources
//! - `extract` - Extract sample functions as Markdown
//! - `check-refs` - Verify `SAMPLE: [id]` references
//! - `inline` - Inline referenced samples into KDoc
//! - `prepare` / `restore` - Full in-place pipeline, and its undo
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use sampledoc_core::conventions::{DEFAULT_BACKUP_DIR, DEFAULT_EXTRACTED_DIR, DEFAULT_SOURCE_DIR};

use crate::version::SAMPLEDOC_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Verify JVM sample sources and inline them into API documentation
#[derive(Parser, Debug)]
#[command(name = "sampledoc")]
#[command(version = SAMPLEDOC_VERSION)]
#[command(about = "Verify JVM sample sources and inline them into API documentation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    // Debug/development flags
    /// Print the declaration outline of a Java or Kotlin file (debug)
    #[arg(long = "parse", value_name = "FILE")]
    pub parse_file: Option<PathBuf>,
}

/// Output format of `test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Console,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile samples and run their tests (pytest-style)
    Test {
        /// Directory to discover samples in (default: the built-in fixtures)
        #[arg(value_name = "PATH", conflicts_with = "builtin")]
        path: Option<PathBuf>,
        /// Use the built-in fixture set
        #[arg(long)]
        builtin: bool,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
        /// Stop on first failure
        #[arg(short = 'x', long = "exitfirst")]
        stop_on_fail: bool,
        /// Filter samples by keyword expression
        #[arg(short = 'k', value_name = "EXPR")]
        filter: Option<String>,
        /// Only run the structural checks; report valid samples as skipped
        #[arg(long)]
        dry_run: bool,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
        format: ReportFormat,
        /// Maximum duration of each external process, in seconds (0 disables)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// List samples and the class each one must declare
    List {
        /// Directory to discover samples in (default: the built-in fixtures)
        #[arg(value_name = "PATH", conflicts_with = "builtin")]
        path: Option<PathBuf>,
        /// Use the built-in fixture set
        #[arg(long)]
        builtin: bool,
    },

    /// Check the content of sample sources
    Check {
        #[arg(value_name = "PATH", default_value = DEFAULT_SOURCE_DIR)]
        path: PathBuf,
    },

    /// Extract sample functions as Markdown code blocks
    Extract {
        #[arg(value_name = "SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
        source_dir: PathBuf,
        #[arg(value_name = "OUTPUT_DIR", default_value = DEFAULT_EXTRACTED_DIR)]
        output_dir: PathBuf,
    },

    /// Check that every sample reference has an extracted sample
    CheckRefs {
        #[arg(value_name = "SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
        source_dir: PathBuf,
        #[arg(value_name = "SAMPLES_DIR", default_value = DEFAULT_EXTRACTED_DIR)]
        samples_dir: PathBuf,
    },

    /// Inline referenced samples into KDoc
    Inline {
        #[arg(value_name = "SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
        source_dir: PathBuf,
        #[arg(value_name = "SAMPLES_DIR", default_value = DEFAULT_EXTRACTED_DIR)]
        samples_dir: PathBuf,
        /// Write inlined sources here instead of in place
        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Check, extract, check references, back up and inline in place
    Prepare {
        #[arg(value_name = "SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
        source_dir: PathBuf,
        #[arg(long, value_name = "DIR", default_value = DEFAULT_EXTRACTED_DIR)]
        extracted_dir: PathBuf,
        #[arg(long, value_name = "DIR", default_value = DEFAULT_BACKUP_DIR)]
        backup_dir: PathBuf,
    },

    /// Restore sources from the backup taken by `prepare`
    Restore {
        #[arg(value_name = "SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
        source_dir: PathBuf,
        #[arg(long, value_name = "DIR", default_value = DEFAULT_BACKUP_DIR)]
        backup_dir: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }

    match cli.command {
        Some(Command::Test {
            path,
            builtin: _,
            verbose,
            stop_on_fail,
            filter,
            dry_run,
            format,
            timeout,
        }) => commands::run_tests(&commands::TestSettings {
            path,
            verbose,
            stop_on_fail,
            filter,
            dry_run,
            format,
            timeout,
        }),
        Some(Command::List { path, builtin: _ }) => commands::list_samples(path.as_deref()),
        Some(Command::Check { path }) => commands::check(&path),
        Some(Command::Extract { source_dir, output_dir }) => commands::extract(&source_dir, &output_dir),
        Some(Command::CheckRefs {
            source_dir,
            samples_dir,
        }) => commands::check_refs(&source_dir, &samples_dir),
        Some(Command::Inline {
            source_dir,
            samples_dir,
            output,
        }) => commands::inline(&source_dir, &samples_dir, output.as_deref()),
        Some(Command::Prepare {
            source_dir,
            extracted_dir,
            backup_dir,
        }) => commands::prepare(&source_dir, &extracted_dir, &backup_dir),
        Some(Command::Restore { source_dir, backup_dir }) => commands::restore(&source_dir, &backup_dir),
        // No command - show help
        None => Err(CliError::failure("no command given; run `sampledoc --help`")),
    }
}

// ============================================================================
// Tests
// ============================================================================
