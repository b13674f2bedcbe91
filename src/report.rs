//! Result reporting (pytest-style console output or a JSON document).
//!
//! ## Reporter Trait
//!
//! The runner drives a [`Reporter`] through the lifecycle of a run. Output formats are
//! implementations of the trait; [`report`] is the pure aggregation both of them share.

use std::io::{self, Write};
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::outcome::{FailureKind, TestOutcome, Verdict};
use crate::registry::Sample;

// ============================================================================
// Summary
// ============================================================================

/// One failed sample in a [`Summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    pub sample_id: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Aggregate of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub failures: Vec<FailureEntry>,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for this run: 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Aggregate outcomes into a [`Summary`], keeping failures in outcome order.
pub fn report(outcomes: &[TestOutcome]) -> Summary {
    let mut summary = Summary {
        total: outcomes.len(),
        ..Summary::default()
    };
    for outcome in outcomes {
        summary.duration += outcome.duration;
        match outcome.verdict {
            Verdict::Passed => summary.passed += 1,
            Verdict::Skipped => summary.skipped += 1,
            Verdict::Failed(kind) => {
                summary.failed += 1;
                summary.failures.push(FailureEntry {
                    sample_id: outcome.sample_id.clone(),
                    kind,
                    message: outcome.message.clone().unwrap_or_default(),
                });
            }
        }
    }
    summary
}

// ============================================================================
// Reporter Trait
// ============================================================================

/// Receives the lifecycle of a run.
pub trait Reporter {
    /// Called once the samples to run are known
    fn on_run_start(&mut self, _sample_count: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called before a sample is handed to the toolchain
    fn on_sample_start(&mut self, _sample: &Sample) -> io::Result<()> {
        Ok(())
    }

    fn on_sample_complete(&mut self, outcome: &TestOutcome) -> io::Result<()>;

    /// Called after the last sample, with every outcome and their aggregate
    fn on_run_complete(&mut self, outcomes: &[TestOutcome], summary: &Summary) -> io::Result<()>;
}

// ============================================================================
// Console Reporter
// ============================================================================

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const BOLD_RED: &str = "\x1b[1;31m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

/// pytest-style console reporter.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    verbose: bool,
    color: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self::with_writer(io::stdout(), verbose, true)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W, verbose: bool, color: bool) -> Self {
        Self { out, verbose, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn banner(&self, code: &str, title: &str) -> String {
        self.paint(code, &format!("=================== {title} ==================="))
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, sample_count: usize) -> io::Result<()> {
        if sample_count == 0 {
            return writeln!(self.out, "No samples collected");
        }
        let banner = self.banner(BOLD, "test session starts");
        writeln!(self.out, "{banner}")?;
        writeln!(self.out, "collected {sample_count} item(s)")?;
        writeln!(self.out)
    }

    fn on_sample_complete(&mut self, outcome: &TestOutcome) -> io::Result<()> {
        let status = match outcome.verdict {
            Verdict::Passed => self.paint(GREEN, "PASSED"),
            Verdict::Failed(_) => self.paint(RED, "FAILED"),
            Verdict::Skipped => self.paint(YELLOW, "SKIPPED"),
        };
        if self.verbose {
            writeln!(self.out, "{} {status} ({}ms)", outcome.sample_id, outcome.duration.as_millis())
        } else {
            writeln!(self.out, "{} {status}", outcome.sample_id)
        }
    }

    fn on_run_complete(&mut self, outcomes: &[TestOutcome], summary: &Summary) -> io::Result<()> {
        if summary.total == 0 {
            return Ok(());
        }

        let failures: Vec<&TestOutcome> = outcomes.iter().filter(|o| o.is_failure()).collect();
        if !failures.is_empty() {
            writeln!(self.out)?;
            let banner = self.banner(BOLD_RED, "FAILURES");
            writeln!(self.out, "{banner}")?;
            for outcome in failures {
                writeln!(self.out)?;
                let title = self.paint(BOLD, &format!("___________ {} ___________", outcome.sample_id));
                writeln!(self.out, "{title}")?;
                writeln!(self.out)?;
                if let Some(kind) = outcome.failure_kind() {
                    writeln!(self.out, "    [{}]", kind_label(kind))?;
                }
                for line in outcome.message.as_deref().unwrap_or_default().lines() {
                    writeln!(self.out, "    {line}")?;
                }
                if let (Some(expected), Some(actual)) = (&outcome.expected, &outcome.actual) {
                    writeln!(self.out, "    expected: {expected}")?;
                    writeln!(self.out, "    actual:   {actual}")?;
                }
            }
        }

        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(format!("{} passed", summary.passed));
        }
        if summary.failed > 0 {
            parts.push(format!("{} failed", summary.failed));
        }
        if summary.skipped > 0 {
            parts.push(format!("{} skipped", summary.skipped));
        }
        let color = if summary.is_success() { BOLD_GREEN } else { BOLD_RED };
        let line = self.banner(
            color,
            &format!("{} in {:.2}s", parts.join(", "), summary.duration.as_secs_f64()),
        );
        writeln!(self.out)?;
        writeln!(self.out, "{line}")
    }
}

fn kind_label(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Compile => "compile error",
        FailureKind::Assertion => "assertion failure",
        FailureKind::Toolchain => "toolchain error",
        FailureKind::Timeout => "timeout",
    }
}

// ============================================================================
// JSON Reporter
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    outcomes: &'a [TestOutcome],
    summary: &'a Summary,
}

/// Writes one JSON document with every outcome and the summary once the run completes.
pub struct JsonReporter<W: Write = io::Stdout> {
    out: W,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn on_sample_complete(&mut self, _outcome: &TestOutcome) -> io::Result<()> {
        Ok(())
    }

    fn on_run_complete(&mut self, outcomes: &[TestOutcome], summary: &Summary) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &JsonReport { outcomes, summary })?;
        writeln!(self.out)
    }
}
