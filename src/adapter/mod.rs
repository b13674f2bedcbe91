//! Compile-and-run adapter.
//!
//! A [`Toolchain`] is the capability that turns a sample into something runnable and runs one
//! test of it. Every sample first goes through the structural front-end (`frontend`), which is
//! shared by all toolchains; [`run_sample`] then compiles the sample and invokes its tests in
//! declaration order, folding every error into exactly one [`TestOutcome`].
//!
//! ## Module Structure
//!
//! - `frontend` - structural checks and test-method collection
//! - `jvm` - javac/kotlinc + JUnit console launcher
//! - `compile_only` - front-end only (dry run)

pub mod compile_only;
pub mod frontend;
pub mod jvm;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::outcome::{FailureKind, TestOutcome};
use crate::registry::Sample;

pub use compile_only::CompileOnlyToolchain;
pub use frontend::SampleShape;
pub use jvm::JvmToolchain;

/// The sample does not compile (structure or compiler diagnostics).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A test ran and one of its assertions did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{test}: {message}")]
pub struct AssertionFailure {
    pub test: String,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl AssertionFailure {
    pub fn new(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("assertion failed in {0}")]
    Assertion(#[from] AssertionFailure),

    #[error("toolchain error: {0}")]
    Toolchain(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AdapterError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AdapterError::Compile(_) => FailureKind::Compile,
            AdapterError::Assertion(_) => FailureKind::Assertion,
            AdapterError::Toolchain(_) | AdapterError::Io(_) => FailureKind::Toolchain,
            AdapterError::Timeout(_) => FailureKind::Timeout,
        }
    }
}

/// A compiled sample, ready for its tests to be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    pub sample_id: String,
    pub qualified_class: String,
    /// Test methods, in declaration order
    pub tests: Vec<String>,
    /// Directory holding compiled classes, when the toolchain produced any
    pub artifact_dir: Option<PathBuf>,
}

/// External capability that compiles samples and runs their tests.
pub trait Toolchain {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Compile `sample`, whose structure the front-end already validated as `shape`.
    fn compile(&self, sample: &Sample, shape: &SampleShape) -> Result<CompiledUnit, AdapterError>;

    /// Run one test of a compiled unit.
    fn invoke(&self, unit: &CompiledUnit, test_name: &str) -> Result<(), AdapterError>;

    /// Whether tests are executed. When false, valid samples are reported as skipped.
    fn executes_tests(&self) -> bool {
        true
    }
}

enum RunStatus {
    Passed,
    Skipped(String),
}

/// Run one sample through the front-end and `toolchain`.
///
/// Always returns exactly one outcome carrying the sample's identifier; errors never escape.
#[tracing::instrument(skip_all, fields(sample = %sample.identifier, toolchain = toolchain.name()))]
pub fn run_sample(toolchain: &dyn Toolchain, sample: &Sample) -> TestOutcome {
    let start = Instant::now();
    let result = run_checked(toolchain, sample);
    let duration = start.elapsed();

    match result {
        Ok(RunStatus::Passed) => {
            tracing::debug!(?duration, "sample passed");
            TestOutcome::passed(&sample.identifier, duration)
        }
        Ok(RunStatus::Skipped(reason)) => TestOutcome::skipped(&sample.identifier, reason, duration),
        Err(err) => {
            tracing::debug!(error = %err, "sample failed");
            outcome_from_error(&sample.identifier, err, duration)
        }
    }
}

fn run_checked(toolchain: &dyn Toolchain, sample: &Sample) -> Result<RunStatus, AdapterError> {
    let shape = frontend::check(sample)?;
    let unit = toolchain.compile(sample, &shape)?;
    if !toolchain.executes_tests() {
        return Ok(RunStatus::Skipped(format!("{} (not executed)", toolchain.name())));
    }
    for test in &unit.tests {
        tracing::debug!(test = %test, "invoking test");
        toolchain.invoke(&unit, test)?;
    }
    Ok(RunStatus::Passed)
}

fn outcome_from_error(sample_id: &str, err: AdapterError, duration: Duration) -> TestOutcome {
    let kind = err.kind();
    match err {
        AdapterError::Assertion(failure) => {
            TestOutcome::failed(sample_id, kind, format!("{}: {}", failure.test, failure.message), duration)
                .with_values(failure.expected, failure.actual)
        }
        AdapterError::Compile(error) => TestOutcome::failed(sample_id, kind, error.message, duration),
        other => TestOutcome::failed(sample_id, kind, other.to_string(), duration),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::outcome::Verdict;
    use crate::registry::SourceFile;

    /// Records invocations and fails the configured test.
    struct Recording {
        failing_test: Option<&'static str>,
        invoked: RefCell<Vec<String>>,
    }

    impl Toolchain for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn compile(&self, sample: &Sample, shape: &SampleShape) -> Result<CompiledUnit, AdapterError> {
            Ok(CompiledUnit {
                sample_id: sample.identifier.clone(),
                qualified_class: shape.qualified_class.clone(),
                tests: shape.tests.clone(),
                artifact_dir: None,
            })
        }

        fn invoke(&self, _unit: &CompiledUnit, test_name: &str) -> Result<(), AdapterError> {
            self.invoked.borrow_mut().push(test_name.to_string());
            if self.failing_test == Some(test_name) {
                return Err(AssertionFailure::new(test_name, "expected: <1> but was: <2>")
                    .with_values("1", "2")
                    .into());
            }
            Ok(())
        }
    }

    fn sample(text: &str) -> Sample {
        Sample::from_source(SourceFile::new("TwoTestsSample.java", text).unwrap())
    }

    const TWO_TESTS: &str = "public class TwoTestsSample {\n    @Test\n    void first() {}\n    @Test\n    void second() {}\n}\n";

    #[test]
    fn test_all_tests_invoked_in_order() {
        let toolchain = Recording {
            failing_test: None,
            invoked: RefCell::new(Vec::new()),
        };
        let outcome = run_sample(&toolchain, &sample(TWO_TESTS));
        assert_eq!(outcome.verdict, Verdict::Passed);
        assert_eq!(outcome.sample_id, "TwoTestsSample.java");
        assert_eq!(*toolchain.invoked.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_first_failing_test_stops_the_sample() {
        let toolchain = Recording {
            failing_test: Some("first"),
            invoked: RefCell::new(Vec::new()),
        };
        let outcome = run_sample(&toolchain, &sample(TWO_TESTS));
        assert_eq!(outcome.verdict, Verdict::Failed(FailureKind::Assertion));
        assert_eq!(outcome.expected.as_deref(), Some("1"));
        assert_eq!(outcome.actual.as_deref(), Some("2"));
        assert_eq!(*toolchain.invoked.borrow(), vec!["first"]);
    }

    #[test]
    fn test_structural_error_never_reaches_the_toolchain() {
        let toolchain = Recording {
            failing_test: None,
            invoked: RefCell::new(Vec::new()),
        };
        let outcome = run_sample(&toolchain, &sample("class TwoTestsSample {\n"));
        assert_eq!(outcome.verdict, Verdict::Failed(FailureKind::Compile));
        assert!(toolchain.invoked.borrow().is_empty());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AdapterError::Timeout(Duration::from_secs(1)).kind(), FailureKind::Timeout);
        assert_eq!(
            AdapterError::Io(io::Error::new(io::ErrorKind::NotFound, "javac")).kind(),
            FailureKind::Toolchain
        );
    }
}
