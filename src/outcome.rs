//! Per-sample outcomes.

use std::time::Duration;

use serde::{Serialize, Serializer};

/// Why a sample failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Compile,
    Assertion,
    Toolchain,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    Failed(FailureKind),
    /// Not executed (compile-only mode)
    Skipped,
}

/// Result of running one sample. Created once per adapter invocation and never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOutcome {
    pub sample_id: String,
    #[serde(flatten)]
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

impl TestOutcome {
    pub fn passed(sample_id: impl Into<String>, duration: Duration) -> Self {
        Self {
            sample_id: sample_id.into(),
            verdict: Verdict::Passed,
            message: None,
            expected: None,
            actual: None,
            duration,
        }
    }

    pub fn failed(sample_id: impl Into<String>, kind: FailureKind, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            sample_id: sample_id.into(),
            verdict: Verdict::Failed(kind),
            message: Some(message.into()),
            expected: None,
            actual: None,
            duration,
        }
    }

    pub fn skipped(sample_id: impl Into<String>, reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            sample_id: sample_id.into(),
            verdict: Verdict::Skipped,
            message: Some(reason.into()),
            expected: None,
            actual: None,
            duration,
        }
    }

    /// Attach the values an assertion compared.
    pub fn with_values(mut self, expected: Option<String>, actual: Option<String>) -> Self {
        self.expected = expected;
        self.actual = actual;
        self
    }

    pub fn is_pass(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.verdict, Verdict::Failed(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.verdict {
            Verdict::Failed(kind) => Some(kind),
            _ => None,
        }
    }
}
