//! Sequential batch runner: registry → toolchain (per sample) → reporter.

use std::io;

use crate::adapter::{Toolchain, run_sample};
use crate::outcome::TestOutcome;
use crate::registry::{Sample, SampleRegistry};
use crate::report::{Reporter, report};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after the first failed sample
    pub stop_on_fail: bool,
    /// Only run samples whose identifier contains this keyword
    pub filter: Option<String>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }
}

/// Run the selected samples of `registry` one after the other and report them.
///
/// A failing sample never stops the batch unless `stop_on_fail` is set.
///
/// ## Errors
/// Only when the reporter cannot write its output.
#[tracing::instrument(skip_all, fields(toolchain = toolchain.name(), samples = registry.len()))]
pub fn run_samples(
    registry: &SampleRegistry,
    toolchain: &dyn Toolchain,
    reporter: &mut dyn Reporter,
    options: &RunOptions,
) -> io::Result<Vec<TestOutcome>> {
    let selected: Vec<&Sample> = match &options.filter {
        Some(keyword) => registry.select(keyword),
        None => registry.list().iter().collect(),
    };
    tracing::info!(selected = selected.len(), "running samples");

    reporter.on_run_start(selected.len())?;
    let mut outcomes = Vec::with_capacity(selected.len());
    for sample in selected {
        reporter.on_sample_start(sample)?;
        let outcome = run_sample(toolchain, sample);
        reporter.on_sample_complete(&outcome)?;

        let stop = options.stop_on_fail && outcome.is_failure();
        outcomes.push(outcome);
        if stop {
            tracing::info!(sample = %sample.identifier, "stopping after first failure");
            break;
        }
    }

    let summary = report(&outcomes);
    reporter.on_run_complete(&outcomes, &summary)?;
    Ok(outcomes)
}
