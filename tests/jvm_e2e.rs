//! Compile and run the fixtures with a real JDK and JUnit console launcher.
//!
//! Runs only when `SAMPLEDOC_JUNIT_LAUNCHER` points at a standalone launcher jar and `javac`
//! answers; otherwise every test returns early. The toolchain is built exactly as `sampledoc test`
//! builds it. Cases with Kotlin sources also need `kotlinc` and its `kotlin-stdlib.jar`.

use std::io;

use sampledoc::adapter::{JvmToolchain, run_sample};
use sampledoc::cli::commands::{harness_config, jvm_toolchain};
use sampledoc::outcome::{FailureKind, Verdict};
use sampledoc::registry::{Sample, SampleRegistry, SourceFile};
use sampledoc::report::ConsoleReporter;
use sampledoc::runner::{RunOptions, run_samples};
use sampledoc_core::LanguageId;
use tempfile::TempDir;

/// The CLI's toolchain working in a fresh directory, or `None` when no JVM setup is available.
fn toolchain() -> Option<(JvmToolchain, TempDir)> {
    let config = harness_config(None);
    config.junit_launcher.as_ref()?;
    let work = tempfile::tempdir().unwrap();
    let jvm = jvm_toolchain(config.with_work_dir(work.path())).unwrap();
    match jvm.probe() {
        Ok(()) => Some((jvm, work)),
        Err(e) => {
            eprintln!("skipping JVM end-to-end test: {e}");
            None
        }
    }
}

/// Like [`toolchain`], also requiring a usable Kotlin distribution.
fn kotlin_toolchain() -> Option<(JvmToolchain, TempDir)> {
    let (jvm, work) = toolchain()?;
    match jvm.probe_kotlin() {
        Ok(()) => Some((jvm, work)),
        Err(e) => {
            eprintln!("skipping Kotlin end-to-end test: {e}");
            None
        }
    }
}

/// Built-in Java samples that need no Kotlin support sources.
fn java_samples() -> SampleRegistry {
    let mut registry = SampleRegistry::new();
    for sample in SampleRegistry::builtin().list() {
        if sample.language() == LanguageId::Java && sample.support_sources.is_empty() {
            registry.register(sample.clone()).unwrap();
        }
    }
    registry
}

#[test]
fn java_fixtures_pass() {
    let Some((jvm, _work)) = toolchain() else {
        return;
    };
    let registry = java_samples();
    assert!(!registry.is_empty());

    let mut reporter = ConsoleReporter::with_writer(io::sink(), false, false);
    let outcomes = run_samples(&registry, &jvm, &mut reporter, &RunOptions::new()).unwrap();
    for outcome in &outcomes {
        assert_eq!(outcome.verdict, Verdict::Passed, "{}: {:?}", outcome.sample_id, outcome.message);
    }
}

#[test]
fn failing_assertion_reports_expected_and_actual() {
    let Some((jvm, _work)) = toolchain() else {
        return;
    };
    let text = "\
import org.junit.jupiter.api.Assertions;
import org.junit.jupiter.api.Test;

public class WrongAnswerSample {
    @Test
    void answer() {
        Assertions.assertEquals(42, 41);
    }
}
";
    let sample = Sample::from_source(SourceFile::new("WrongAnswerSample.java", text).unwrap());
    let outcome = run_sample(&jvm, &sample);

    assert_eq!(outcome.verdict, Verdict::Failed(FailureKind::Assertion));
    assert_eq!(outcome.expected.as_deref(), Some("42"));
    assert_eq!(outcome.actual.as_deref(), Some("41"));
}

#[test]
fn javac_errors_are_compile_failures() {
    let Some((jvm, _work)) = toolchain() else {
        return;
    };
    let text = "import org.junit.jupiter.api.Test;\n\npublic class BrokenTypeSample {\n    @Test\n    void run() {\n        int x = \"text\";\n    }\n}\n";
    let sample = Sample::from_source(SourceFile::new("BrokenTypeSample.java", text).unwrap());
    let outcome = run_sample(&jvm, &sample);

    assert_eq!(outcome.verdict, Verdict::Failed(FailureKind::Compile));
    assert!(outcome.message.unwrap_or_default().contains("javac failed"));
}

#[test]
fn java_sample_calls_kotlin_support_source() {
    let Some((jvm, _work)) = kotlin_toolchain() else {
        return;
    };
    let registry = SampleRegistry::builtin();
    let hello = registry.get("HelloJavaSample.java").unwrap();
    assert_eq!(hello.support_sources[0].language, LanguageId::Kotlin);

    let outcome = run_sample(&jvm, hello);
    assert_eq!(outcome.verdict, Verdict::Passed, "{:?}", outcome.message);
}

#[test]
fn unselected_test_is_not_a_pass() {
    let Some((jvm, _work)) = toolchain() else {
        return;
    };
    // Jupiter never selects private test methods, so the launcher finds nothing to run.
    let text = "\
import org.junit.jupiter.api.Test;

public class HiddenTestSample {
    @Test
    private void answer() {
    }
}
";
    let sample = Sample::from_source(SourceFile::new("HiddenTestSample.java", text).unwrap());
    let outcome = run_sample(&jvm, &sample);

    assert_eq!(outcome.verdict, Verdict::Failed(FailureKind::Toolchain));
    assert!(outcome.message.unwrap_or_default().contains("no JUnit Platform test matched"));
}
