//! JVM toolchain: `kotlinc` and `javac` for compilation, the JUnit console launcher for tests.
//!
//! Every sample gets its own directory under the work directory:
//!
//! ```text
//! <work_dir>/<sanitized id>/src/...      sample + support sources
//! <work_dir>/<sanitized id>/classes/     compiler output
//! ```
//!
//! External processes run on a private current-thread tokio runtime so that each one can be
//! bounded by the configured timeout; an expired process is killed when its future is dropped.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::iter;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use sampledoc_core::LanguageId;
use tokio::runtime::{Builder, Runtime};

use super::{AdapterError, AssertionFailure, CompileError, CompiledUnit, SampleShape, Toolchain};
use crate::config::{HarnessConfig, vars};
use crate::registry::Sample;

/// Exit status of the console launcher when at least one test failed.
const LAUNCHER_TESTS_FAILED: i32 = 1;
/// Exit status of the console launcher under `--fail-if-no-tests` when nothing ran.
const LAUNCHER_NO_TESTS: i32 = 2;

/// Runtime library of the Kotlin distribution, next to `kotlinc` in `<home>/lib`.
const KOTLIN_STDLIB_JAR: &str = "kotlin-stdlib.jar";

pub struct JvmToolchain {
    config: HarnessConfig,
    /// `kotlin-stdlib.jar` of the distribution `kotlinc` belongs to, when found
    kotlin_stdlib: Option<PathBuf>,
    runtime: Runtime,
}

/// Captured result of one external process.
#[derive(Debug)]
struct ProcessOutput {
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    /// Compiler diagnostics go to stderr; the launcher reports on stdout.
    fn diagnostics(&self) -> String {
        let text = if self.stderr.trim().is_empty() { &self.stdout } else { &self.stderr };
        text.trim().to_string()
    }
}

impl JvmToolchain {
    /// ## Errors
    /// Fails only if the process runtime cannot be created.
    pub fn new(config: HarnessConfig) -> Result<Self, AdapterError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let kotlin_stdlib = locate_kotlin_stdlib(&config.kotlinc);
        match &kotlin_stdlib {
            Some(jar) => tracing::debug!(jar = %jar.display(), "found kotlin-stdlib"),
            None => tracing::debug!(kotlinc = %config.kotlinc.display(), "kotlin-stdlib not found"),
        }
        Ok(Self {
            config,
            kotlin_stdlib,
            runtime,
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn kotlin_stdlib(&self) -> Option<&Path> {
        self.kotlin_stdlib.as_deref()
    }

    /// Check that `kotlinc` starts and that its `kotlin-stdlib.jar` was found.
    pub fn probe_kotlin(&self) -> Result<(), AdapterError> {
        if self.kotlin_stdlib.is_none() {
            return Err(AdapterError::Toolchain(format!(
                "{KOTLIN_STDLIB_JAR} not found next to '{}'",
                self.config.kotlinc.display()
            )));
        }
        let output = self.run(&self.config.kotlinc, &[OsString::from("-version")])?;
        if output.success {
            Ok(())
        } else {
            Err(AdapterError::Toolchain(format!(
                "'{}' is not usable: {}",
                self.config.kotlinc.display(),
                output.diagnostics()
            )))
        }
    }

    /// Check that `javac` starts and that the launcher jar exists.
    pub fn probe(&self) -> Result<(), AdapterError> {
        self.launcher()?;
        let output = self.run(&self.config.javac, &[OsString::from("-version")])?;
        if output.success {
            Ok(())
        } else {
            Err(AdapterError::Toolchain(format!(
                "'{}' is not usable: {}",
                self.config.javac.display(),
                output.diagnostics()
            )))
        }
    }

    fn launcher(&self) -> Result<&Path, AdapterError> {
        let Some(launcher) = self.config.junit_launcher.as_deref() else {
            return Err(AdapterError::Toolchain(format!(
                "JUnit console launcher not configured (set {})",
                vars::JUNIT_LAUNCHER
            )));
        };
        if !launcher.is_file() {
            return Err(AdapterError::Toolchain(format!(
                "JUnit console launcher not found at '{}'",
                launcher.display()
            )));
        }
        Ok(launcher)
    }

    fn unit_dir(&self, sample_id: &str) -> PathBuf {
        self.config.work_dir.join(sanitize(sample_id))
    }

    /// `classes`, the configured entries, the launcher jar (it bundles the JUnit Platform and
    /// Jupiter API) and `kotlin-stdlib.jar`.
    fn classpath(&self, classes: &Path) -> Result<OsString, AdapterError> {
        let entries = iter::once(classes)
            .chain(self.config.classpath.iter().map(PathBuf::as_path))
            .chain(self.config.junit_launcher.as_deref())
            .chain(self.kotlin_stdlib.as_deref());
        env::join_paths(entries).map_err(|e| AdapterError::Toolchain(format!("invalid classpath entry: {e}")))
    }

    fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput, AdapterError> {
        tracing::debug!(program = %program.display(), ?args, "running external process");
        let mut command = tokio::process::Command::new(program);
        command.args(args).stdin(Stdio::null()).kill_on_drop(true);

        let limit = self.config.timeout;
        let output = self.runtime.block_on(async move {
            match limit {
                Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                    Ok(result) => result.map_err(|e| spawn_error(program, e)),
                    Err(_) => {
                        tracing::warn!(program = %program.display(), ?limit, "process timed out");
                        Err(AdapterError::Timeout(limit))
                    }
                },
                None => command.output().await.map_err(|e| spawn_error(program, e)),
            }
        })?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn compile_with(&self, compiler: &Path, classes: &Path, classpath: &OsString, files: &[PathBuf]) -> Result<(), AdapterError> {
        let mut args = vec![
            OsString::from("-d"),
            classes.as_os_str().to_owned(),
            OsString::from("-cp"),
            classpath.clone(),
        ];
        args.extend(files.iter().map(|f| f.as_os_str().to_owned()));

        let output = self.run(compiler, &args)?;
        if output.success {
            Ok(())
        } else {
            let name = compiler.file_name().map_or_else(|| compiler.display().to_string(), |n| n.to_string_lossy().into_owned());
            Err(CompileError::new(format!("{name} failed:\n{}", output.diagnostics())).into())
        }
    }
}

impl Toolchain for JvmToolchain {
    fn name(&self) -> &str {
        "jvm"
    }

    fn compile(&self, sample: &Sample, shape: &SampleShape) -> Result<CompiledUnit, AdapterError> {
        let dir = self.unit_dir(&sample.identifier);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        let src = dir.join("src");
        let classes = dir.join("classes");
        fs::create_dir_all(&classes)?;

        let mut kotlin = Vec::new();
        let mut java = Vec::new();
        for source in iter::once(&sample.source).chain(&sample.support_sources) {
            let path = src.join(&source.relative_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &source.text)?;
            match source.language {
                LanguageId::Kotlin => kotlin.push(path),
                LanguageId::Java => java.push(path),
            }
        }

        let classpath = self.classpath(&classes)?;
        if !kotlin.is_empty() {
            // kotlinc also reads the Java sources so Kotlin code can refer to them.
            let files: Vec<PathBuf> = kotlin.iter().chain(&java).cloned().collect();
            self.compile_with(&self.config.kotlinc, &classes, &classpath, &files)?;
        }
        if !java.is_empty() {
            self.compile_with(&self.config.javac, &classes, &classpath, &java)?;
        }
        tracing::debug!(sample = %sample.identifier, dir = %dir.display(), "compiled");

        Ok(CompiledUnit {
            sample_id: sample.identifier.clone(),
            qualified_class: shape.qualified_class.clone(),
            tests: shape.tests.clone(),
            artifact_dir: Some(classes),
        })
    }

    fn invoke(&self, unit: &CompiledUnit, test_name: &str) -> Result<(), AdapterError> {
        let launcher = self.launcher()?;
        let Some(classes) = unit.artifact_dir.as_deref() else {
            return Err(AdapterError::Toolchain(format!("'{}' has no compiled classes", unit.sample_id)));
        };
        let args = vec![
            OsString::from("-jar"),
            launcher.as_os_str().to_owned(),
            OsString::from("execute"),
            OsString::from("--class-path"),
            self.classpath(classes)?,
            OsString::from("--select-method"),
            OsString::from(format!("{}#{}", unit.qualified_class, test_name)),
            OsString::from("--fail-if-no-tests"),
            OsString::from("--disable-banner"),
            OsString::from("--details=none"),
        ];

        let output = self.run(&self.config.java, &args)?;
        launcher_result(unit, test_name, &output)
    }
}

/// Map the console launcher's exit status to the test result.
fn launcher_result(unit: &CompiledUnit, test_name: &str, output: &ProcessOutput) -> Result<(), AdapterError> {
    match output.code {
        _ if output.success => Ok(()),
        Some(LAUNCHER_TESTS_FAILED) => Err(classify_failure(test_name, output).into()),
        Some(LAUNCHER_NO_TESTS) => Err(AdapterError::Toolchain(format!(
            "no JUnit Platform test matched '{}#{test_name}'; is it a JUnit Jupiter @Test?",
            unit.qualified_class
        ))),
        code => Err(AdapterError::Toolchain(format!(
            "JUnit launcher exited with {}: {}",
            code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")),
            output.diagnostics()
        ))),
    }
}

/// `kotlin-stdlib.jar` in the `lib` directory of the distribution holding `kotlinc`.
///
/// A bare program name is looked up in `PATH`; symlinks are resolved first.
fn locate_kotlin_stdlib(kotlinc: &Path) -> Option<PathBuf> {
    let program = if kotlinc.components().count() > 1 {
        kotlinc.to_path_buf()
    } else {
        let paths = env::var_os("PATH")?;
        env::split_paths(&paths).map(|dir| dir.join(kotlinc)).find(|p| p.is_file())?
    };
    let program = fs::canonicalize(program).ok()?;
    let jar = program.parent()?.parent()?.join("lib").join(KOTLIN_STDLIB_JAR);
    jar.is_file().then_some(jar)
}

fn spawn_error(program: &Path, err: io::Error) -> AdapterError {
    if err.kind() == io::ErrorKind::NotFound {
        AdapterError::Toolchain(format!("'{}' not found", program.display()))
    } else {
        AdapterError::Toolchain(format!("failed to start '{}': {err}", program.display()))
    }
}

/// Directory name for a sample identifier; distinct identifiers get distinct names.
///
/// ASCII letters, digits, `.` and `-` are kept; any other character, `_` included, becomes
/// `_<hex code point>_`.
fn sanitize(sample_id: &str) -> String {
    let mut name = String::with_capacity(sample_id.len());
    for c in sample_id.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
            name.push(c);
        } else {
            name.push_str(&format!("_{:x}_", u32::from(c)));
        }
    }
    name
}

/// Turn the launcher report of a failed test into an [`AssertionFailure`].
fn classify_failure(test_name: &str, output: &ProcessOutput) -> AssertionFailure {
    let report = format!("{}\n{}", output.stdout, output.stderr);
    let lines: Vec<&str> = report.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let assertion_line = lines
        .iter()
        .find(|l| l.contains("AssertionFailedError") || l.contains("AssertionError"))
        .or_else(|| lines.iter().find(|l| l.starts_with("=>")));
    let message = assertion_line
        .map(|l| l.trim_start_matches("=>").trim().to_string())
        .unwrap_or_else(|| "test failed".to_string());

    let failure = AssertionFailure::new(test_name, message);
    match lines.iter().find_map(|l| extract_expected_actual(l)) {
        Some((expected, actual)) => failure.with_values(expected, actual),
        None => failure,
    }
}

/// Extract the compared values from a JUnit or kotlin.test assertion message.
///
/// Recognises `expected: <X> but was: <Y>` (spaces optional) and `Expected <X>, actual <Y>.`
pub(crate) fn extract_expected_actual(line: &str) -> Option<(String, String)> {
    if let Some(start) = line.find("expected:") {
        let rest = line[start + "expected:".len()..].trim_start();
        let rest = rest.strip_prefix('<')?;
        let split = rest.find("> but was:")?;
        let expected = &rest[..split];
        let actual = rest[split + "> but was:".len()..].trim_start().strip_prefix('<')?;
        let end = actual.rfind('>')?;
        return Some((expected.to_string(), actual[..end].to_string()));
    }
    if let Some(start) = line.find("Expected <") {
        let rest = &line[start + "Expected <".len()..];
        let split = rest.find(">, actual <")?;
        let actual = &rest[split + ">, actual <".len()..];
        let end = actual.rfind('>')?;
        return Some((rest[..split].to_string(), actual[..end].to_string()));
    }
    None
}
