//! Harness and project-layout configuration.
//!
//! Both configurations start from [`Default`] and are refined with `with_*` builders. The harness
//! configuration can also be layered from `SAMPLEDOC_*` environment variables; CLI flags are
//! applied last by the caller.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use sampledoc_core::conventions::{
    BACKUP_EXCLUDED_DIRS, DEFAULT_BACKUP_DIR, DEFAULT_EXTRACTED_DIR, DEFAULT_SOURCE_DIR,
};

/// Environment variable names read by [`HarnessConfig::from_env`].
pub mod vars {
    pub const JAVAC: &str = "SAMPLEDOC_JAVAC";
    pub const KOTLINC: &str = "SAMPLEDOC_KOTLINC";
    pub const JAVA: &str = "SAMPLEDOC_JAVA";
    pub const JUNIT_LAUNCHER: &str = "SAMPLEDOC_JUNIT_LAUNCHER";
    pub const CLASSPATH: &str = "SAMPLEDOC_CLASSPATH";
    pub const WORK_DIR: &str = "SAMPLEDOC_WORK_DIR";
    pub const TIMEOUT_SECS: &str = "SAMPLEDOC_TIMEOUT_SECS";
}

/// Configuration of the external JVM toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Java compiler executable
    pub javac: PathBuf,
    /// Kotlin compiler executable
    pub kotlinc: PathBuf,
    /// Java launcher executable
    pub java: PathBuf,
    /// JUnit Platform console launcher (standalone jar)
    pub junit_launcher: Option<PathBuf>,
    /// Extra classpath entries (JUnit API, kotlin-test, ...)
    pub classpath: Vec<PathBuf>,
    /// Directory receiving per-sample sources and classes
    pub work_dir: PathBuf,
    /// Maximum duration of one external process
    pub timeout: Option<Duration>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            javac: PathBuf::from("javac"),
            kotlinc: PathBuf::from("kotlinc"),
            java: PathBuf::from("java"),
            junit_launcher: None,
            classpath: Vec::new(),
            work_dir: PathBuf::from("target/sampledoc"),
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the `SAMPLEDOC_*` environment variables that are set.
    pub fn from_env() -> Self {
        Self::default().layer(|name| env::var_os(name).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Override fields from a variable lookup. Empty values are ignored; an unparsable timeout
    /// is ignored with a warning.
    pub fn layer(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(vars::JAVAC) {
            self.javac = PathBuf::from(v);
        }
        if let Some(v) = get(vars::KOTLINC) {
            self.kotlinc = PathBuf::from(v);
        }
        if let Some(v) = get(vars::JAVA) {
            self.java = PathBuf::from(v);
        }
        if let Some(v) = get(vars::JUNIT_LAUNCHER) {
            self.junit_launcher = Some(PathBuf::from(v));
        }
        if let Some(v) = get(vars::CLASSPATH) {
            self.classpath = env::split_paths(&v).collect();
        }
        if let Some(v) = get(vars::WORK_DIR) {
            self.work_dir = PathBuf::from(v);
        }
        if let Some(v) = get(vars::TIMEOUT_SECS) {
            match v.trim().parse::<u64>() {
                Ok(0) => self.timeout = None,
                Ok(secs) => self.timeout = Some(Duration::from_secs(secs)),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid {}", vars::TIMEOUT_SECS),
            }
        }
        self
    }

    pub fn with_javac(mut self, path: impl Into<PathBuf>) -> Self {
        self.javac = path.into();
        self
    }

    pub fn with_kotlinc(mut self, path: impl Into<PathBuf>) -> Self {
        self.kotlinc = path.into();
        self
    }

    pub fn with_java(mut self, path: impl Into<PathBuf>) -> Self {
        self.java = path.into();
        self
    }

    pub fn with_junit_launcher(mut self, path: impl Into<PathBuf>) -> Self {
        self.junit_launcher = Some(path.into());
        self
    }

    pub fn with_classpath(mut self, entries: Vec<PathBuf>) -> Self {
        self.classpath = entries;
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Set the per-process timeout (`None` disables it)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Locations used by the documentation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub source_dir: PathBuf,
    pub extracted_dir: PathBuf,
    pub backup_dir: PathBuf,
    /// Top-level source directories left out of the backup
    pub backup_excluded: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            extracted_dir: PathBuf::from(DEFAULT_EXTRACTED_DIR),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            backup_excluded: BACKUP_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_extracted_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extracted_dir = dir.into();
        self
    }

    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }
}
