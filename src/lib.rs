#![forbid(unsafe_code)]
//! sampledoc: verification harness and documentation pipeline for JVM sample sources.
//!
//! A *sample* is a unit-test source file whose name ends in `Sample` (`IntSample.kt`,
//! `HelloJavaSample.java`). This crate lists samples, checks that each one compiles and that
//! its tests pass, and turns sample functions into Markdown blocks inlined into KDoc.
//!
//! ```text
//! SampleRegistry ──► Toolchain (per sample) ──► TestOutcome ──► Reporter
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Module Structure
//!
//! - `registry` - samples and their expected shape
//! - `adapter` - structural front-end and toolchains (JVM, compile-only)
//! - `outcome` / `report` - per-sample results and their aggregation
//! - `runner` - the sequential batch
//! - `pipeline` - check, extract, references, inline, backup
//! - `config` - tool paths and directory layout
//! - `cli` - the `sampledoc` command

pub mod adapter;
pub mod cli;
pub mod config;
pub mod outcome;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod runner;
pub mod version;

pub use adapter::{AdapterError, CompileOnlyToolchain, JvmToolchain, Toolchain, run_sample};
pub use config::{HarnessConfig, LayoutConfig};
pub use outcome::{FailureKind, TestOutcome, Verdict};
pub use registry::{Sample, SampleRegistry};
pub use report::{Summary, report};
pub use runner::{RunOptions, run_samples};
