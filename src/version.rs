//! sampledoc version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time; the CLI and
//! the JSON report both read it from here.

/// The sampledoc version string (for example, `0.1.0`).
pub const SAMPLEDOC_VERSION: &str = env!("CARGO_PKG_VERSION");
