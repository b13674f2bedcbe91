//! Provide the pure vocabulary shared by the sampledoc frontend, harness and documentation pipeline.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the syntax frontend can use to recognise declarations (keywords, modifiers), and
//! - the harness can use to name, place and report samples consistently.
//!
//! ## Notes
//!
//! - **No IO**, no global state, and no syntax-tree types live here.
//! - Current scope: supported languages and their keyword tables, naming rules (class names, package
//!   identifiers, sample identifiers and paths), well-known conventions, and shared user-facing messages.

pub mod conventions;
pub mod errors;
pub mod lang;
pub mod naming;

pub use lang::languages::LanguageId;
pub use lang::modifiers::Visibility;
pub use naming::{NamingError, SampleIdentifier, SamplePath};
