//! Registry-first language vocabulary.
//!
//! Each submodule is the single source of truth for one vocabulary: the supported languages with
//! their declaration keywords ([`languages`]), and the modifier keywords that decide visibility
//! ([`modifiers`]).
//!
//! ## Notes
//! - Tables are `const` so the frontend can match against them without allocation.
//! - Enforcement of syntax rules still lives in `sampledoc_syntax`; these tables only describe spellings.

pub mod languages;
pub mod modifiers;
