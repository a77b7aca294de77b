//! `giac`: turns a bilingual axis specification and a behavioral profile into a
//! deterministic instruction prompt.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// Command-line front end: clap parser, help text and command handlers.
pub mod cli;
/// Names shared across modules: environment variables, flags, file names.
pub mod constants;
/// Resolution, merging, completion and prompt assembly.
pub mod core;
pub mod models;
