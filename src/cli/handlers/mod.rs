// src/cli/handlers/mod.rs

// One module per command, plus the helpers they share.

/// `build` / `prompt`.
pub mod build;
pub mod commons;
/// `spec` / `show`.
pub mod spec;
