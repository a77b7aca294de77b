// src/core/mod.rs

/// Command-line tokenizer.
pub mod arg_parser;
pub mod input_merger;
/// Specification file lookup.
pub mod paths;
/// Profile completion, with defaults or interactively.
pub mod profile;
/// Prompt assembly.
pub mod prompt_builder;
pub mod resolver;
pub mod spec_loader;

#[cfg(test)]
pub(crate) mod fixtures;
