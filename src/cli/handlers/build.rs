// src/cli/handlers/build.rs

use crate::{
    cli::handlers::commons::{self, DialoguerPrompter},
    constants::{AUTO_FLAG, PREVIEW_FLAG},
    core::{
        arg_parser::ParsedFlags,
        input_merger::{self, MergedInput, ProcessEnv},
        profile::{self, LevelPrompter},
        prompt_builder,
    },
    models::{PartialProfile, Profile, Spec},
};
use anyhow::{Context, Result};
use colored::*;
use std::io::{self, IsTerminal};

/// The main handler for the `build` command (also the default one).
/// Merges environment and flags, completes the profile and prints the prompt on stdout.
pub fn handle(args: Vec<String>) -> Result<()> {
    let env = ProcessEnv;
    let flags = ParsedFlags::parse(&args);
    let lang = input_merger::resolve_language(&flags, &env);

    let spec = commons::load_spec(&flags, &env).with_context(|| t!("error.retrieving_spec", lang))?;
    let merged = input_merger::merge_flags(&spec, &flags, &env);
    log::debug!("Merged input: {:?}", merged);

    let non_interactive = flags.is_on(AUTO_FLAG) || !io::stdin().is_terminal();
    let profile = complete_profile(&spec, &merged, non_interactive, &mut DialoguerPrompter)
        .with_context(|| t!("error.generating_prompt", lang))?;

    if flags.is_on(PREVIEW_FLAG) {
        eprintln!("\n{}", t!("title.selected_profile", lang).yellow().bold());
        eprintln!("{}", commons::render_profile_preview(&spec, &profile, lang));
        eprintln!("\n{}", t!("title.generated_prompt", lang).yellow().bold());
    }

    commons::print_output(&prompt_builder::execute(&spec, &profile, merged.lang))
}

/// Turns the merged input into a full profile: as-is when nothing is missing, with the
/// axis defaults when `non_interactive`, through `prompter` otherwise.
fn complete_profile(
    spec: &Spec,
    merged: &MergedInput,
    non_interactive: bool,
    prompter: &mut impl LevelPrompter,
) -> Result<Profile> {
    let missing = profile::get_missing_axes(&merged.profile, &spec.axis_ids_in_priority());
    if missing.is_empty() {
        return Ok(profile::create_profile(&merged.profile, &PartialProfile::new()));
    }

    let lang = merged.lang;
    if non_interactive {
        let defaults = profile::default_levels(spec);
        log::warn!("{} axes not specified, falling back to defaults", missing.len());
        eprintln!("{}", t!("info.defaults_applied", lang).yellow());
        eprintln!("{}", commons::render_applied_defaults(spec, &merged.profile, &defaults, lang));
        return Ok(profile::create_profile(&merged.profile, &defaults));
    }

    eprintln!("{}", t!("info.interactive_mode", lang).cyan());
    profile::complete_interactively(spec, &merged.profile, lang, prompter)
}
