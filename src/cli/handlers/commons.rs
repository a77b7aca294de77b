// src/cli/handlers/commons.rs

//! Shared functions used by multiple handlers.

use anyhow::Result;
use colored::*;
use dialoguer::{Input, theme::ColorfulTheme};
use std::collections::HashSet;
use std::env;
use std::io::{self, Write};

use crate::{
    constants::SPEC_FLAG,
    core::{
        arg_parser::ParsedFlags,
        input_merger::{self, EnvSource, ProcessEnv},
        paths,
        profile::LevelPrompter,
        spec_loader::{FileSpecReader, SpecReader},
    },
    models::{Axis, Language, Level, PartialProfile, Profile, Spec},
};

/// Locates and loads the specification: `--spec`, then `GIAC_SPEC`, then the working
/// directory, then the user configuration directory.
pub fn load_spec(flags: &ParsedFlags, env: &impl EnvSource) -> Result<Spec> {
    let working_dir = env::current_dir()?;
    let config_dir = paths::get_config_dir();
    let path = paths::resolve_spec_path(flags.value(SPEC_FLAG), env, &working_dir, config_dir.as_deref())?;

    log::info!("Loading specification from {}", path.display());
    let spec = FileSpecReader::new(path).read()?;
    log::debug!("Specification loaded with {} axes", spec.axes.len());
    Ok(spec)
}

/// Every flag key the specification reachable from `args` gives to an axis. Empty when no
/// specification can be loaded.
pub fn claimed_flag_keys(args: &[String]) -> HashSet<String> {
    match load_spec(&ParsedFlags::parse(args), &ProcessEnv) {
        Ok(spec) => spec
            .axes_in_priority()
            .into_iter()
            .flat_map(input_merger::axis_flag_keys)
            .collect(),
        Err(e) => {
            log::debug!("No specification to check flag keys against: {:#}", e);
            HashSet::new()
        }
    }
}

/// Writes `text` and a newline to `out`. A reader that closed its end early (`giac spec | head`)
/// is not an error.
pub fn write_output(out: &mut impl Write, text: &str) -> io::Result<()> {
    match writeln!(out, "{}", text).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Output closed by the reader");
            Ok(())
        }
        other => other,
    }
}

/// [`write_output`] on the locked stdout.
pub fn print_output(text: &str) -> Result<()> {
    write_output(&mut io::stdout().lock(), text)?;
    Ok(())
}

/// `  <level>: <name>` for every level of `axis`, one per line.
pub fn format_available_levels(axis: &Axis, lang: Language) -> String {
    axis.levels
        .iter()
        .map(|definition| format!("  {}: {}", definition.level, definition.name(lang)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `5 (Élevé / High)`: a level with both of its names, or the bare level when the axis
/// does not define it.
pub fn format_level(axis: &Axis, level: Level) -> String {
    match axis.level(level) {
        Some(definition) => format!("{} ({} / {})", level, definition.name_fr, definition.name_en),
        None => level.to_string(),
    }
}

/// One line summary of a profile, in priority order: `Profile: Telism=5 Challenge=3`.
pub fn render_profile_preview(spec: &Spec, profile: &Profile, lang: Language) -> String {
    let entries: Vec<String> = spec
        .axes_in_priority()
        .into_iter()
        .filter_map(|axis| profile.get(&axis.id).map(|level| format!("{}={}", axis.name(lang), level)))
        .collect();
    format!("{} {}", t!("label.profile", lang), entries.join(" "))
}

/// The levels `defaults` filled in, one `  <axis>: <level>` line each, in priority order.
pub fn render_applied_defaults(spec: &Spec, partial: &PartialProfile, defaults: &PartialProfile, lang: Language) -> String {
    spec.axes_in_priority()
        .into_iter()
        .filter(|axis| !partial.contains(&axis.id))
        .filter_map(|axis| {
            defaults
                .get(&axis.id)
                .map(|level| format!("  {}: {}", axis.name(lang), format_level(axis, level)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asks for missing levels on the terminal. Everything goes to stderr so stdout only ever
/// carries the generated prompt.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl LevelPrompter for DialoguerPrompter {
    fn ask(&mut self, axis: &Axis, lang: Language) -> Result<String> {
        eprintln!("\n{}", axis.name(lang).yellow().bold());
        let description = axis.description(lang);
        if !description.is_empty() {
            eprintln!("{}", description.dimmed());
        }
        eprintln!("{}", t!("interactive.available_levels", lang).blue());
        eprintln!("{}", format_available_levels(axis, lang));

        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "{} {} ({})",
                t!("interactive.choose_level", lang),
                axis.name(lang),
                t!("interactive.level_hint", lang)
            ))
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn reject(&mut self, _axis: &Axis, input: &str, lang: Language) {
        eprintln!(
            "{} {}",
            t!("error.invalid_level_input", lang).red(),
            format!("(\"{}\")", input.trim()).dimmed()
        );
    }
}
