// src/cli/handlers/spec.rs

use crate::{
    cli::handlers::commons,
    constants::AXIS_FLAG,
    core::{
        arg_parser::ParsedFlags,
        input_merger::{self, ProcessEnv},
        prompt_builder, resolver,
    },
    models::{Axis, Language, Spec},
};
use anyhow::{Context, Result, anyhow};
use colored::*;

/// The main handler for the `spec` command.
/// Prints the whole specification, or the single axis named by `--axis` or the first
/// positional argument.
pub fn handle(args: Vec<String>) -> Result<()> {
    let env = ProcessEnv;
    let flags = ParsedFlags::parse(&args);
    let lang = input_merger::resolve_language(&flags, &env);

    let spec = commons::load_spec(&flags, &env).with_context(|| t!("error.retrieving_spec", lang))?;

    let selector = flags
        .value(AXIS_FLAG)
        .or_else(|| flags.positional().first().map(String::as_str));

    match selector {
        Some(selector) => {
            let axis = resolver::resolve_axis(&spec, selector).ok_or_else(|| {
                anyhow!(
                    "{}: {}\n{}",
                    t!("error.axis_not_found", lang),
                    selector,
                    t!("help.axis_identifier", lang)
                )
            })?;
            commons::print_output(&render_axis(axis, lang))
        }
        None => commons::print_output(&render_spec(&spec, lang)),
    }
}

/// Title, initials and description of an axis.
fn render_axis_header(axis: &Axis, lang: Language) -> Vec<String> {
    vec![
        format!("\n--- {} ({}) ---", axis.name(lang).yellow().bold(), axis.id),
        format!("  {:<15} {}", t!("label.initials", lang).blue(), axis.initials.join(", ")),
        format!("  {:<15} {}", t!("label.description", lang).blue(), axis.description(lang)),
    ]
}

/// One axis in full: its header, then `  <level>: <name>` and the level prompt for every level.
pub fn render_axis(axis: &Axis, lang: Language) -> String {
    let mut out = render_axis_header(axis, lang);
    out.push(format!("  {}", t!("label.levels", lang).blue()));
    for definition in &axis.levels {
        out.push(format!("  {}: {}", definition.level.to_string().cyan(), definition.name(lang).bold()));
        out.push(format!("      {}", prompt_builder::flatten(definition.prompt(lang)).dimmed()));
    }
    out.join("\n")
}

/// The whole specification, axes by ascending priority, without their levels.
pub fn render_spec(spec: &Spec, lang: Language) -> String {
    let mut out = vec![
        format!("=== {} ===", t!("title.specification", lang).yellow().bold()),
        spec.description(lang).to_string(),
    ];
    for axis in spec.axes_in_priority() {
        out.extend(render_axis_header(axis, lang));
    }
    out.join("\n")
}
