// src/core/prompt_builder.rs

use crate::models::{Axis, Language, Level, LevelDefinition, Profile, Spec};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINE_BREAK_RE: Regex = Regex::new(r"[ \t]*\r?\n[ \t\r\n]*").unwrap();
}

/// Collapses every line break (and the blanks around it) of a prompt fragment into one space.
pub fn flatten(text: &str) -> String {
    LINE_BREAK_RE.replace_all(text.trim(), " ").into_owned()
}

/// `5/10` for a numeric level, the unspecified token otherwise.
pub fn format_rank(axis: &Axis, level: Level) -> String {
    match (level, axis.max_level()) {
        (Level::Value(v), Some(max)) => format!("{}/{}", v, max),
        _ => level.to_string(),
    }
}

/// The definition rendered for `axis`: the profile's level when the axis still defines it,
/// the unspecified level when the profile has no entry for the axis, otherwise nothing.
fn selected_definition<'a>(axis: &'a Axis, profile: &Profile) -> Option<&'a LevelDefinition> {
    match profile.get(&axis.id) {
        Some(level) => axis.level(level),
        None => axis.level(Level::Unspecified),
    }
}

/// Assembles the prompt for `profile` in `lang`.
///
/// Lines, joined with `\n`:
/// 1. the global prompt fragment of `spec`;
/// 2. the localized behavior instructions introduction;
/// 3. one `<axis name> <rank>: <level prompt>` line per axis, by ascending priority.
///
/// Axes whose level cannot be found are left out silently.
pub fn execute(spec: &Spec, profile: &Profile, lang: Language) -> String {
    let mut lines: Vec<String> = vec![
        spec.prompt_fragment(lang).to_string(),
        t!("prompt.behavior_intro", lang).to_string(),
    ];

    for axis in spec.axes_in_priority() {
        let Some(definition) = selected_definition(axis, profile) else {
            log::debug!("No line for axis '{}': no matching level", axis.id);
            continue;
        };
        lines.push(format!(
            "{} {}: {}",
            axis.name(lang),
            format_rank(axis, definition.level),
            flatten(definition.prompt(lang))
        ));
    }

    lines.join("\n")
}
