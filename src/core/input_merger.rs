// src/core/input_merger.rs

//! Merges command-line flags and environment variables into a [`PartialProfile`] and a
//! [`Language`].
//!
//! Precedence differs between the two targets:
//! - axis values: the axis' environment variable beats every flag for that axis;
//! - language: a CLI language flag beats `GIAC_LANG`, which beats the built-in default.

use crate::{
    constants::{AXIS_ENV_ALIASES, AXIS_ENV_SUFFIX, AXIS_FLAG_ALIASES, LANG_ENV_VAR, LANG_FLAG},
    core::{arg_parser::ParsedFlags, resolver},
    models::{Axis, AxisId, Language, Level, PartialProfile, Spec},
};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
}

/// Read access to environment variables.
pub trait EnvSource {
    /// The value of `name`, or `None` when it is unset or not valid Unicode.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// The outcome of merging all input sources for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedInput {
    /// Axes set by the environment or the flags. Unset axes are absent.
    pub profile: PartialProfile,
    /// Output language.
    pub lang: Language,
}

/// The environment variable for an axis: `telisme` -> `TELISME_VALUE`, `my-axis` -> `MY_AXIS_VALUE`.
pub fn axis_env_var(id: &AxisId) -> String {
    let upper = id.as_str().to_uppercase();
    format!("{}{}", NON_ALNUM_RE.replace_all(&upper, "_"), AXIS_ENV_SUFFIX)
}

/// Every environment variable consulted for an axis, in order.
pub fn axis_env_vars(axis: &Axis) -> Vec<String> {
    let mut names = vec![axis_env_var(&axis.id)];
    names.extend(
        AXIS_ENV_ALIASES
            .iter()
            .filter(|(_, target)| *target == axis.id.as_str())
            .map(|(name, _)| name.to_string()),
    );
    names
}

/// Every flag key that sets an axis, in the order they are tried:
/// the id, the built-in aliases, the document aliases, then the lowercase initials.
pub fn axis_flag_keys(axis: &Axis) -> Vec<String> {
    let mut keys = vec![axis.id.as_str().to_string()];
    keys.extend(
        AXIS_FLAG_ALIASES
            .iter()
            .filter(|(_, target)| *target == axis.id.as_str())
            .map(|(alias, _)| alias.to_string()),
    );
    keys.extend(axis.aliases.iter().cloned());
    keys.extend(axis.initials.iter().map(|initial| initial.to_lowercase()));

    let mut seen = std::collections::HashSet::new();
    keys.retain(|key| seen.insert(key.clone()));
    keys
}

/// Picks the output language: built-in default, then `GIAC_LANG`, then `--lang`, `--fr`, `--en`.
pub fn resolve_language(flags: &ParsedFlags, env: &impl EnvSource) -> Language {
    let mut lang = Language::default();

    if let Some(from_env) = env.var(LANG_ENV_VAR).as_deref().and_then(Language::from_code) {
        lang = from_env;
    }
    if let Some(from_flag) = flags.value(LANG_FLAG).and_then(Language::from_code) {
        lang = from_flag;
    }
    for candidate in Language::ALL {
        if flags.is_on(candidate.code()) {
            lang = candidate;
        }
    }
    lang
}

fn level_from_env(axis: &Axis, env: &impl EnvSource) -> Option<Level> {
    axis_env_vars(axis).into_iter().find_map(|name| {
        let raw = env.var(&name)?;
        let level = resolver::resolve_level(axis, raw.as_str());
        if level.is_none() {
            log::debug!("Ignoring {}='{}': not a level of axis '{}'", name, raw, axis.id);
        }
        level
    })
}

fn level_from_flags(axis: &Axis, flags: &ParsedFlags) -> Option<Level> {
    axis_flag_keys(axis).into_iter().find_map(|key| {
        let raw = flags.value(&key)?;
        let level = resolver::resolve_level(axis, raw);
        if level.is_none() {
            log::debug!("Ignoring --{} '{}': not a level of axis '{}'", key, raw, axis.id);
        }
        level
    })
}

/// Merges already-parsed flags with the environment.
pub fn merge_flags(spec: &Spec, flags: &ParsedFlags, env: &impl EnvSource) -> MergedInput {
    let mut profile = PartialProfile::new();

    for axis in spec.axes_in_priority() {
        if let Some(level) = level_from_env(axis, env) {
            log::debug!("Axis '{}' set to {} from the environment", axis.id, level);
            profile.set(axis.id.clone(), level);
            continue;
        }
        if let Some(level) = level_from_flags(axis, flags) {
            log::debug!("Axis '{}' set to {} from the command line", axis.id, level);
            profile.set(axis.id.clone(), level);
        }
    }

    let lang = resolve_language(flags, env);
    log::debug!("Merged {} axis value(s), language '{}'", profile.len(), lang.code());
    MergedInput { profile, lang }
}

/// Parses raw CLI tokens and merges them with the environment.
pub fn merge_inputs(spec: &Spec, args: &[String], env: &impl EnvSource) -> MergedInput {
    merge_flags(spec, &ParsedFlags::parse(args), env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{axis, id, spec_with, two_axis_spec};

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_env_var_name_derivation() {
        assert_eq!(axis_env_var(&id("telisme")), "TELISME_VALUE");
        assert_eq!(axis_env_var(&id("my-axis.v2")), "MY_AXIS_V2_VALUE");
    }

    #[test]
    fn test_defaults_without_input() {
        let merged = merge_inputs(&two_axis_spec(), &[], &env(&[]));
        assert_eq!(merged, MergedInput::default());
        assert_eq!(merged.lang, Language::Fr);
    }

    #[test]
    fn test_long_short_and_localized_forms_converge() {
        let spec = two_axis_spec();
        let expected = Some(Level::Value(5));
        for tokens in [
            vec!["--telisme=5"],
            vec!["--telisme", "5"],
            vec!["-t", "5"],
            vec!["-t=5"],
            vec!["--telisme", "Niveau 5"],
            vec!["--telisme", "level 5"],
            vec!["--initiative", "5"],
        ] {
            let merged = merge_inputs(&spec, &args(&tokens), &env(&[]));
            assert_eq!(merged.profile.get(&id("telisme")), expected, "tokens: {tokens:?}");
        }
    }

    #[test]
    fn test_multiple_axes_and_legacy_alias() {
        let merged = merge_inputs(
            &two_axis_spec(),
            &args(&["--telisme", "10", "--challenge", "3"]),
            &env(&[]),
        );
        assert_eq!(merged.profile.get(&id("telisme")), Some(Level::Value(10)));
        assert_eq!(merged.profile.get(&id("confrontation")), Some(Level::Value(3)));
    }

    #[test]
    fn test_accented_alias() {
        let spec = spec_with(vec![axis("density", 1, "D", ("Densité", "Density"), &[0, 2])]);
        let merged = merge_inputs(&spec, &args(&["--densité", "2"]), &env(&[]));
        assert_eq!(merged.profile.get(&id("density")), Some(Level::Value(2)));
    }

    #[test]
    fn test_document_aliases_are_flag_keys() {
        let mut custom = axis("tone", 1, "O", ("Ton", "Tone"), &[1, 2]);
        custom.aliases = vec!["voice".to_string()];
        assert_eq!(axis_flag_keys(&custom), vec!["tone", "voice", "o"]);
        let spec = spec_with(vec![custom]);
        let merged = merge_inputs(&spec, &args(&["--voice", "2"]), &env(&[]));
        assert_eq!(merged.profile.get(&id("tone")), Some(Level::Value(2)));
    }

    #[test]
    fn test_invalid_value_is_ignored() {
        let merged = merge_inputs(&two_axis_spec(), &args(&["--telisme", "99"]), &env(&[]));
        assert!(!merged.profile.contains(&id("telisme")));
    }

    #[test]
    fn test_first_resolving_key_wins() {
        // The id key holds garbage, so the alias is consulted next.
        let merged = merge_inputs(
            &two_axis_spec(),
            &args(&["--telisme", "nope", "-t", "0"]),
            &env(&[]),
        );
        assert_eq!(merged.profile.get(&id("telisme")), Some(Level::Value(0)));

        let merged = merge_inputs(
            &two_axis_spec(),
            &args(&["--telisme", "10", "-t", "0"]),
            &env(&[]),
        );
        assert_eq!(merged.profile.get(&id("telisme")), Some(Level::Value(10)));
    }

    #[test]
    fn test_env_value_beats_cli_for_the_same_axis() {
        let merged = merge_inputs(
            &two_axis_spec(),
            &args(&["--telisme", "5"]),
            &env(&[("TELISME_VALUE", "0")]),
        );
        assert_eq!(merged.profile.get(&id("telisme")), Some(Level::Value(0)));
    }

    #[test]
    fn test_unresolvable_env_value_falls_back_to_cli() {
        let merged = merge_inputs(
            &two_axis_spec(),
            &args(&["--telisme", "5"]),
            &env(&[("TELISME_VALUE", "7")]),
        );
        assert_eq!(merged.profile.get(&id("telisme")), Some(Level::Value(5)));
    }

    #[test]
    fn test_legacy_env_alias() {
        let merged = merge_inputs(&two_axis_spec(), &[], &env(&[("CHALLENGE_VALUE", "Niveau 3")]));
        assert_eq!(merged.profile.get(&id("confrontation")), Some(Level::Value(3)));

        let merged = merge_inputs(
            &two_axis_spec(),
            &[],
            &env(&[("CHALLENGE_VALUE", "3"), ("CONFRONTATION_VALUE", "0")]),
        );
        assert_eq!(merged.profile.get(&id("confrontation")), Some(Level::Value(0)));
    }

    #[test]
    fn test_language_from_env_and_flags() {
        let spec = two_axis_spec();
        assert_eq!(merge_inputs(&spec, &args(&["--en"]), &env(&[])).lang, Language::En);
        assert_eq!(merge_inputs(&spec, &args(&["--fr"]), &env(&[])).lang, Language::Fr);
        assert_eq!(merge_inputs(&spec, &[], &env(&[("GIAC_LANG", "en")])).lang, Language::En);
        assert_eq!(merge_inputs(&spec, &[], &env(&[("GIAC_LANG", "de")])).lang, Language::Fr);
        assert_eq!(merge_inputs(&spec, &args(&["--lang", "en"]), &env(&[])).lang, Language::En);
    }

    #[test]
    fn test_cli_language_beats_env_language() {
        let spec = two_axis_spec();
        let merged = merge_inputs(&spec, &args(&["--en"]), &env(&[("GIAC_LANG", "fr")]));
        assert_eq!(merged.lang, Language::En);
        let merged = merge_inputs(&spec, &args(&["--fr"]), &env(&[("GIAC_LANG", "en")]));
        assert_eq!(merged.lang, Language::Fr);
    }
}
