// src/core/profile.rs

use crate::{
    core::resolver,
    models::{Axis, AxisId, Language, Level, PartialProfile, Profile, Spec},
};
use anyhow::Result;
use std::collections::BTreeMap;

/// The interactive side of profile completion: asks the user for one axis at a time.
pub trait LevelPrompter {
    /// Asks for a level on `axis` and returns the raw answer.
    fn ask(&mut self, axis: &Axis, lang: Language) -> Result<String>;

    /// Tells the user `input` is not a level of `axis`. The axis is asked again afterwards.
    fn reject(&mut self, axis: &Axis, input: &str, lang: Language);
}

/// Returns the ids of `axis_ids` absent from `partial`, in the order they were given.
pub fn get_missing_axes(partial: &PartialProfile, axis_ids: &[AxisId]) -> Vec<AxisId> {
    axis_ids
        .iter()
        .filter(|id| !partial.contains(id))
        .cloned()
        .collect()
}

/// Whether every one of `axis_ids` has a level in `partial`.
pub fn is_complete(partial: &PartialProfile, axis_ids: &[AxisId]) -> bool {
    axis_ids.iter().all(|id| partial.contains(id))
}

/// Fills every axis absent from `partial` with its entry in `defaults`.
///
/// An axis absent from both stays absent.
pub fn create_profile(partial: &PartialProfile, defaults: &PartialProfile) -> Profile {
    let mut levels: BTreeMap<AxisId, Level> = partial
        .iter()
        .map(|(id, level)| (id.clone(), level))
        .collect();
    for (id, level) in defaults.iter() {
        levels.entry(id.clone()).or_insert(level);
    }
    Profile::from_levels(levels)
}

/// The level each axis falls back to when nobody picks one: the document's `default`,
/// else the unspecified level if the axis defines it.
pub fn default_levels(spec: &Spec) -> PartialProfile {
    spec.axes_in_priority()
        .into_iter()
        .filter_map(|axis| {
            let level = axis
                .default
                .filter(|level| axis.has_level(*level))
                .or_else(|| axis.has_level(Level::Unspecified).then_some(Level::Unspecified))?;
            Some((axis.id.clone(), level))
        })
        .collect()
}

impl Profile {
    /// Accepts `partial` as a profile only if it covers every axis of `spec`.
    pub fn from_complete(partial: &PartialProfile, spec: &Spec) -> Option<Self> {
        is_complete(partial, &spec.axis_ids_in_priority())
            .then(|| create_profile(partial, &PartialProfile::new()))
    }
}

/// Asks `prompter` for every axis missing from `partial`, in priority order.
///
/// An answer that does not resolve to a level of the axis is rejected and the same axis is
/// asked again, as many times as it takes. Errors from the prompter itself abort.
pub fn complete_interactively(
    spec: &Spec,
    partial: &PartialProfile,
    lang: Language,
    prompter: &mut impl LevelPrompter,
) -> Result<Profile> {
    let mut completed = partial.clone();

    for id in get_missing_axes(partial, &spec.axis_ids_in_priority()) {
        let Some(axis) = spec.axis(&id) else {
            continue;
        };
        let level = loop {
            let answer = prompter.ask(axis, lang)?;
            match resolver::resolve_level(axis, answer.as_str()) {
                Some(level) => break level,
                None => {
                    log::debug!("Rejected '{}' for axis '{}'", answer.trim(), axis.id);
                    prompter.reject(axis, &answer, lang);
                }
            }
        };
        completed.set(id, level);
    }

    Ok(create_profile(&completed, &PartialProfile::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{axis, axis_with_unspecified, id, spec_with, two_axis_spec};
    use anyhow::anyhow;
    use std::collections::VecDeque;

    /// Answers from a script and records every rejection.
    struct ScriptedPrompter {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
        rejected: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
                rejected: Vec::new(),
            }
        }
    }

    impl LevelPrompter for ScriptedPrompter {
        fn ask(&mut self, axis: &Axis, _lang: Language) -> Result<String> {
            self.asked.push(axis.id.to_string());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("no more answers"))
        }

        fn reject(&mut self, _axis: &Axis, input: &str, _lang: Language) {
            self.rejected.push(input.to_string());
        }
    }

    fn ids(raw: &[&str]) -> Vec<AxisId> {
        raw.iter().map(|r| id(r)).collect()
    }

    fn partial(pairs: &[(&str, u32)]) -> PartialProfile {
        pairs.iter().map(|(k, v)| (id(k), Level::Value(*v))).collect()
    }

    #[test]
    fn test_missing_axes_keep_the_given_order() {
        let all = ids(&["telisme", "confrontation", "density", "energy"]);
        let p = partial(&[("confrontation", 3)]);
        assert_eq!(get_missing_axes(&p, &all), ids(&["telisme", "density", "energy"]));
        assert!(!is_complete(&p, &all));
    }

    #[test]
    fn test_missing_and_present_partition_the_axis_set() {
        let all = ids(&["telisme", "confrontation", "density"]);
        let p = partial(&[("telisme", 5), ("density", 1)]);
        let missing = get_missing_axes(&p, &all);
        let mut union: Vec<AxisId> = missing.clone();
        union.extend(p.iter().map(|(id, _)| id.clone()));
        union.sort();
        let mut expected = all.clone();
        expected.sort();
        assert_eq!(union, expected);
        assert!(missing.iter().all(|m| !p.contains(m)));
    }

    #[test]
    fn test_is_complete() {
        let all = ids(&["telisme", "confrontation"]);
        assert!(is_complete(&partial(&[("telisme", 0), ("confrontation", 0)]), &all));
        assert!(is_complete(&PartialProfile::new(), &[]));
        assert!(!is_complete(&PartialProfile::new(), &all));
    }

    #[test]
    fn test_create_profile_fills_from_defaults_only_when_missing() {
        let defaults = partial(&[("telisme", 7), ("confrontation", 7)]);
        let profile = create_profile(&partial(&[("telisme", 0)]), &defaults);
        assert_eq!(profile.get(&id("telisme")), Some(Level::Value(0)));
        assert_eq!(profile.get(&id("confrontation")), Some(Level::Value(7)));
    }

    #[test]
    fn test_create_profile_leaves_uncovered_axes_absent() {
        let profile = create_profile(&partial(&[("telisme", 5)]), &PartialProfile::new());
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.get(&id("confrontation")), None);
    }

    #[test]
    fn test_create_profile_is_idempotent() {
        let defaults = partial(&[("telisme", 5), ("confrontation", 0)]);
        let once = create_profile(&partial(&[("confrontation", 3)]), &defaults);
        let twice = create_profile(&once.to_partial(), &defaults);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_default_levels() {
        let mut with_default = axis("telisme", 1, "T", ("Télisme", "Telism"), &[0, 5]);
        with_default.default = Some(Level::Value(5));
        let mut stale_default = axis("confrontation", 2, "C", ("Confrontation", "Challenge"), &[0]);
        stale_default.default = Some(Level::Value(9));
        let spec = spec_with(vec![with_default, stale_default, axis_with_unspecified("register", 3, "R")]);

        let defaults = default_levels(&spec);
        assert_eq!(defaults.get(&id("telisme")), Some(Level::Value(5)));
        assert_eq!(defaults.get(&id("confrontation")), None);
        assert_eq!(defaults.get(&id("register")), Some(Level::Unspecified));
    }

    #[test]
    fn test_from_complete_requires_every_axis() {
        let spec = two_axis_spec();
        assert!(Profile::from_complete(&partial(&[("telisme", 5)]), &spec).is_none());
        let full = partial(&[("telisme", 5), ("confrontation", 3)]);
        assert_eq!(Profile::from_complete(&full, &spec).unwrap().len(), 2);
    }

    #[test]
    fn test_interactive_completion_asks_missing_axes_in_priority_order() {
        let spec = two_axis_spec();
        let mut prompter = ScriptedPrompter::new(&["10", "niveau 3"]);
        let profile =
            complete_interactively(&spec, &PartialProfile::new(), Language::Fr, &mut prompter).unwrap();

        assert_eq!(prompter.asked, vec!["telisme", "confrontation"]);
        assert_eq!(profile.get(&id("telisme")), Some(Level::Value(10)));
        assert_eq!(profile.get(&id("confrontation")), Some(Level::Value(3)));
        assert!(is_complete(&profile.to_partial(), &spec.axis_ids_in_priority()));
    }

    #[test]
    fn test_interactive_completion_reasks_until_valid() {
        let spec = two_axis_spec();
        let mut prompter = ScriptedPrompter::new(&["", "7", "Level 0"]);
        let profile =
            complete_interactively(&spec, &partial(&[("telisme", 5)]), Language::En, &mut prompter)
                .unwrap();

        assert_eq!(prompter.asked, vec!["confrontation"; 3]);
        assert_eq!(prompter.rejected, vec!["", "7"]);
        assert_eq!(profile.get(&id("telisme")), Some(Level::Value(5)));
        assert_eq!(profile.get(&id("confrontation")), Some(Level::Value(0)));
    }

    #[test]
    fn test_interactive_completion_propagates_prompter_errors() {
        let spec = two_axis_spec();
        let mut prompter = ScriptedPrompter::new(&[]);
        assert!(complete_interactively(&spec, &PartialProfile::new(), Language::Fr, &mut prompter).is_err());
    }

    #[test]
    fn test_interactive_completion_skips_the_prompter_when_complete() {
        let spec = two_axis_spec();
        let mut prompter = ScriptedPrompter::new(&[]);
        let full = partial(&[("telisme", 0), ("confrontation", 0)]);
        let profile = complete_interactively(&spec, &full, Language::Fr, &mut prompter).unwrap();
        assert!(prompter.asked.is_empty());
        assert_eq!(profile.to_partial(), full);
    }
}
