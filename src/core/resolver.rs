// src/core/resolver.rs

//! Matches free-form user input against the axes and levels of a [`Spec`].
//!
//! Matching is exact: the input is trimmed and compared case-insensitively, numbers must be
//! one of the axis' own level values. A miss is `None`, never an error; the caller decides
//! whether to ask again or to ignore the input.

use crate::constants::UNSPECIFIED_TOKEN;
use crate::models::{Axis, Level, Spec};

/// What the user typed for a level: text from a flag, a prompt or an env var, or a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelInput<'a> {
    /// Raw text: a number, a level name or `-`.
    Text(&'a str),
    /// A number that still has to be integral to match.
    Number(f64),
}

impl<'a> From<&'a str> for LevelInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for LevelInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<i64> for LevelInput<'_> {
    fn from(value: i64) -> Self {
        // Level values are u32, so any i64 outside f64's exact range is out of set anyway.
        #[allow(clippy::cast_precision_loss)]
        Self::Number(value as f64)
    }
}

impl From<u32> for LevelInput<'_> {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for LevelInput<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Resolves an axis by id, then initials, then French name, then English name.
///
/// Each stage scans every axis before the next stage starts, so an id always wins over
/// another axis' initial.
pub fn resolve_axis<'s>(spec: &'s Spec, input: &str) -> Option<&'s Axis> {
    let wanted = normalize(input);
    if wanted.is_empty() {
        return None;
    }
    let axes = spec.axes_in_priority();

    let found = axes
        .iter()
        .find(|axis| axis.id.as_str().to_lowercase() == wanted)
        .or_else(|| {
            axes.iter()
                .find(|axis| axis.initials.iter().any(|i| i.to_lowercase() == wanted))
        })
        .or_else(|| axes.iter().find(|axis| axis.name_fr.to_lowercase() == wanted))
        .or_else(|| axes.iter().find(|axis| axis.name_en.to_lowercase() == wanted))
        .copied();

    log::trace!("resolve_axis('{}') -> {:?}", input, found.map(|a| &a.id));
    found
}

/// Resolves a level on `axis` from a number, the unspecified token, or a level name.
pub fn resolve_level<'a>(axis: &Axis, input: impl Into<LevelInput<'a>>) -> Option<Level> {
    let resolved = match input.into() {
        LevelInput::Number(n) => resolve_number(axis, n),
        LevelInput::Text(text) => resolve_text(axis, text),
    };
    log::trace!("resolve_level on '{}' -> {:?}", axis.id, resolved);
    resolved
}

fn resolve_number(axis: &Axis, n: f64) -> Option<Level> {
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    // Range and integrality were checked above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let level = Level::Value(n as u32);
    axis.has_level(level).then_some(level)
}

fn resolve_text(axis: &Axis, text: &str) -> Option<Level> {
    let wanted = normalize(text);
    if wanted.is_empty() {
        return None;
    }

    if wanted == UNSPECIFIED_TOKEN {
        return axis.has_level(Level::Unspecified).then_some(Level::Unspecified);
    }

    if let Ok(n) = wanted.parse::<u32>() {
        let level = Level::Value(n);
        if axis.has_level(level) {
            return Some(level);
        }
    }

    axis.levels
        .iter()
        .find(|def| def.name_fr.to_lowercase() == wanted)
        .or_else(|| axis.levels.iter().find(|def| def.name_en.to_lowercase() == wanted))
        .map(|def| def.level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{axis_with_unspecified, two_axis_spec};

    #[test]
    fn test_resolve_axis_by_every_identity() {
        let spec = two_axis_spec();
        for input in ["telisme", "TELISME", "t", "T", "Télisme", "télisme", "Telism", "  telism "] {
            let axis = resolve_axis(&spec, input).unwrap();
            assert_eq!(axis.id.as_str(), "telisme", "input: {input:?}");
        }
        assert_eq!(resolve_axis(&spec, "challenge").unwrap().id.as_str(), "confrontation");
    }

    #[test]
    fn test_resolve_axis_not_found() {
        let spec = two_axis_spec();
        assert!(resolve_axis(&spec, "density").is_none());
        assert!(resolve_axis(&spec, "").is_none());
        assert!(resolve_axis(&spec, "tel").is_none());
    }

    #[test]
    fn test_resolve_level_is_reflexive_over_values_and_names() {
        let spec = two_axis_spec();
        for axis in spec.axes.values() {
            for def in &axis.levels {
                assert_eq!(resolve_level(axis, def.level.as_value().unwrap()), Some(def.level));
                assert_eq!(resolve_level(axis, def.level.to_string().as_str()), Some(def.level));
                assert_eq!(resolve_level(axis, def.name_fr.to_uppercase().as_str()), Some(def.level));
                let padded = format!("  {}\t", def.name_en.to_lowercase());
                assert_eq!(resolve_level(axis, &padded), Some(def.level));
            }
        }
    }

    #[test]
    fn test_resolve_level_rejects_values_outside_the_set() {
        let spec = two_axis_spec();
        let telisme = spec.axes.values().find(|a| a.id.as_str() == "telisme").unwrap();
        assert_eq!(resolve_level(telisme, 3_u32), None);
        assert_eq!(resolve_level(telisme, 99_i64), None);
        assert_eq!(resolve_level(telisme, -5_i64), None);
        assert_eq!(resolve_level(telisme, 5.5), None);
        assert_eq!(resolve_level(telisme, 5.0), Some(Level::Value(5)));
        assert_eq!(resolve_level(telisme, "5.5"), None);
        assert_eq!(resolve_level(telisme, "99"), None);
        assert_eq!(resolve_level(telisme, "Niveau"), None);
        assert_eq!(resolve_level(telisme, ""), None);
    }

    #[test]
    fn test_resolve_level_unspecified_sentinel() {
        let axis = axis_with_unspecified("register", 1, "R");
        assert_eq!(resolve_level(&axis, "-"), Some(Level::Unspecified));
        assert_eq!(resolve_level(&axis, " - "), Some(Level::Unspecified));
        assert_eq!(resolve_level(&axis, "Non spécifié"), Some(Level::Unspecified));
        assert_eq!(resolve_level(&axis, "UNSPECIFIED"), Some(Level::Unspecified));

        let spec = two_axis_spec();
        let telisme = spec.axes.values().find(|a| a.id.as_str() == "telisme").unwrap();
        assert_eq!(resolve_level(telisme, "-"), None);
    }
}
