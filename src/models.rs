// src/models.rs

//! Domain types: axes, levels, specifications and profiles.

use crate::constants::UNSPECIFIED_TOKEN;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

/// Invalid raw values for the domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The axis id is blank.
    #[error("Axis id must not be empty.")]
    EmptyAxisId,
    /// The axis id would not survive the command line as a flag key.
    #[error("Axis id '{0}' contains whitespace, '=' or starts with '-'.")]
    MalformedAxisId(String),
    /// A level that is neither a non-negative integer nor the unspecified token.
    #[error("Invalid level value '{0}': expected a non-negative integer or '-'.")]
    InvalidLevel(String),
}

// --- IDENTIFIERS ---

/// The canonical key of an axis, as declared by the specification document.
///
/// Only [`AxisId::new`] builds one, so a raw string can never stand in for an id by accident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(String);

impl AxisId {
    /// Trims `raw` and checks it can be used as an axis key.
    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyAxisId);
        }
        if trimmed.starts_with('-') || trimmed.contains('=') || trimmed.chars().any(char::is_whitespace) {
            return Err(ModelError::MalformedAxisId(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The id as written in the document.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- LEVELS ---

/// A point on an axis: its ordinal rank, or the "use your judgement" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// A numeric rank, only meaningful on an axis that defines it.
    Value(u32),
    /// The `-` level.
    Unspecified,
}

impl Level {
    /// The numeric rank, if any.
    pub fn as_value(&self) -> Option<u32> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unspecified => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Unspecified => f.write_str(UNSPECIFIED_TOKEN),
        }
    }
}

/// The on-disk shape of a level: `level = 3` or `level = "-"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Number(u32),
    Text(String),
}

impl TryFrom<RawLevel> for Level {
    type Error = ModelError;

    fn try_from(raw: RawLevel) -> Result<Self, Self::Error> {
        match raw {
            RawLevel::Number(v) => Ok(Self::Value(v)),
            RawLevel::Text(s) if s.trim() == UNSPECIFIED_TOKEN => Ok(Self::Unspecified),
            RawLevel::Text(s) => s
                .trim()
                .parse::<u32>()
                .map(Self::Value)
                .map_err(|_| ModelError::InvalidLevel(s)),
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawLevel::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

// --- LANGUAGE ---

/// The two languages every specification text comes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// French, the default.
    #[default]
    Fr,
    /// English.
    En,
}

impl Language {
    /// Every supported language, in the order language flags are checked.
    pub const ALL: [Self; 2] = [Self::Fr, Self::En];

    /// Accepts exactly `"fr"` or `"en"`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// The lowercase code used by `GIAC_LANG`, `--lang` and the language switches.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    /// Picks the text matching this language out of a bilingual pair.
    pub fn pick<'a>(&self, fr: &'a str, en: &'a str) -> &'a str {
        match self {
            Self::Fr => fr,
            Self::En => en,
        }
    }
}

// --- SPECIFICATION ---

/// One level of an axis with its bilingual texts.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    /// The level this definition describes.
    pub level: Level,
    /// French display name.
    pub name_fr: String,
    /// English display name.
    pub name_en: String,
    /// French description, shown by `spec`.
    #[serde(default)]
    pub description_fr: String,
    /// English description, shown by `spec`.
    #[serde(default)]
    pub description_en: String,
    /// French prompt fragment. May span several lines.
    pub prompt_fr: String,
    /// English prompt fragment. May span several lines.
    pub prompt_en: String,
}

impl LevelDefinition {
    /// Display name in `lang`.
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_fr, &self.name_en)
    }

    /// Description in `lang`.
    pub fn description(&self, lang: Language) -> &str {
        lang.pick(&self.description_fr, &self.description_en)
    }

    /// Prompt fragment in `lang`, as written in the document.
    pub fn prompt(&self, lang: Language) -> &str {
        lang.pick(&self.prompt_fr, &self.prompt_en)
    }
}

/// One behavioral dimension of a specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    /// Canonical key.
    pub id: AxisId,
    /// Render order; unique within a specification.
    pub priority: u32,
    /// Short identifiers, e.g. `T`. Their lowercase form is a flag key.
    pub initials: Vec<String>,
    /// Extra flag keys declared by the document, on top of the built-in legacy aliases.
    pub aliases: Vec<String>,
    /// French display name.
    pub name_fr: String,
    /// English display name.
    pub name_en: String,
    /// French description.
    pub description_fr: String,
    /// English description.
    pub description_en: String,
    /// Every level the axis accepts.
    pub levels: Vec<LevelDefinition>,
    /// Level used when a profile is filled without asking the user.
    pub default: Option<Level>,
}

impl Axis {
    /// Display name in `lang`.
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_fr, &self.name_en)
    }

    /// Description in `lang`.
    pub fn description(&self, lang: Language) -> &str {
        lang.pick(&self.description_fr, &self.description_en)
    }

    /// Finds the definition of `level` on this axis, by exact equality.
    pub fn level(&self, level: Level) -> Option<&LevelDefinition> {
        self.levels.iter().find(|def| def.level == level)
    }

    /// Whether `level` is one of the axis' levels.
    pub fn has_level(&self, level: Level) -> bool {
        self.level(level).is_some()
    }

    /// The highest numeric level of the axis, used as the scale when rendering `n/max`.
    pub fn max_level(&self) -> Option<u32> {
        self.levels.iter().filter_map(|def| def.level.as_value()).max()
    }
}

/// The complete bilingual specification: global texts plus every axis, keyed by id.
///
/// `axes` has no meaningful order; use [`Spec::axes_in_priority`] whenever order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spec {
    /// French description of the whole specification.
    pub description_fr: String,
    /// English description of the whole specification.
    pub description_en: String,
    /// French header opening every prompt.
    pub prompt_fragment_fr: String,
    /// English header opening every prompt.
    pub prompt_fragment_en: String,
    /// Every axis, keyed by id.
    pub axes: HashMap<AxisId, Axis>,
}

impl Spec {
    /// Description in `lang`.
    pub fn description(&self, lang: Language) -> &str {
        lang.pick(&self.description_fr, &self.description_en)
    }

    /// Prompt header in `lang`.
    pub fn prompt_fragment(&self, lang: Language) -> &str {
        lang.pick(&self.prompt_fragment_fr, &self.prompt_fragment_en)
    }

    /// Looks an axis up by its exact id.
    pub fn axis(&self, id: &AxisId) -> Option<&Axis> {
        self.axes.get(id)
    }

    /// Axes by ascending priority, ties broken by id.
    pub fn axes_in_priority(&self) -> Vec<&Axis> {
        let mut axes: Vec<&Axis> = self.axes.values().collect();
        axes.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));
        axes
    }

    /// Ids in the order of [`Spec::axes_in_priority`].
    pub fn axis_ids_in_priority(&self) -> Vec<AxisId> {
        self.axes_in_priority()
            .into_iter()
            .map(|axis| axis.id.clone())
            .collect()
    }
}

// --- PROFILES ---

/// Levels chosen so far, per axis. An absent axis has not been chosen yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialProfile {
    levels: BTreeMap<AxisId, Level>,
}

impl PartialProfile {
    /// A profile with no axis chosen.
    pub fn new() -> Self {
        Self::default()
    }

    /// The level chosen for `id`, if any.
    pub fn get(&self, id: &AxisId) -> Option<Level> {
        self.levels.get(id).copied()
    }

    /// Whether `id` has been chosen.
    pub fn contains(&self, id: &AxisId) -> bool {
        self.levels.contains_key(id)
    }

    /// Chooses `level` for `id`, replacing any earlier choice.
    pub fn set(&mut self, id: AxisId, level: Level) {
        self.levels.insert(id, level);
    }

    /// Number of chosen axes.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether nothing has been chosen.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Choices in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&AxisId, Level)> {
        self.levels.iter().map(|(id, level)| (id, *level))
    }
}

impl FromIterator<(AxisId, Level)> for PartialProfile {
    fn from_iter<I: IntoIterator<Item = (AxisId, Level)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

/// A profile that went through completion (see `core::profile`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    levels: BTreeMap<AxisId, Level>,
}

impl Profile {
    pub(crate) fn from_levels(levels: BTreeMap<AxisId, Level>) -> Self {
        Self { levels }
    }

    /// The level of `id`, absent only when the axis has no level to fall back to.
    pub fn get(&self, id: &AxisId) -> Option<Level> {
        self.levels.get(id).copied()
    }

    /// Number of axes with a level.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no axis has a level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&AxisId, Level)> {
        self.levels.iter().map(|(id, level)| (id, *level))
    }

    /// Turns the profile back into plain choices, e.g. to complete it again.
    pub fn to_partial(&self) -> PartialProfile {
        self.iter().map(|(id, level)| (id.clone(), level)).collect()
    }
}
