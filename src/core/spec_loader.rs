//! # Spec Loader
//!
//! Reads the bilingual specification document (TOML or JSON) and turns it into a validated
//! [`Spec`]. This is the only place where a hard failure can happen before a prompt is built:
//! everything downstream trusts the ids, priorities and level sets checked here.
use crate::models::{Axis, AxisId, Level, LevelDefinition, ModelError, Spec};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Everything that makes a specification document unusable.
#[derive(Error, Debug)]
pub enum SpecError {
    /// The file could not be read.
    #[error("Could not read specification file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid TOML or does not have the expected shape.
    #[error("Invalid TOML specification: {0}")]
    Toml(#[from] toml::de::Error),
    /// The document is not valid JSON or does not have the expected shape.
    #[error("Invalid JSON specification: {0}")]
    Json(#[from] serde_json::Error),
    /// An `axes` key is not a usable axis id.
    #[error("Invalid axis id: {0}")]
    InvalidAxisId(#[from] ModelError),
    /// Two axes share a priority.
    #[error("Duplicate axis priority {priority}: used by both '{first}' and '{second}'.")]
    DuplicatePriority {
        priority: u32,
        first: AxisId,
        second: AxisId,
    },
    /// An axis lists the same level twice.
    #[error("Axis '{axis}' defines level {level} more than once.")]
    DuplicateLevel { axis: AxisId, level: Level },
    /// An initial or a name resolves to two different axes.
    #[error("Identifier '{identifier}' is claimed by both axis '{first}' and axis '{second}'.")]
    DuplicateIdentifier {
        identifier: String,
        first: AxisId,
        second: AxisId,
    },
    /// An axis `default` is not one of its levels.
    #[error("Axis '{axis}' has default level {level}, which is not one of its levels.")]
    UnknownDefault { axis: AxisId, level: Level },
}

/// Source of the specification, injected into the commands that need one.
pub trait SpecReader {
    /// Loads and validates the specification.
    fn read(&self) -> Result<Spec, SpecError>;
}

/// The serialization formats a specification document can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl SpecFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Reads the specification from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSpecReader {
    path: PathBuf,
}

impl FileSpecReader {
    /// A reader for the document at `path`. Nothing is read until [`SpecReader::read`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpecReader for FileSpecReader {
    fn read(&self) -> Result<Spec, SpecError> {
        log::debug!("Reading specification from {}", self.path.display());
        let content = fs::read_to_string(&self.path).map_err(|e| SpecError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        parse_spec(&content, SpecFormat::from_path(&self.path))
    }
}

// --- Document shape ---

#[derive(Deserialize, Debug)]
struct SpecDocument {
    description_fr: String,
    description_en: String,
    prompt_fragment_fr: String,
    prompt_fragment_en: String,
    #[serde(default)]
    axes: BTreeMap<String, AxisDocument>,
}

#[derive(Deserialize, Debug)]
struct AxisDocument {
    priority: u32,
    #[serde(default)]
    initials: Vec<String>,
    #[serde(default)]
    aliases: Vec<String>,
    name_fr: String,
    name_en: String,
    #[serde(default)]
    description_fr: String,
    #[serde(default)]
    description_en: String,
    #[serde(default)]
    default: Option<Level>,
    #[serde(default)]
    levels: Vec<LevelDefinition>,
}

/// Parses and validates a specification document.
pub fn parse_spec(content: &str, format: SpecFormat) -> Result<Spec, SpecError> {
    let document: SpecDocument = match format {
        SpecFormat::Toml => toml::from_str(content)?,
        SpecFormat::Json => serde_json::from_str(content)?,
    };

    let mut axes = HashMap::new();
    for (raw_id, raw_axis) in document.axes {
        let id = AxisId::new(&raw_id)?;
        let axis = Axis {
            id: id.clone(),
            priority: raw_axis.priority,
            initials: raw_axis.initials,
            aliases: raw_axis.aliases,
            name_fr: raw_axis.name_fr,
            name_en: raw_axis.name_en,
            description_fr: raw_axis.description_fr,
            description_en: raw_axis.description_en,
            levels: raw_axis.levels,
            default: raw_axis.default,
        };
        axes.insert(id, axis);
    }

    let spec = Spec {
        description_fr: document.description_fr,
        description_en: document.description_en,
        prompt_fragment_fr: document.prompt_fragment_fr,
        prompt_fragment_en: document.prompt_fragment_en,
        axes,
    };
    validate(&spec)?;
    log::debug!("Specification loaded with {} axes", spec.axes.len());
    Ok(spec)
}

/// Enforces the load-time invariants of a [`Spec`].
pub fn validate(spec: &Spec) -> Result<(), SpecError> {
    let mut priorities: HashMap<u32, &AxisId> = HashMap::new();
    let mut identifiers: HashMap<String, &AxisId> = HashMap::new();

    for axis in spec.axes_in_priority() {
        if let Some(first) = priorities.insert(axis.priority, &axis.id) {
            return Err(SpecError::DuplicatePriority {
                priority: axis.priority,
                first: first.clone(),
                second: axis.id.clone(),
            });
        }

        let mut seen_levels = Vec::with_capacity(axis.levels.len());
        for definition in &axis.levels {
            if seen_levels.contains(&definition.level) {
                return Err(SpecError::DuplicateLevel {
                    axis: axis.id.clone(),
                    level: definition.level,
                });
            }
            seen_levels.push(definition.level);
        }

        if let Some(level) = axis.default.filter(|level| !axis.has_level(*level)) {
            return Err(SpecError::UnknownDefault {
                axis: axis.id.clone(),
                level,
            });
        }

        // One axis may reuse the same word for its id, initial and names.
        let mut own: Vec<String> = vec![axis.id.as_str().to_lowercase()];
        own.extend(axis.initials.iter().map(|i| i.trim().to_lowercase()));
        own.push(axis.name_fr.trim().to_lowercase());
        own.push(axis.name_en.trim().to_lowercase());
        own.sort();
        own.dedup();
        for identifier in own {
            if let Some(first) = identifiers.insert(identifier.clone(), &axis.id) {
                return Err(SpecError::DuplicateIdentifier {
                    identifier,
                    first: first.clone(),
                    second: axis.id.clone(),
                });
            }
        }
    }
    Ok(())
}
