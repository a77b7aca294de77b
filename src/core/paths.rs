// src/core/paths.rs

use crate::{
    constants::{CONFIG_DIR_NAME, SPEC_ENV_VAR, SPEC_FILENAMES},
    core::input_merger::EnvSource,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while locating the specification document.
#[derive(Error, Debug)]
pub enum PathError {
    /// `~` or a `$VAR` in the path could not be expanded.
    #[error("Could not expand specification path '{path}': {reason}")]
    Expansion { path: String, reason: String },
    /// No candidate location holds a document.
    #[error("No specification file found. Searched: {}", .searched.join(", "))]
    SpecNotFound { searched: Vec<String> },
}

/// Returns the path to the user-level configuration directory (`~/.config/giac`), if the
/// platform has one. Nothing is created.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

fn expand(raw: &str) -> Result<PathBuf, PathError> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| PathError::Expansion {
            path: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Candidate locations, in lookup order, when no explicit path was given.
fn default_candidates(working_dir: &Path, config_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = SPEC_FILENAMES.iter().map(|name| working_dir.join(name)).collect();
    if let Some(dir) = config_dir {
        candidates.extend(SPEC_FILENAMES.iter().map(|name| dir.join(name)));
    }
    candidates
}

/// Locates the specification document.
///
/// # Order:
/// 1. `explicit` (the `--spec` flag), taken as-is even if it does not exist, so the loader
///    reports the real I/O error;
/// 2. the `GIAC_SPEC` environment variable, with `~` and `$VARS` expanded;
/// 3. `spec.toml` / `spec.json` in `working_dir`;
/// 4. `spec.toml` / `spec.json` in `config_dir`.
pub fn resolve_spec_path(
    explicit: Option<&str>,
    env: &impl EnvSource,
    working_dir: &Path,
    config_dir: Option<&Path>,
) -> Result<PathBuf, PathError> {
    if let Some(raw) = explicit {
        let path = expand(raw)?;
        log::debug!("Specification path from --spec: {}", path.display());
        return Ok(path);
    }
    if let Some(raw) = env.var(SPEC_ENV_VAR) {
        let path = expand(&raw)?;
        log::debug!("Specification path from {}: {}", SPEC_ENV_VAR, path.display());
        return Ok(path);
    }

    let candidates = default_candidates(working_dir, config_dir);
    if let Some(found) = candidates.iter().find(|candidate| candidate.is_file()) {
        let canonical = dunce::canonicalize(found).unwrap_or_else(|_| found.clone());
        log::debug!("Specification path found at {}", canonical.display());
        return Ok(canonical);
    }

    Err(PathError::SpecNotFound {
        searched: candidates.iter().map(|c| c.display().to_string()).collect(),
    })
}
