//! Project model loading.
//!
//! A project model is a single JSON or YAML document whose root is a
//! [`Reflection`] of kind `project`. The format is picked from the file
//! extension:
//!
//! ```text
//! project.json          -> serde_json
//! project.yaml / .yml   -> serde_yaml
//! ```
//!
//! Loading validates the root kind and that reflection ids are unique, since
//! url mappings and page events refer to reflections by id.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ModelError;
use crate::types::Reflection;

// ---------------------------------------------------------------------------
// 1. Format detection
// ---------------------------------------------------------------------------

/// Serialization format of a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
}

impl ModelFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ModelFormat::Json),
            "yaml" | "yml" => Some(ModelFormat::Yaml),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load and validate a project model from `path`.
///
/// Returns `ModelError::NotFound` if absent, `ModelError::Json` /
/// `ModelError::Yaml` (with path context) if malformed.
pub fn load_project(path: &Path) -> Result<Reflection, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let format = ModelFormat::from_path(path).ok_or_else(|| ModelError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_project(&contents, format, path)
}

/// Parse a project model from an in-memory string.
///
/// `origin` is only used for error messages.
pub fn parse_project(
    contents: &str,
    format: ModelFormat,
    origin: &Path,
) -> Result<Reflection, ModelError> {
    let path = origin.to_path_buf();
    let project: Reflection = match format {
        ModelFormat::Json => serde_json::from_str(contents)
            .map_err(|source| ModelError::Json { path: path.clone(), source })?,
        ModelFormat::Yaml => serde_yaml::from_str(contents)
            .map_err(|source| ModelError::Yaml { path: path.clone(), source })?,
    };
    validate(&project, path)?;
    Ok(project)
}

// ---------------------------------------------------------------------------
// 3. Validation
// ---------------------------------------------------------------------------

fn validate(project: &Reflection, path: PathBuf) -> Result<(), ModelError> {
    if !project.is_project() {
        return Err(ModelError::NotAProject {
            path,
            kind: project.kind,
        });
    }
    let mut seen = HashSet::new();
    seen.insert(project.id);
    for reflection in project.descendants() {
        if !seen.insert(reflection.id) {
            return Err(ModelError::DuplicateId {
                path,
                id: reflection.id,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
