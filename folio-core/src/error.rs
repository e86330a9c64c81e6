//! Error types for folio-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ReflectionId, ReflectionKind};

/// All errors that can arise while loading a project model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model file did not exist at the given path.
    #[error("project model not found at {path}")]
    NotFound { path: PathBuf },

    /// Underlying I/O failure while reading the model.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error, with the offending file path.
    #[error("failed to parse project model at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parse error, with the offending file path.
    #[error("failed to parse project model at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported model format at {path}; expected .json, .yaml or .yml")]
    UnsupportedFormat { path: PathBuf },

    /// Root reflection is not a project.
    #[error("root reflection in {path} must be a project, found {kind}")]
    NotAProject { path: PathBuf, kind: ReflectionKind },

    /// Two reflections share an id.
    #[error("duplicate reflection id {id} in {path}")]
    DuplicateId { path: PathBuf, id: ReflectionId },
}

/// All errors that can arise while loading `folio.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config not found at {path}")]
    NotFound { path: PathBuf },
}
