//! Error types for folio-renderer.

use std::path::PathBuf;

use thiserror::Error;

use folio_core::ReflectionId;

/// All errors that can arise from rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (search index, template context).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// A url mapping points at a reflection that is not in the project.
    #[error("url mapping refers to unknown reflection {id}")]
    MissingModel { id: ReflectionId },

    /// `Renderer::render` was called before a theme was set.
    #[error("no theme attached to the renderer")]
    NoTheme,
}
