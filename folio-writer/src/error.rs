//! Error types for folio-writer.

use std::path::PathBuf;

use thiserror::Error;

use folio_core::ModelError;
use folio_renderer::RenderError;

/// All errors that can arise while rendering and writing a site.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The project file could not be loaded.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// An error from the renderer or its templates.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hash store JSON could not be read or written.
    #[error("hash store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> WriteError {
    WriteError::Io {
        path: path.into(),
        source,
    }
}
