//! Folio core library: documentation model types, loading, configuration.
//!
//! - [`types`]: [`Reflection`] tree, ids and kinds
//! - [`loader`]: load a project model from JSON or YAML
//! - [`config`]: `folio.yaml`
//! - [`error`]: [`ModelError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod loader;
pub mod types;

pub use config::{FolioConfig, ThemeName};
pub use error::{ConfigError, ModelError};
pub use types::{Reflection, ReflectionId, ReflectionKind};
