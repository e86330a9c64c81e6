//! `folio.yaml` configuration.
//!
//! Every field is optional; a missing file yields [`FolioConfig::default`].
//! Command-line flags override whatever the file says.
//!
//! ```yaml
//! theme: minimal        # minimal | default
//! out: docs
//! templates: ./templates
//! name: My Library
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name looked up by [`discover_config`].
pub const CONFIG_FILE_NAME: &str = "folio.yaml";

/// Which theme renders the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Everything on a single `index.html`.
    #[default]
    Minimal,
    /// One page per module, namespace, enum, class and interface.
    Default,
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Minimal => write!(f, "minimal"),
            ThemeName::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub theme: ThemeName,
    /// Output directory, relative to the working directory.
    pub out: PathBuf,
    /// Directory of `.tera` files overriding the embedded templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
    /// Replaces the project name in rendered titles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            out: PathBuf::from("docs"),
            templates: None,
            name: None,
        }
    }
}

/// Load a config file. Returns `ConfigError::NotFound` if absent.
pub fn load_config_at(path: &Path) -> Result<FolioConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty file is a valid "all defaults" config.
    if contents.trim().is_empty() {
        return Ok(FolioConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `<dir>/folio.yaml` if present, defaults otherwise.
pub fn discover_config(dir: &Path) -> Result<FolioConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(FolioConfig::default());
    }
    load_config_at(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = FolioConfig::default();
        assert_eq!(cfg.theme, ThemeName::Minimal);
        assert_eq!(cfg.out, PathBuf::from("docs"));
        assert!(cfg.templates.is_none());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: FolioConfig = serde_yaml::from_str("theme: default\n").expect("parse");
        assert_eq!(cfg.theme, ThemeName::Default);
        assert_eq!(cfg.out, PathBuf::from("docs"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<FolioConfig>("colour: blue\n").is_err());
    }

    #[test]
    fn theme_name_display() {
        assert_eq!(ThemeName::Minimal.to_string(), "minimal");
        assert_eq!(ThemeName::Default.to_string(), "default");
    }
}
