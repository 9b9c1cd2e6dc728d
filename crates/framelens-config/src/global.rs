//! Global Configuration (~/.framelens/config.toml)
//!
//! Handles user-level configuration stored in `~/.framelens/config.toml`.

use crate::project::RenderSettings;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration from ~/.framelens/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// User-wide rendering defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderSettings>,
}

impl GlobalConfig {
    /// Default location of the global config file (~/.framelens/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".framelens").join("config.toml"))
    }

    /// Load global configuration from a specific file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: GlobalConfig =
            toml::from_str(&content).map_err(|error| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            })?;
        Ok(config)
    }

    /// Load the global configuration from its default location.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}
