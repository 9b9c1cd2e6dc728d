//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::global::GlobalConfig;
use crate::project::{FilterSettings, ProjectConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.framelens/config.toml) - lowest priority
/// 2. Project config (./framelens.toml) - overrides global
/// 3. Environment variables (FRAMELENS_*) - overrides project
/// 4. Host API calls - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Overridden global config path (used by tests)
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Global configuration
    pub global: GlobalConfig,

    /// Project root directory (where framelens.toml was found)
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Maximum number of frames listed in a backtrace, project over global.
    pub fn max_frames(&self) -> Option<usize> {
        self.project
            .render
            .as_ref()
            .and_then(|r| r.max_frames)
            .or_else(|| self.global.render.as_ref().and_then(|r| r.max_frames))
    }

    /// Whether the frame address column is shown (default: false).
    pub fn show_address(&self) -> bool {
        self.project
            .render
            .as_ref()
            .and_then(|r| r.show_address)
            .or_else(|| self.global.render.as_ref().and_then(|r| r.show_address))
            .unwrap_or(false)
    }

    /// Whether source file and line are shown (default: true).
    pub fn show_source(&self) -> bool {
        self.project
            .render
            .as_ref()
            .and_then(|r| r.show_source)
            .or_else(|| self.global.render.as_ref().and_then(|r| r.show_source))
            .unwrap_or(true)
    }

    /// Filters disabled at session start, by registered name.
    pub fn disabled_filters(&self) -> &[String] {
        self.project
            .filters
            .as_ref()
            .map(|f| f.disabled.as_slice())
            .unwrap_or(&[])
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Create a loader that reads the global config from a specific path
    pub fn with_global_path(path: PathBuf) -> Self {
        Self {
            global_config_path: Some(path),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find framelens.toml, then loads and merges
    /// global config if it exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;

        let global_config = self.load_global_config().unwrap_or_default();

        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let global_config = self.load_global_config().unwrap_or_default();

        let project_config = self.apply_env_overrides(project_config)?;
        let project_root = config_path.parent().map(|p| p.to_path_buf());

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Find project configuration by walking up the directory tree
    ///
    /// Returns (project_root, project_config); a missing framelens.toml yields defaults.
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join("framelens.toml");
            if config_path.exists() {
                let config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), config));
            }

            if !current.pop() {
                return Ok((None, ProjectConfig::default()));
            }
        }
    }

    /// Load the global config from the overridden path or the default location
    fn load_global_config(&self) -> ConfigResult<GlobalConfig> {
        match &self.global_config_path {
            Some(path) if path.exists() => GlobalConfig::load_from_file(path),
            Some(_) => Ok(GlobalConfig::default()),
            None => GlobalConfig::load_default(),
        }
    }

    /// Apply FRAMELENS_* environment variable overrides to the project config
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Ok(raw) = env::var("FRAMELENS_MAX_FRAMES") {
            let value: usize = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "FRAMELENS_MAX_FRAMES".to_string(),
                reason: format!("expected a positive integer, got '{raw}'"),
            })?;
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "FRAMELENS_MAX_FRAMES".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            config.render.get_or_insert_with(Default::default).max_frames = Some(value);
        }

        if let Ok(raw) = env::var("FRAMELENS_SHOW_ADDRESS") {
            let value = parse_bool("FRAMELENS_SHOW_ADDRESS", &raw)?;
            config
                .render
                .get_or_insert_with(Default::default)
                .show_address = Some(value);
        }

        if let Ok(raw) = env::var("FRAMELENS_SHOW_SOURCE") {
            let value = parse_bool("FRAMELENS_SHOW_SOURCE", &raw)?;
            config
                .render
                .get_or_insert_with(Default::default)
                .show_source = Some(value);
        }

        if let Ok(raw) = env::var("FRAMELENS_DISABLED_FILTERS") {
            let disabled: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            config.filters = Some(FilterSettings { disabled });
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a boolean environment value ("true"/"false"/"1"/"0")
fn parse_bool(field: &str, raw: &str) -> ConfigResult<bool> {
    match raw {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected 'true' or 'false', got '{raw}'"),
        }),
    }
}
