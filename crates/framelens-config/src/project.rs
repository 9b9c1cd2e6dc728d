//! Project Configuration (framelens.toml)
//!
//! Handles project-level configuration stored in `framelens.toml` at the project root.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project configuration from framelens.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Backtrace rendering settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderSettings>,

    /// Frame filter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSettings>,
}

/// Backtrace rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
    /// Maximum number of frames listed in a backtrace (must be >= 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<usize>,

    /// Show the frame address column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_address: Option<bool>,

    /// Show source file and line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_source: Option<bool>,
}

/// Frame filter settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct FilterSettings {
    /// Filters disabled at session start, by registered name
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

impl ProjectConfig {
    /// Load project configuration from a specific file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: ProjectConfig =
            toml::from_str(&content).map_err(|error| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(render) = &self.render {
            if render.max_frames == Some(0) {
                return Err(ConfigError::InvalidValue {
                    field: "render.max_frames".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let config = ProjectConfig::default();
        assert!(config.render.is_none());
        assert!(config.filters.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [render]
            max_frames = 32
            show_address = true
            show_source = false

            [filters]
            disabled = ["Reverse"]
        "#;
        let config: ProjectConfig = toml::from_str(toml_str).unwrap();
        let render = config.render.unwrap();
        assert_eq!(render.max_frames, Some(32));
        assert_eq!(render.show_address, Some(true));
        assert_eq!(render.show_source, Some(false));
        assert_eq!(config.filters.unwrap().disabled, vec!["Reverse"]);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
            [render]
            max_frames = 8
        "#;
        let config: ProjectConfig = toml::from_str(toml_str).unwrap();
        let render = config.render.unwrap();
        assert_eq!(render.max_frames, Some(8));
        assert_eq!(render.show_address, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml_str = r#"
            [render]
            max_frame = 8
        "#;
        let result: Result<ProjectConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_zero_max_frames() {
        let config = ProjectConfig {
            render: Some(RenderSettings {
                max_frames: Some(0),
                ..Default::default()
            }),
            filters: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_ok() {
        let config = ProjectConfig {
            render: Some(RenderSettings {
                max_frames: Some(1),
                ..Default::default()
            }),
            filters: None,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProjectConfig::load_from_file(Path::new("/nonexistent/framelens.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = ProjectConfig {
            render: Some(RenderSettings {
                max_frames: Some(16),
                show_address: Some(false),
                show_source: Some(true),
            }),
            filters: Some(FilterSettings {
                disabled: vec!["Reverse".to_string()],
            }),
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed: ProjectConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
