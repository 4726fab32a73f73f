//! Editor configuration.

use crate::shapes::{CornerStyle, Rectangle};
use crate::tools::DEFAULT_COLOR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable editor behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Color for new shapes.
    pub default_color: String,
    /// Corner style for new rectangles.
    pub default_corner: CornerStyle,
    /// Offset applied to copies.
    pub copy_offset: (i32, i32),
    /// Corner radius of rounded rectangles.
    pub corner_radius: f64,
    /// Outline width of selected shapes.
    pub highlight_width: f64,
    /// Outline width of unselected shapes.
    pub normal_width: f64,
    /// Append the group hierarchy to XML exports.
    pub xml_include_groups: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR.to_string(),
            default_corner: CornerStyle::Sharp,
            copy_offset: (50, 50),
            corner_radius: Rectangle::DEFAULT_CORNER_RADIUS,
            highlight_width: 3.0,
            normal_width: 1.0,
            xml_include_groups: true,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Default config file location.
    ///
    /// On Unix: `~/.config/sketchpad/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sketchpad").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.default_color, "black");
        assert_eq!(config.copy_offset, (50, 50));
        assert_eq!(config.corner_radius, 20.0);
        assert!(config.xml_include_groups);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EditorConfig::from_json(r#"{ "copy_offset": [10, 5], "default_corner": "Rounded" }"#)
                .unwrap();
        assert_eq!(config.copy_offset, (10, 5));
        assert_eq!(config.default_corner, CornerStyle::Rounded);
        assert_eq!(config.highlight_width, 3.0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EditorConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = EditorConfig {
            xml_include_groups: false,
            ..EditorConfig::default()
        };
        fs::write(&path, config.to_json().unwrap()).unwrap();
        assert_eq!(EditorConfig::load(&path).unwrap(), config);

        let missing = dir.path().join("missing.json");
        assert!(matches!(EditorConfig::load(&missing), Err(ConfigError::Io(_))));
        assert_eq!(
            EditorConfig::load_or_default(&missing).unwrap(),
            EditorConfig::default()
        );
    }
}
