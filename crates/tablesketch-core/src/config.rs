//! Editor configuration.
//!
//! Every field has a default, so a host only needs to send the values it
//! wants to change.

use crate::shapes::{SerializableColor, ShapeStyle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid editor config: {field} must be finite and not negative, got {value:?}")]
    Invalid { field: &'static str, value: [f64; 2] },
}

/// Settings for the group table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Headers the table starts with.
    pub initial_headers: Vec<String>,
    /// Name of the top-level group the table starts with.
    pub initial_group_name: String,
    /// Rows of the initial group. Padded or truncated to the header count.
    pub initial_rows: Vec<Vec<String>>,
    /// Label given to a newly added header.
    pub default_header_label: String,
    /// Subgroups added with the shortcut are named `"{prefix} {n}"`.
    pub subgroup_name_prefix: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_headers: vec!["Sample Header 1".to_string()],
            initial_group_name: "Sample Group".to_string(),
            initial_rows: vec![vec!["Sample Row 1".to_string()]],
            default_header_label: "New Category".to_string(),
            subgroup_name_prefix: "New Subgroup".to_string(),
        }
    }
}

/// Settings for the canvas overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Offset applied to duplicated shapes, `[dx, dy]`.
    pub duplicate_offset: [f64; 2],
    /// Size of shapes added from the context menu, `[width, height]`.
    pub default_shape_size: [f64; 2],
    /// Colors the tools start with.
    pub default_style: ShapeStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            duplicate_offset: [20.0, 20.0],
            default_shape_size: [120.0, 80.0],
            default_style: ShapeStyle {
                fill_color: SerializableColor::white(),
                stroke_color: SerializableColor::black(),
                text_color: SerializableColor::black(),
            },
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub table: TableConfig,
    pub canvas: CanvasConfig,
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.canvas.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl CanvasConfig {
    /// Shape sizes must be usable as a width and height.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let value = self.default_shape_size;
        if value.iter().all(|v| v.is_finite() && *v >= 0.0) {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                field: "default_shape_size",
                value,
            })
        }
    }
}
