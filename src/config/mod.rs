//! Configuration file support for markboard.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/markboard/config.toml`.
//! Settings include drawing defaults, arrow appearance, and canvas
//! geometry.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

// Re-export commonly used types at module level
pub use types::{ArrowConfig, CanvasConfig, DrawingConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::draw::color;
use crate::engine::StyleState;
use crate::util::Size;

/// Main configuration structure containing all user settings.
///
/// This is the root type deserialized from the TOML file. All fields
/// have sensible defaults and use those when not specified.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "blue"
/// default_line_width = 3.0
/// default_font_size = 32.0
///
/// [arrow]
/// length = 20.0
/// angle_degrees = 30.0
///
/// [canvas]
/// width = 800.0
/// height = 600.0
/// scale_factor = 1.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing tool defaults (color, line width, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrow appearance settings
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Canvas geometry defaults
    #[serde(default)]
    pub canvas: CanvasConfig,
}

impl Config {
    /// Loads configuration from the default path, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads and validates configuration from an explicit file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate_and_clamp();
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default config file location: `~/.config/markboard/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("markboard").join("config.toml"))
    }

    /// Builds the engine style state described by this configuration.
    pub fn style_state(&self) -> StyleState {
        let stroke_color = match color::name_to_color(&self.drawing.default_color) {
            Some(c) => c,
            None => {
                log::warn!(
                    "Unknown default_color '{}', falling back to red",
                    self.drawing.default_color
                );
                color::RED
            }
        };
        StyleState {
            stroke_color,
            fill_color: None,
            line_width: self.drawing.default_line_width,
            dash_pattern: None,
            font_size: self.drawing.default_font_size,
            font: crate::draw::FontDescriptor::new(
                self.drawing.font_family.clone(),
                self.drawing.font_weight.clone(),
                self.drawing.font_style.clone(),
            ),
            arrow_length: self.arrow.length,
            arrow_angle: self.arrow.angle_degrees,
        }
    }

    /// Default logical canvas size described by this configuration.
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas.width, self.canvas.height)
    }

    /// Validates and clamps all configuration values to acceptable
    /// ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a
    /// warning is logged, so a hand-edited config file can never put the
    /// engine into an unusable state.
    ///
    /// Validated ranges:
    /// - `default_line_width`: 1.0 - 40.0
    /// - `default_font_size`: 8.0 - 72.0
    /// - `arrow.length`: 5.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    /// - `canvas.scale_factor`: 0.5 - 4.0
    /// - `canvas.width`/`height`: 16.0 - 16384.0
    fn validate_and_clamp(&mut self) {
        if !(1.0..=40.0).contains(&self.drawing.default_line_width) {
            log::warn!(
                "Invalid default_line_width {:.1}, clamping to 1.0-40.0 range",
                self.drawing.default_line_width
            );
            self.drawing.default_line_width = self.drawing.default_line_width.clamp(1.0, 40.0);
        }

        if !(8.0..=72.0).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(8.0, 72.0);
        }

        if !(5.0..=50.0).contains(&self.arrow.length) {
            log::warn!(
                "Invalid arrow length {:.1}, clamping to 5.0-50.0 range",
                self.arrow.length
            );
            self.arrow.length = self.arrow.length.clamp(5.0, 50.0);
        }

        if !(15.0..=60.0).contains(&self.arrow.angle_degrees) {
            log::warn!(
                "Invalid arrow angle {:.1}, clamping to 15.0-60.0 range",
                self.arrow.angle_degrees
            );
            self.arrow.angle_degrees = self.arrow.angle_degrees.clamp(15.0, 60.0);
        }

        if !(0.5..=4.0).contains(&self.canvas.scale_factor) {
            log::warn!(
                "Invalid scale_factor {:.2}, clamping to 0.5-4.0 range",
                self.canvas.scale_factor
            );
            self.canvas.scale_factor = self.canvas.scale_factor.clamp(0.5, 4.0);
        }

        for (name, value) in [
            ("canvas width", &mut self.canvas.width),
            ("canvas height", &mut self.canvas.height),
        ] {
            if !(16.0..=16384.0).contains(value) {
                log::warn!("Invalid {name} {value:.0}, clamping to 16-16384 range");
                *value = value.clamp(16.0, 16384.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.drawing.default_color, "red");
        assert_eq!(config.canvas_size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            default_line_width = 900.0

            [arrow]
            angle_degrees = 5.0

            [canvas]
            scale_factor = 10.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.drawing.default_line_width, 40.0);
        assert_eq!(config.arrow.angle_degrees, 15.0);
        assert_eq!(config.canvas.scale_factor, 4.0);
    }

    #[test]
    fn style_state_resolves_color_names() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = "blue"
            "#,
        )
        .unwrap();
        let style = config.style_state();
        assert_eq!(style.stroke_color, color::BLUE);
    }

    #[test]
    fn unknown_color_names_fall_back_to_red() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = "mauve"
            "#,
        )
        .unwrap();
        assert_eq!(config.style_state().stroke_color, color::RED);
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not toml [").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
