//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the style new items are created with. Callers can change
/// these values at runtime through the engine's style setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default stroke color as a named color
    /// (red, green, blue, yellow, orange, pink, white, black)
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Default stroke width in logical units (valid range: 1.0 - 40.0)
    #[serde(default = "default_line_width")]
    pub default_line_width: f64,

    /// Default font size for text items in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for text rendering (e.g., "Sans", "Monospace")
    /// Falls back to "Sans" if the specified font is not available
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_line_width: default_line_width(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Arrow drawing settings.
///
/// Controls the appearance of arrowheads for the arrow tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrowConfig {
    /// Arrowhead length in logical units (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Arrowhead angle in degrees (valid range: 15.0 - 60.0)
    /// Smaller angles create narrower arrowheads
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Canvas geometry defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Default logical canvas width when the caller does not specify one
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    /// Default logical canvas height
    #[serde(default = "default_canvas_height")]
    pub height: f64,

    /// Display pixel density used by device-scaled export
    /// (valid range: 0.5 - 4.0)
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            scale_factor: default_scale_factor(),
        }
    }
}

fn default_color() -> String {
    "red".to_string()
}

fn default_line_width() -> f64 {
    3.0
}

fn default_font_size() -> f64 {
    32.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_arrow_length() -> f64 {
    20.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_canvas_width() -> f64 {
    800.0
}

fn default_canvas_height() -> f64 {
    600.0
}

fn default_scale_factor() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent_between_serde_and_default_impls() {
        let parsed: DrawingConfig = toml::from_str("").unwrap();
        let built = DrawingConfig::default();
        assert_eq!(parsed.default_color, built.default_color);
        assert_eq!(parsed.default_line_width, built.default_line_width);
        assert_eq!(parsed.font_family, built.font_family);
    }

    #[test]
    fn partial_sections_fill_missing_fields() {
        let parsed: ArrowConfig = toml::from_str("length = 12.0").unwrap();
        assert_eq!(parsed.length, 12.0);
        assert_eq!(parsed.angle_degrees, 30.0);
    }
}
