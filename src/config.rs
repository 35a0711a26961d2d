use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::canvas::CanvasStyle;
use crate::error::ConfigError;
use crate::grid::GridSize;

/// Environment variable naming a JSON config file for the native binary
pub const CONFIG_ENV_VAR: &str = "PIXEL_STUDIO_CONFIG";

/// Accepted range for `canvas_px`
pub const CANVAS_PX_RANGE: std::ops::RangeInclusive<f32> = 64.0..=4096.0;

/// Startup settings. Nothing here is written back; the studio keeps no
/// state between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults
pub struct StudioConfig {
    pub default_grid_size: GridSize,
    /// Initial brush color as `#RRGGBB`
    pub default_color: String,
    pub canvas_px: f32,
    pub padding_px: f32,
    pub show_cell_borders: bool,
    /// Directory the native "Save" button writes into
    pub export_dir: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            default_grid_size: GridSize::default(),
            default_color: "#000000".to_owned(),
            canvas_px: 500.0,
            padding_px: 16.0,
            show_cell_borders: true,
            export_dir: PathBuf::from("."),
        }
    }
}

impl StudioConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {}", Path::new(&path).display());
                Self::load(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.brush_color()?;

        let invalid = |msg: String| Err(ConfigError::InvalidGeometry(msg));
        if !self.canvas_px.is_finite() || !CANVAS_PX_RANGE.contains(&self.canvas_px) {
            return invalid(format!(
                "canvas_px {} is outside {}..={}",
                self.canvas_px,
                CANVAS_PX_RANGE.start(),
                CANVAS_PX_RANGE.end()
            ));
        }
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return invalid(format!("padding_px {} must be a non-negative number", self.padding_px));
        }
        // Leave at least one pixel per cell at the largest grid size
        if self.canvas_px - 2.0 * self.padding_px < GridSize::MAX as f32 {
            return invalid(format!(
                "padding_px {} leaves no room for cells in a {}px canvas",
                self.padding_px, self.canvas_px
            ));
        }
        Ok(())
    }

    pub fn brush_color(&self) -> Result<Color32, ConfigError> {
        parse_hex_color(&self.default_color)
    }

    pub fn canvas_style(&self) -> CanvasStyle {
        CanvasStyle {
            canvas_px: self.canvas_px,
            padding_px: self.padding_px,
            show_cell_borders: self.show_cell_borders,
        }
    }
}

/// Parses `#RRGGBB` (leading `#` optional)
pub fn parse_hex_color(text: &str) -> Result<Color32, ConfigError> {
    let invalid = || ConfigError::InvalidColor(text.to_owned());
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub fn to_hex_color(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}
