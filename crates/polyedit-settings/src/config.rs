//! Configuration and settings management for Polyedit
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Geometry thresholds (minimum area, hit radius)
//! - Key bindings for the modifier keys consulted on click
//! - Rendering styles (widths, radii, colours)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use polyedit_core::Rgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Geometry thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Minimum bounding-box area of a valid closed shape
    pub min_area: f64,
    /// Screen radius used by geometric hit testing
    pub hit_radius: f64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            min_area: 25.0,
            hit_radius: 5.0,
        }
    }
}

/// Raw key identifiers for the held-key gestures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Held while clicking a vertex to delete it
    pub delete_vertex: String,
    /// Held while clicking a filler to toggle straight/curve
    pub toggle_curve: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            delete_vertex: "Alt".to_string(),
            toggle_curve: "Shift".to_string(),
        }
    }
}

/// Rendering style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Outline width in screen pixels
    pub stroke_width: f64,
    /// Marker radius in screen pixels
    pub point_radius: f64,
    /// Marker radius of the highlighted handle, also the radius around the
    /// first vertex that closes a shape while drawing
    pub highlight_radius: f64,
    /// Dash pattern for helper lines (on, off)
    pub dash: [f64; 2],
    /// How far non-vertex markers are blended toward white
    pub white_blend: f64,
    /// Alpha of the blended non-vertex markers
    pub white_blend_alpha: u8,
    pub outline_color: Rgba,
    pub fill_color: Rgba,
    pub vertex_color: Rgba,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            point_radius: 4.0,
            highlight_radius: 8.0,
            dash: [4.0, 4.0],
            white_blend: 0.5,
            white_blend_alpha: 180,
            outline_color: Rgba::opaque(52, 152, 219),
            fill_color: Rgba::new(52, 152, 219, 64),
            vertex_color: Rgba::opaque(52, 152, 219),
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub geometry: GeometrySettings,
    pub keys: KeyBindings,
    pub style: StyleSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location (`<config dir>/polyedit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("polyedit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Loads the config at `path`, or the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("geometry.min_area", self.geometry.min_area)?;
        positive("geometry.hit_radius", self.geometry.hit_radius)?;
        positive("style.stroke_width", self.style.stroke_width)?;
        positive("style.point_radius", self.style.point_radius)?;
        positive("style.highlight_radius", self.style.highlight_radius)?;

        if !(0.0..=1.0).contains(&self.style.white_blend) {
            return Err(ConfigError::ValueOutOfRange {
                key: "style.white_blend".to_string(),
                value: self.style.white_blend.to_string(),
            });
        }

        if self.style.dash.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "style.dash".to_string(),
                value: format!("{:?}", self.style.dash),
            });
        }

        for (key, binding) in [
            ("keys.delete_vertex", &self.keys.delete_vertex),
            ("keys.toggle_curve", &self.keys.toggle_curve),
        ] {
            if binding.trim().is_empty() {
                return Err(ConfigError::InvalidKeyBinding {
                    key: key.to_string(),
                    reason: "empty".to_string(),
                });
            }
        }

        if self.keys.delete_vertex == self.keys.toggle_curve {
            return Err(ConfigError::InvalidKeyBinding {
                key: "keys.toggle_curve".to_string(),
                reason: format!("'{}' is already bound", self.keys.toggle_curve),
            });
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
