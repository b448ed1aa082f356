//! Polyedit Settings Crate
//!
//! Handles editor configuration: hit and close radii, the minimum shape area,
//! modifier key bindings and rendering styles, persisted as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{EditorConfig, GeometrySettings, KeyBindings, StyleSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
