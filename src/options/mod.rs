//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, lighting, colors, geometry detail,
//! idle motion, keybindings) are consolidated here. Options serialize
//! to/from TOML for view presets.

mod camera;
mod colors;
mod geometry;
mod keybindings;
mod lighting;
mod motion;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use geometry::GeometryOptions;
pub use keybindings::{KeyCommandTag, KeybindingOptions};
pub use lighting::LightingOptions;
pub use motion::MotionOptions;
use serde::{Deserialize, Serialize};

use crate::error::StrandError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Light rig parameters.
    pub lighting: LightingOptions,
    /// Color palette options.
    pub colors: ColorOptions,
    /// Tube and marker geometry detail.
    pub geometry: GeometryOptions,
    /// Idle float animation parameters.
    pub motion: MotionOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, StrandError> {
        let content = std::fs::read_to_string(path).map_err(StrandError::Io)?;
        toml::from_str(&content)
            .map_err(|e| StrandError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), StrandError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StrandError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StrandError::Io)?;
        }
        std::fs::write(path, content).map_err(StrandError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let parsed: Options =
            toml::from_str("[camera]\nfovy = 60.0\n").unwrap();
        assert_eq!(parsed.camera.fovy, 60.0);
        assert_eq!(parsed.lighting, LightingOptions::default());
        assert_eq!(parsed.geometry, GeometryOptions::default());
    }

    #[test]
    fn defaults_hold_the_fixed_viewer_constants() {
        let opts = Options::default();
        assert_eq!(opts.camera.distance, 40.0);
        assert_eq!(opts.camera.min_distance, 10.0);
        assert_eq!(opts.camera.max_distance, 100.0);
        assert_eq!(opts.geometry.tube_radius, 0.4);
        assert_eq!(opts.geometry.tube_radial_segments, 8);
        assert_eq!(opts.geometry.marker_radius, 0.5);
        assert_eq!(opts.motion.speed, 2.0);
    }
}
