use serde::{Deserialize, Serialize};

/// Light rig parameters: one ambient term, one directional key light, one
/// colored point fill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingOptions {
    /// Ambient light intensity.
    pub ambient: f32,
    /// Key light direction (from the light toward the scene, normalized at
    /// upload).
    pub directional_direction: [f32; 3],
    /// Key light intensity.
    pub directional_intensity: f32,
    /// Fill point-light position in world space.
    pub point_position: [f32; 3],
    /// Fill point-light intensity.
    pub point_intensity: f32,
    /// Fill point-light color.
    pub point_color: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.5,
            // Key light shining from (10, 10, 10) toward the origin.
            directional_direction: [-1.0, -1.0, -1.0],
            directional_intensity: 1.0,
            point_position: [-10.0, -10.0, -10.0],
            point_intensity: 0.5,
            // #00ff94 accent
            point_color: [0.0, 1.0, 0.58],
        }
    }
}
