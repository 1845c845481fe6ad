use serde::{Deserialize, Serialize};

/// Geometry detail options for the tube and marker primitives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometryOptions {
    /// Backbone tube radius in angstroms.
    pub tube_radius: f32,
    /// Number of radial segments around the tube circumference.
    pub tube_radial_segments: u32,
    /// Marker sphere radius in angstroms.
    pub marker_radius: f32,
    /// Lat/long segment count of the shared marker sphere mesh.
    pub marker_segments: u32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            tube_radius: 0.4,
            tube_radial_segments: 8,
            marker_radius: 0.5,
            marker_segments: 16,
        }
    }
}
