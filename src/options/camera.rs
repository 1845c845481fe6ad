use serde::{Deserialize, Serialize};

/// Camera projection and control parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Default camera distance from the centered structure.
    pub distance: f32,
    /// Minimum zoom distance.
    pub min_distance: f32,
    /// Maximum zoom distance.
    pub max_distance: f32,
    /// Rotation sensitivity (radians per pixel of drag).
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier per scroll step.
    pub zoom_speed: f32,
    /// Whether the turntable auto-rotation starts enabled.
    pub auto_rotate: bool,
    /// Turntable speed in radians per second.
    pub auto_rotate_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 1000.0,
            distance: 40.0,
            min_distance: 10.0,
            max_distance: 100.0,
            rotate_speed: 0.008,
            zoom_speed: 0.1,
            auto_rotate: true,
            auto_rotate_speed: 0.25,
        }
    }
}
