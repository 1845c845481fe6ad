use serde::{Deserialize, Serialize};

/// Idle float animation parameters: a gentle continuous rotation and
/// vertical bob applied to the centered structure for visual interest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionOptions {
    /// Whether the idle float animation runs.
    pub enabled: bool,
    /// Animation time scale.
    pub speed: f32,
    /// Amplitude scale of the rocking rotation.
    pub rotation_intensity: f32,
    /// Amplitude scale of the vertical bob.
    pub float_intensity: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 2.0,
            rotation_intensity: 0.5,
            float_intensity: 0.5,
        }
    }
}
