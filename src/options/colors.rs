use serde::{Deserialize, Serialize};

/// Color palette options. All values are linear RGB in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Backbone tube base color (emerald).
    pub tube: [f32; 3],
    /// Marker sphere accent color (brighter emerald).
    pub marker: [f32; 3],
    /// Viewport clear color.
    pub background: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            // #10b981
            tube: [0.063, 0.725, 0.506],
            // #34d399
            marker: [0.204, 0.827, 0.600],
            background: [0.020, 0.022, 0.024],
        }
    }
}
