use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::command::ViewerCommand;

/// Maps physical key strings to discrete viewer commands.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyQ"`, `"Tab"`, `"Escape"`, etc. Only discrete commands make sense
/// as key bindings — parameterized commands like `RotateCamera` are
/// produced by the mouse gesture interpreter, not key lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeybindingOptions {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`ViewerCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Restore the default camera position and distance.
    ResetView,
    /// Toggle turntable auto-rotation.
    ToggleAutoRotate,
    /// Capture the current frame to a PNG file.
    TakeSnapshot,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`ViewerCommand`].
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::ResetView => ViewerCommand::ResetView,
            Self::ToggleAutoRotate => ViewerCommand::ToggleAutoRotate,
            Self::TakeSnapshot => ViewerCommand::TakeSnapshot,
        }
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyQ".into(), KeyCommandTag::ResetView),
            ("KeyR".into(), KeyCommandTag::ToggleAutoRotate),
            ("KeyS".into(), KeyCommandTag::TakeSnapshot),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve() {
        let kb = KeybindingOptions::default();
        assert_eq!(kb.lookup("KeyQ"), Some(ViewerCommand::ResetView));
        assert_eq!(kb.lookup("KeyR"), Some(ViewerCommand::ToggleAutoRotate));
        assert_eq!(kb.lookup("KeyS"), Some(ViewerCommand::TakeSnapshot));
        assert_eq!(kb.lookup("KeyZ"), None);
    }
}
