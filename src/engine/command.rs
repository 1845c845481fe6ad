//! The engine's interactive vocabulary.
//!
//! Every user-facing operation — key press, mouse gesture, or
//! programmatic call — is represented as a `ViewerCommand`. Consumers
//! construct commands and pass them to
//! [`ViewerEngine::queue_command`](super::ViewerEngine::queue_command);
//! the engine drains its queue once per frame tick, which keeps input
//! ordering deterministic with respect to rendering.

use glam::Vec2;

use crate::session::StructureSource;

/// A discrete or parameterized operation the engine can perform.
///
/// The engine never cares *how* a command was triggered — keyboard,
/// mouse, or API all look identical.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    /// Orbit the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    /// Restore the default camera position and distance.
    ResetView,

    /// Toggle turntable auto-rotation.
    ToggleAutoRotate,

    /// Capture the current frame to `protein-snapshot.png`.
    ///
    /// A no-op until at least one frame has been rendered.
    TakeSnapshot,

    /// Replace the structure source. Ignored when the source value is
    /// unchanged.
    SetSource {
        /// The new source to load.
        source: StructureSource,
    },
}
