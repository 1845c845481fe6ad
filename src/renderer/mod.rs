//! GPU renderers for the composed scene.
//!
//! One pipeline per primitive kind (tube, markers) rendering into the
//! offscreen frame target, plus a present pass that blits the frame to
//! the swapchain. Mesh data is replaced wholesale whenever the scene is
//! recomposed.

pub mod marker;
pub mod pipeline_util;
pub mod present;
pub mod tube;
pub mod uniforms;

pub use marker::MarkerRenderer;
pub use present::PresentPass;
pub use tube::TubeRenderer;
pub use uniforms::{LightingUniform, ModelUniform, UniformBinding};
