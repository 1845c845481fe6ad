//! GPU plumbing: device/surface context, growable buffers, render
//! targets.

pub mod buffer;
pub mod render_context;
pub mod texture;

pub use buffer::GrowBuffer;
pub use render_context::{RenderContext, RenderContextError};
pub use texture::{DepthTarget, RenderTarget};
