//! Shared pipeline state helpers.

use crate::gpu::texture::{DEPTH_FORMAT, FRAME_FORMAT};

/// Color target for the offscreen frame pass.
///
/// `blend` is alpha blending for the translucent tube, `None` for opaque
/// geometry.
#[must_use]
pub fn frame_color_target(
    blend: Option<wgpu::BlendState>,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format: FRAME_FORMAT,
        blend,
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

/// Standard depth-stencil state used by the frame pass pipelines.
#[must_use]
pub fn depth_stencil_state(depth_write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: depth_write,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}
