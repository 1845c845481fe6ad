//! Uniform buffer types and their bind-group plumbing.
//!
//! NOTE: the `#[repr(C)]` structs must match the WGSL struct layouts
//! exactly (16-byte alignment, explicit padding).

use std::marker::PhantomData;

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::options::{ColorOptions, LightingOptions};

/// Lighting rig shared by all frame-pass shaders (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Key light direction (from light toward scene, normalized).
    pub directional_dir: [f32; 3],
    /// Padding for GPU alignment.
    pub _pad0: f32,
    /// Fill point-light position.
    pub point_position: [f32; 3],
    /// Padding for GPU alignment.
    pub _pad1: f32,
    /// Fill point-light color.
    pub point_color: [f32; 3],
    /// Ambient intensity.
    pub ambient: f32,
    /// Key light intensity.
    pub directional_intensity: f32,
    /// Fill point-light intensity.
    pub point_intensity: f32,
    /// Padding for GPU alignment.
    pub _pad2: [f32; 2],
}

impl From<&LightingOptions> for LightingUniform {
    fn from(opts: &LightingOptions) -> Self {
        Self {
            directional_dir: normalize(opts.directional_direction),
            _pad0: 0.0,
            point_position: opts.point_position,
            _pad1: 0.0,
            point_color: opts.point_color,
            ambient: opts.ambient,
            directional_intensity: opts.directional_intensity,
            point_intensity: opts.point_intensity,
            _pad2: [0.0; 2],
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len < 1e-6 {
        return [0.0, -1.0, 0.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Per-draw model transform and material parameters (96 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Model matrix (idle float motion).
    pub model: [[f32; 4]; 4],
    /// rgb = base color, a = opacity.
    pub base_color: [f32; 4],
    /// x = roughness, y = metalness, z = clearcoat, w = transmission.
    pub material: [f32; 4],
}

/// Tube material constants (translucent, physically-inspired shading).
const TUBE_ROUGHNESS: f32 = 0.2;
const TUBE_METALNESS: f32 = 0.1;
const TUBE_CLEARCOAT: f32 = 1.0;
const TUBE_TRANSMISSION: f32 = 0.2;
const TUBE_OPACITY: f32 = 0.9;

/// Marker material constants (opaque accent).
const MARKER_ROUGHNESS: f32 = 0.4;

impl ModelUniform {
    /// Tube material with the given model transform.
    #[must_use]
    pub fn tube(colors: &ColorOptions, model: Mat4) -> Self {
        let [r, g, b] = colors.tube;
        Self {
            model: model.to_cols_array_2d(),
            base_color: [r, g, b, TUBE_OPACITY],
            material: [
                TUBE_ROUGHNESS,
                TUBE_METALNESS,
                TUBE_CLEARCOAT,
                TUBE_TRANSMISSION,
            ],
        }
    }

    /// Marker material with the given model transform.
    #[must_use]
    pub fn marker(colors: &ColorOptions, model: Mat4) -> Self {
        let [r, g, b] = colors.marker;
        Self {
            model: model.to_cols_array_2d(),
            base_color: [r, g, b, 1.0],
            material: [MARKER_ROUGHNESS, 0.0, 0.0, 0.0],
        }
    }
}

/// A uniform buffer with its bind group layout and bind group.
pub struct UniformBinding<T: bytemuck::Pod> {
    /// The uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (binding 0, uniform buffer).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over the buffer.
    pub bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBinding<T> {
    /// Create the buffer, layout, and bind group with an initial value.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        visibility: wgpu::ShaderStages,
        initial: &T,
    ) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(initial),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

        Self {
            buffer,
            layout,
            bind_group,
            _marker: PhantomData,
        }
    }

    /// Upload a new value.
    pub fn update(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 64);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 96);
    }

    #[test]
    fn lighting_direction_is_normalized() {
        let u = LightingUniform::from(&LightingOptions::default());
        let d = u.directional_dir;
        let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tube_material_is_translucent_and_marker_opaque() {
        let colors = ColorOptions::default();
        let tube = ModelUniform::tube(&colors, Mat4::IDENTITY);
        let marker = ModelUniform::marker(&colors, Mat4::IDENTITY);
        assert!(tube.base_color[3] < 1.0);
        assert_eq!(marker.base_color[3], 1.0);
        assert!(tube.material[3] > 0.0);
        assert_eq!(marker.material[3], 0.0);
    }
}
