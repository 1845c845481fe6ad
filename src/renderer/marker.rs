//! Marker sphere renderer.
//!
//! One shared unit-sphere mesh drawn once per marker instance; the
//! instance buffer carries center + radius.

use crate::geometry::marker::{sphere_mesh, MarkerInstance, MarkerSet};
use crate::gpu::{GrowBuffer, RenderContext};
use crate::options::GeometryOptions;
use crate::renderer::pipeline_util;
use crate::renderer::tube::mesh_vertex_layout;
use crate::renderer::uniforms::{ModelUniform, UniformBinding};

/// Instance buffer layout for marker spheres.
fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MarkerInstance>()
            as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 0,
            shader_location: 2, // center + radius
        }],
    }
}

/// Renders the per-residue marker spheres.
pub struct MarkerRenderer {
    pipeline: wgpu::RenderPipeline,
    sphere_vertices: GrowBuffer,
    sphere_indices: GrowBuffer,
    sphere_index_count: u32,
    instances: GrowBuffer,
    instance_count: u32,
    model: UniformBinding<ModelUniform>,
}

impl MarkerRenderer {
    /// Create the pipeline, the shared sphere mesh, and an empty instance
    /// buffer.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        geometry: &GeometryOptions,
        initial_model: &ModelUniform,
    ) -> Self {
        let model = UniformBinding::new(
            &context.device,
            "Marker Model Uniform",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            initial_model,
        );

        let pipeline = Self::create_pipeline(
            context,
            camera_layout,
            lighting_layout,
            &model,
        );

        let (vertices, indices) =
            sphere_mesh(geometry.marker_segments, geometry.marker_segments);
        let sphere_vertices = GrowBuffer::new_with_data(
            &context.device,
            "Marker Sphere Vertex Buffer",
            &vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let sphere_indices = GrowBuffer::new_with_data(
            &context.device,
            "Marker Sphere Index Buffer",
            &indices,
            wgpu::BufferUsages::INDEX,
        );

        let instances = GrowBuffer::new(
            &context.device,
            "Marker Instance Buffer",
            std::mem::size_of::<MarkerInstance>() * 256,
            wgpu::BufferUsages::VERTEX,
        );

        Self {
            pipeline,
            sphere_vertices,
            sphere_indices,
            sphere_index_count: indices.len() as u32,
            instances,
            instance_count: 0,
            model,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        model: &UniformBinding<ModelUniform>,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Marker Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/marker.wgsl").into(),
                ),
            },
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Marker Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    lighting_layout,
                    &model.layout,
                ],
                push_constant_ranges: &[],
            },
        );

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Marker Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[mesh_vertex_layout(), instance_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::frame_color_target(None),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state(true)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Replace the marker instances (called on scene recompose only).
    pub fn update_markers(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        markers: &MarkerSet,
    ) {
        let _ = self.instances.write(device, queue, &markers.instances);
        self.instance_count = markers.len() as u32;
    }

    /// Upload the per-frame model/material uniform.
    pub fn set_model(&self, queue: &wgpu::Queue, uniform: &ModelUniform) {
        self.model.update(queue, uniform);
    }

    /// Record the instanced marker draw. Does nothing without instances.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, lighting_bind_group, &[]);
        render_pass.set_bind_group(2, &self.model.bind_group, &[]);
        render_pass
            .set_vertex_buffer(0, self.sphere_vertices.buffer().slice(..));
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        render_pass.set_index_buffer(
            self.sphere_indices.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(
            0..self.sphere_index_count,
            0,
            0..self.instance_count,
        );
    }
}
