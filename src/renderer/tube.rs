//! Backbone tube renderer.

use crate::geometry::tube::{MeshVertex, TubeMesh};
use crate::gpu::{GrowBuffer, RenderContext};
use crate::renderer::pipeline_util;
use crate::renderer::uniforms::{ModelUniform, UniformBinding};

/// Vertex buffer layout shared by the tube and marker meshes.
pub(crate) fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1, // normal
            },
        ],
    }
}

/// Renders the swept backbone tube with alpha blending.
pub struct TubeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: GrowBuffer,
    index_buffer: GrowBuffer,
    index_count: u32,
    model: UniformBinding<ModelUniform>,
}

impl TubeRenderer {
    /// Create the pipeline and empty buffers.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        initial_model: &ModelUniform,
    ) -> Self {
        let model = UniformBinding::new(
            &context.device,
            "Tube Model Uniform",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            initial_model,
        );

        let pipeline =
            Self::create_pipeline(context, camera_layout, lighting_layout, &model);

        let vertex_buffer = GrowBuffer::new(
            &context.device,
            "Tube Vertex Buffer",
            std::mem::size_of::<MeshVertex>() * 1024,
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = GrowBuffer::new(
            &context.device,
            "Tube Index Buffer",
            std::mem::size_of::<u32>() * 4096,
            wgpu::BufferUsages::INDEX,
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: 0,
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
                label: Some("Tube Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/tube.wgsl").into(),
                ),
            },
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Tube Pipeline Layout"),
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
                label: Some("Tube Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[mesh_vertex_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::frame_color_target(Some(
                        wgpu::BlendState::ALPHA_BLENDING,
                    )),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // Both sides visible through the translucent,
                    // open-ended surface.
                    cull_mode: None,
                    ..Default::default()
                },
                // Translucent: tested against depth but not written, so
                // markers stay visible through the tube.
                depth_stencil: Some(pipeline_util::depth_stencil_state(false)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Replace the tube mesh (called on scene recompose only).
    pub fn update_mesh(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &TubeMesh,
    ) {
        let _ = self.vertex_buffer.write(device, queue, &mesh.vertices);
        let _ = self.index_buffer.write(device, queue, &mesh.indices);
        self.index_count = mesh.indices.len() as u32;
    }

    /// Upload the per-frame model/material uniform.
    pub fn set_model(&self, queue: &wgpu::Queue, uniform: &ModelUniform) {
        self.model.update(queue, uniform);
    }

    /// Record the tube draw. Does nothing when there is no mesh.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.index_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, lighting_bind_group, &[]);
        render_pass.set_bind_group(2, &self.model.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
