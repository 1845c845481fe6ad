//! The core rendering engine.
//!
//! Owns the GPU context, renderers, camera controller, load session, and
//! composed scene. Hosts drive it with three calls per frame:
//! [`handle_input`](ViewerEngine::handle_input) for events,
//! [`update`](ViewerEngine::update) once per tick (drains the command
//! queue and the load session), and [`render`](ViewerEngine::render).
//!
//! Geometry is recomputed only when the session reports a source change —
//! never on render cadence.

pub mod command;

use std::collections::VecDeque;
use std::path::Path;

use glam::Vec3;

pub use self::command::ViewerCommand;
use crate::camera::{CameraUniform, OrbitController};
use crate::error::StrandError;
use crate::gpu::{DepthTarget, RenderContext, RenderTarget};
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::{
    LightingUniform, MarkerRenderer, ModelUniform, PresentPass, TubeRenderer,
    UniformBinding,
};
use crate::scene::Scene;
use crate::session::{LoadState, StructureSource, ViewerSession};
use crate::snapshot;
use crate::util::FrameTiming;

/// Target FPS limit for the frame timer.
const TARGET_FPS: u32 = 120;

/// The viewer engine: everything between raw input and presented frames.
pub struct ViewerEngine {
    context: RenderContext,
    frame: RenderTarget,
    depth: DepthTarget,
    present: PresentPass,

    tube_renderer: TubeRenderer,
    marker_renderer: MarkerRenderer,
    camera_binding: UniformBinding<CameraUniform>,
    lighting_binding: UniformBinding<LightingUniform>,

    camera: OrbitController,
    input: InputProcessor,
    session: ViewerSession,
    scene: Scene,
    options: Options,

    commands: VecDeque<ViewerCommand>,
    /// Session generation whose geometry is currently uploaded.
    composed_generation: u64,
    /// Whether at least one frame has been presented since the last
    /// resize. Gates the snapshot exporter.
    frame_rendered: bool,
    /// Frame pacing and FPS statistics.
    pub frame_timing: FrameTiming,
}

impl ViewerEngine {
    /// Create an engine rendering to the given window surface.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, StrandError> {
        let context = RenderContext::new(window, size).await?;

        let frame =
            RenderTarget::new(&context.device, size.0.max(1), size.1.max(1));
        let depth = DepthTarget::new(&context.device, frame.width, frame.height);
        let present = PresentPass::new(&context, &frame.view);

        let aspect = frame.width as f32 / frame.height as f32;
        let mut camera = OrbitController::new(options.camera.clone(), aspect);
        let camera_binding = UniformBinding::new(
            &context.device,
            "Camera Uniform",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            &camera.uniform(),
        );
        let lighting_binding = UniformBinding::new(
            &context.device,
            "Lighting Uniform",
            wgpu::ShaderStages::FRAGMENT,
            &LightingUniform::from(&options.lighting),
        );

        let scene = Scene::empty(&options);
        let tube_renderer = TubeRenderer::new(
            &context,
            &camera_binding.layout,
            &lighting_binding.layout,
            &ModelUniform::tube(&options.colors, scene.model_matrix()),
        );
        let marker_renderer = MarkerRenderer::new(
            &context,
            &camera_binding.layout,
            &lighting_binding.layout,
            &options.geometry,
            &ModelUniform::marker(&options.colors, scene.model_matrix()),
        );

        Ok(Self {
            context,
            frame,
            depth,
            present,
            tube_renderer,
            marker_renderer,
            camera_binding,
            lighting_binding,
            camera,
            input: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            session: ViewerSession::new(),
            scene,
            options,
            commands: VecDeque::new(),
            composed_generation: 0,
            frame_rendered: false,
            frame_timing: FrameTiming::new(TARGET_FPS),
        })
    }

    /// Supply or replace the structure source. Equal sources are ignored.
    pub fn set_source(&mut self, source: StructureSource) {
        self.session.set_source(source);
    }

    /// Feed a raw input event; any resulting command is queued for the
    /// next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(cmd) = self.input.handle_event(event) {
            self.commands.push_back(cmd);
        }
    }

    /// Feed a key press (winit `KeyCode` debug string); any bound command
    /// is queued for the next tick.
    pub fn handle_key(&mut self, key: &str) {
        if let Some(cmd) = self.input.handle_key_press(key) {
            self.commands.push_back(cmd);
        }
    }

    /// Queue a command for the next tick.
    pub fn queue_command(&mut self, command: ViewerCommand) {
        self.commands.push_back(command);
    }

    /// Advance one frame tick: drain the load session, drain the command
    /// queue, advance the camera.
    pub fn update(&mut self, dt: f32) {
        if self.session.poll() {
            self.sync_scene();
        }

        while let Some(cmd) = self.commands.pop_front() {
            self.execute(cmd);
        }

        // Turntable pauses while the user is dragging.
        if !self.input.dragging() {
            self.camera.update(dt);
        }
    }

    /// Execute one command immediately.
    pub fn execute(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::RotateCamera { delta } => {
                self.camera.rotate(delta);
            }
            ViewerCommand::Zoom { delta } => self.camera.zoom(delta),
            ViewerCommand::ResetView => self.camera.reset_view(),
            ViewerCommand::ToggleAutoRotate => {
                self.camera.toggle_auto_rotate();
            }
            ViewerCommand::TakeSnapshot => {
                if let Err(e) = self.take_snapshot() {
                    log::error!("snapshot failed: {e}");
                }
            }
            ViewerCommand::SetSource { source } => self.set_source(source),
        }
    }

    /// Rebuild and upload geometry after a session state change.
    fn sync_scene(&mut self) {
        let generation = self.session.generation();
        if generation == self.composed_generation {
            return;
        }

        match self.session.state().clone() {
            LoadState::Ready(points) => {
                self.compose_and_upload(&points);
                self.composed_generation = generation;
            }
            LoadState::Error(msg) => {
                // The old structure belongs to a superseded source; clear
                // it and let the host surface the message.
                log::warn!("load error: {msg}");
                self.compose_and_upload(&[]);
                self.composed_generation = generation;
            }
            LoadState::Idle | LoadState::Loading => {}
        }
    }

    fn compose_and_upload(&mut self, points: &[Vec3]) {
        self.scene = Scene::compose(points, &self.options);
        self.tube_renderer.update_mesh(
            &self.context.device,
            &self.context.queue,
            &self.scene.tube,
        );
        self.marker_renderer.update_markers(
            &self.context.device,
            &self.context.queue,
            &self.scene.markers,
        );
    }

    /// Render one frame: scene pass into the offscreen target, then the
    /// present blit onto the swapchain.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Per-frame uniforms: camera, lighting, idle-float model matrix.
        let model = self.scene.model_matrix();
        let camera_uniform = self.camera.uniform();
        self.camera_binding
            .update(&self.context.queue, &camera_uniform);
        self.lighting_binding.update(
            &self.context.queue,
            &LightingUniform::from(&self.options.lighting),
        );
        self.tube_renderer.set_model(
            &self.context.queue,
            &ModelUniform::tube(&self.options.colors, model),
        );
        self.marker_renderer.set_model(
            &self.context.queue,
            &ModelUniform::marker(&self.options.colors, model),
        );

        let surface_texture = self.context.get_next_frame()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();

        {
            let [r, g, b] = self.options.colors.background;
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &self.frame.view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            // Opaque markers first, translucent tube last.
            self.marker_renderer.draw(
                &mut pass,
                &self.camera_binding.bind_group,
                &self.lighting_binding.bind_group,
            );
            self.tube_renderer.draw(
                &mut pass,
                &self.camera_binding.bind_group,
                &self.lighting_binding.bind_group,
            );
        }

        self.present.render(&mut encoder, &surface_view);
        self.context.submit(encoder);
        surface_texture.present();

        self.frame_rendered = true;
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Capture the current frame to [`snapshot::SNAPSHOT_FILENAME`].
    ///
    /// Returns `Ok(false)` without touching the filesystem when no frame
    /// has been rendered yet.
    pub fn take_snapshot(&self) -> Result<bool, StrandError> {
        if !self.frame_rendered {
            log::debug!("snapshot requested before first frame; ignoring");
            return Ok(false);
        }

        let pixels = snapshot::capture_texture(
            &self.context.device,
            &self.context.queue,
            &self.frame.texture,
            self.frame.width,
            self.frame.height,
        )?;
        snapshot::write_png(
            Path::new(snapshot::SNAPSHOT_FILENAME),
            &pixels,
            self.frame.width,
            self.frame.height,
        )?;
        Ok(true)
    }

    /// Resize the surface and all resolution-dependent targets.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.frame = RenderTarget::new(&self.context.device, width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
        self.present.set_input(&self.context, &self.frame.view);
        self.camera.resize(width, height);
        // The new frame target is blank until the next render.
        self.frame_rendered = false;
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options and recompose the scene with them.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
        self.input = InputProcessor::with_key_bindings(
            self.options.keybindings.clone(),
        );
        let points: Vec<Vec3> = self
            .session
            .points()
            .map(<[Vec3]>::to_vec)
            .unwrap_or_default();
        self.compose_and_upload(&points);
    }

    /// Read access to the load session (state, source, generation).
    #[must_use]
    pub fn session(&self) -> &ViewerSession {
        &self.session
    }

    /// Whether the composed scene holds renderable geometry.
    #[must_use]
    pub fn has_renderable_scene(&self) -> bool {
        self.scene.is_renderable()
    }
}
