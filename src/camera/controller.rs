//! Orbit camera controller.
//!
//! Quaternion orbit around a fixed focus point (the centered structure
//! sits at the origin), zoom clamped between a minimum and maximum
//! distance, a reset action restoring the default view, and an optional
//! turntable auto-rotation. All mutation is local and synchronous; it
//! only affects the next frame's view matrix and never touches the
//! structure geometry.

use glam::{Quat, Vec2, Vec3};

use super::core::{Camera, CameraUniform};
use crate::options::CameraOptions;

/// Drives a [`Camera`] from orbit/zoom commands.
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    auto_rotate: bool,

    options: CameraOptions,

    /// The camera this controller positions.
    pub camera: Camera,
    /// CPU copy of the camera uniform, refreshed by [`Self::uniform`].
    uniform: CameraUniform,
}

impl OrbitController {
    /// Controller at the default view for the given viewport aspect.
    #[must_use]
    pub fn new(options: CameraOptions, aspect: f32) -> Self {
        let focus_point = Vec3::ZERO;
        let distance = options.distance;

        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point,
            auto_rotate: options.auto_rotate,
            options,
            camera,
            uniform,
        }
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;
        self.camera.eye = self.focus_point + dir * self.distance;
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Refresh and return the camera uniform for GPU upload.
    pub fn uniform(&mut self) -> CameraUniform {
        self.uniform.update_view_proj(&self.camera);
        self.uniform
    }

    /// Update the viewport aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit by `delta` pixels of drag.
    pub fn rotate(&mut self, delta: Vec2) {
        let speed = self.options.rotate_speed;

        // Horizontal rotation around the camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal = Quat::from_axis_angle(up, -delta.x * speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around the camera's right vector
        let right = self.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta.y * speed);
        self.orientation = vertical * self.orientation;

        self.update_camera_pos();
    }

    /// Zoom (positive = in), clamped to the configured distance range.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.options.zoom_speed;
        self.distance = self
            .distance
            .clamp(self.options.min_distance, self.options.max_distance);
        self.update_camera_pos();
    }

    /// Restore the default camera position and distance.
    pub fn reset_view(&mut self) {
        self.orientation = Quat::IDENTITY;
        self.distance = self.options.distance;
        self.focus_point = Vec3::ZERO;
        self.update_camera_pos();
    }

    /// Toggle turntable auto-rotation.
    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Whether turntable auto-rotation is active.
    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Advance the turntable by `dt` seconds, if enabled.
    pub fn update(&mut self, dt: f32) {
        if !self.auto_rotate {
            return;
        }
        let up = self.orientation * Vec3::Y;
        let turn =
            Quat::from_axis_angle(up, self.options.auto_rotate_speed * dt);
        self.orientation = turn * self.orientation;
        self.update_camera_pos();
    }

    /// Current camera distance from the focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(CameraOptions::default(), 1.6)
    }

    #[test]
    fn starts_at_default_distance_on_z_axis() {
        let c = controller();
        assert_eq!(c.distance(), 40.0);
        assert!((c.camera.eye - Vec3::new(0.0, 0.0, 40.0)).length() < 1e-5);
        assert_eq!(c.camera.target, Vec3::ZERO);
    }

    #[test]
    fn zoom_is_clamped_to_configured_range() {
        let mut c = controller();
        for _ in 0..200 {
            c.zoom(1.0);
        }
        assert_eq!(c.distance(), 10.0);

        for _ in 0..200 {
            c.zoom(-1.0);
        }
        assert_eq!(c.distance(), 100.0);
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut c = controller();
        c.rotate(Vec2::new(120.0, -45.0));
        let d = (c.camera.eye - c.camera.target).length();
        assert!((d - 40.0).abs() < 1e-3);
    }

    #[test]
    fn reset_restores_default_view() {
        let mut c = controller();
        c.rotate(Vec2::new(300.0, 200.0));
        c.zoom(3.0);
        c.reset_view();
        assert_eq!(c.distance(), 40.0);
        assert!((c.camera.eye - Vec3::new(0.0, 0.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn auto_rotate_spins_only_when_enabled() {
        let mut c = controller();
        // default on
        let eye_before = c.camera.eye;
        c.update(0.5);
        assert!((c.camera.eye - eye_before).length() > 1e-5);

        c.toggle_auto_rotate();
        let eye_before = c.camera.eye;
        c.update(0.5);
        assert_eq!(c.camera.eye, eye_before);
    }

    #[test]
    fn camera_mutation_never_touches_geometry_inputs() {
        // The controller has no access to scene data at all; this is a
        // compile-time property. Exercise the uniform path instead.
        let mut c = controller();
        let u = c.uniform();
        assert_eq!(u.position, [0.0, 0.0, 40.0]);
    }
}
