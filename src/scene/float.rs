//! Idle float animation.
//!
//! A gentle continuous rotation and vertical bob applied to the centered
//! structure while the viewer idles. The clock is owned by the scene that
//! created it — composing a new scene restarts the motion, and dropping
//! the scene stops it. Never left running as an untracked global timer.

use std::time::Instant;

use glam::{Mat4, Vec3};

use crate::options::MotionOptions;

/// Time-driven model transform for the composed structure.
#[derive(Debug, Clone)]
pub struct FloatAnimation {
    options: MotionOptions,
    started: Instant,
}

impl FloatAnimation {
    /// Start the animation clock now.
    #[must_use]
    pub fn new(options: MotionOptions) -> Self {
        Self {
            options,
            started: Instant::now(),
        }
    }

    /// Model matrix for the current instant.
    ///
    /// Identity when disabled. The amplitudes are small enough that the
    /// structure always stays near the origin.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform_at(self.started.elapsed().as_secs_f32())
    }

    /// Model matrix at `elapsed` seconds after the clock started.
    #[must_use]
    pub fn transform_at(&self, elapsed: f32) -> Mat4 {
        if !self.options.enabled {
            return Mat4::IDENTITY;
        }

        let t = elapsed * self.options.speed;
        let rot = self.options.rotation_intensity;

        let rx = (t / 4.0).cos() / 8.0 * rot;
        let ry = (t / 4.0).sin() / 8.0 * rot;
        let rz = (t / 4.0).sin() / 20.0 * rot;
        let bob = (t / 1.5).sin() / 10.0 * self.options.float_intensity;

        Mat4::from_translation(Vec3::new(0.0, bob, 0.0))
            * Mat4::from_rotation_x(rx)
            * Mat4::from_rotation_y(ry)
            * Mat4::from_rotation_z(rz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_animation_is_identity() {
        let anim = FloatAnimation::new(MotionOptions {
            enabled: false,
            ..MotionOptions::default()
        });
        assert_eq!(anim.transform_at(3.7), Mat4::IDENTITY);
    }

    #[test]
    fn motion_stays_gentle() {
        let anim = FloatAnimation::new(MotionOptions::default());
        for i in 0..100 {
            let m = anim.transform_at(i as f32 * 0.37);
            let moved = m.transform_point3(Vec3::ZERO);
            // The bob never moves the origin more than the amplitude bound.
            assert!(moved.length() < 0.1);
        }
    }

    #[test]
    fn starts_near_identity() {
        let anim = FloatAnimation::new(MotionOptions::default());
        let m = anim.transform_at(0.0);
        let p = m.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!((p - Vec3::new(1.0, 1.0, 1.0)).length() < 0.2);
    }
}
