//! Perspective camera and orbit controller.

pub mod controller;
pub mod core;

pub use controller::OrbitController;
pub use core::{Camera, CameraUniform};
