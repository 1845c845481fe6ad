//! Backbone geometry: interpolating curve, swept tube surface, and
//! per-point marker spheres.
//!
//! Everything in this module is pure CPU math on `glam` types — no GPU
//! handles, so the whole pipeline up to vertex data is unit-testable.

pub mod marker;
pub mod spline;
pub mod tube;

pub use marker::{sphere_mesh, MarkerInstance, MarkerSet};
pub use spline::BackboneCurve;
pub use tube::{MeshVertex, TubeMesh};
