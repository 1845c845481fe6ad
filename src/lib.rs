// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene: graphics math casts are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
// Tests panic on purpose
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! GPU-accelerated backbone-trace protein viewer built on wgpu.
//!
//! Strandview ingests PDB-format text, extracts the α-carbon backbone,
//! fits a Catmull-Rom-style spline through it, sweeps a translucent tube
//! surface along the curve (plus one marker sphere per residue), and
//! drives an interactive orbit/zoom camera with PNG snapshot export.
//!
//! # Key entry points
//!
//! - [`Viewer`] - standalone winit window (feature `viewer`)
//! - [`engine::ViewerEngine`] - the embeddable render engine
//! - [`session::ViewerSession`] - source loading and lifecycle
//! - [`options::Options`] - runtime configuration (camera, lighting,
//!   colors, geometry)
//!
//! # Architecture
//!
//! Data flows strictly downstream: raw text → backbone points → spline →
//! tube + marker meshes → composed scene → rendered frame. Retrieval is
//! the only asynchronous step; results are generation-tagged so a stale
//! response can never clobber a newer source (last-writer-wins). Geometry
//! is recomputed only when the source changes, never per frame.

pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod parser;
pub mod renderer;
pub mod scene;
pub mod session;
pub mod snapshot;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{command::ViewerCommand, ViewerEngine};
pub use error::StrandError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use session::{LoadState, StructureSource, ViewerSession};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
