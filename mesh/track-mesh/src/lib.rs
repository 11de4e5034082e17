//! Visual and collision meshes for a curved track segment.
//!
//! A segment is described by a [`CurveDescriptor`]: a cubic Bézier
//! centerline with up vectors at both ends and a cross-section size. From it
//! this crate builds two meshes in one pass:
//!
//! - **Visual ribbon**: two vertices per sample, with normals, `6(n-1)`
//!   indices (or `12(n-1)` when double-sided)
//! - **Collision tube**: a closed rectangular tube of four vertices per
//!   sample, `24(n-1)` indices, no normals
//!
//! # Pipeline
//!
//! 1. [`CurveSampler`] evaluates a [`Frame`] at each sample
//! 2. [`ribbon_ring`] and [`tube_ring`] place cross-section vertices on it
//! 3. [`triangle_loop`] joins consecutive rings; the result is cached in a
//!    [`SegmentTopology`] and reused while the sample count is unchanged
//!
//! # Quick Start
//!
//! ```
//! use track_mesh::{generate, CurveDescriptor};
//! use nalgebra::{Point3, Vector3};
//!
//! let descriptor = CurveDescriptor::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(5.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 5.0),
//!     Point3::new(10.0, 0.0, 10.0),
//! )
//! .with_up(Vector3::y(), Vector3::new(-0.2, 1.0, 0.0))
//! .with_width(2.0)
//! .with_height(0.5)
//! .with_samples(20);
//!
//! let meshes = generate(&descriptor)?;
//! assert_eq!(meshes.visual.vertex_count(), 40);
//! assert_eq!(meshes.collision.indices.len(), 24 * 19);
//! # Ok::<(), track_mesh::CurveError>(())
//! ```
//!
//! # Winding
//!
//! Ribbon triangles face `up`; tube triangles face outward.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod buffer;
mod config;
mod generator;
mod section;
mod topology;

pub use buffer::{MeshBuffer, SegmentMeshes};
pub use config::MeshConfig;
pub use generator::{CurveMeshGenerator, generate};
pub use section::{RIBBON_RING_SIZE, RingVertexSet, TUBE_RING_SIZE, ribbon_ring, tube_ring};
pub use topology::{RingClosure, SegmentTopology, triangle_loop};

pub use track_curve::{
    CubicBezier, CurveDescriptor, CurveError, CurveResult, CurveSampler, Frame, FrameAxis,
    InvalidDescriptor, MAX_SAMPLES,
};
