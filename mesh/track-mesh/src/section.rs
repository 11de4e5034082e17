//! Cross-section rings placed on sampled frames.

use nalgebra::{Point3, Vector3};
use track_curve::Frame;

/// Vertices per visual ribbon ring.
pub const RIBBON_RING_SIZE: usize = 2;

/// Vertices per collision tube ring.
pub const TUBE_RING_SIZE: usize = 4;

/// Positions, and optionally normals, of one cross-section ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingVertexSet<const K: usize> {
    /// Ring vertices in loop order.
    pub positions: [Point3<f64>; K],
    /// Per-vertex normals, when the ring carries them.
    pub normals: Option<[Vector3<f64>; K]>,
}

/// Flat ribbon ring: left edge then right edge, both facing `up`.
#[must_use]
pub fn ribbon_ring(frame: &Frame, width: f64) -> RingVertexSet<RIBBON_RING_SIZE> {
    let half = 0.5 * width;
    RingVertexSet {
        positions: [frame.offset(-half, 0.0), frame.offset(half, 0.0)],
        normals: Some([frame.up; RIBBON_RING_SIZE]),
    }
}

/// Rectangular tube ring in loop order: top-left, top-right,
/// bottom-right, bottom-left, where left is `-right` and top is `+up`.
///
/// Collision rings carry no normals.
#[must_use]
pub fn tube_ring(frame: &Frame, width: f64, height: f64) -> RingVertexSet<TUBE_RING_SIZE> {
    let half_w = 0.5 * width;
    let half_h = 0.5 * height;
    RingVertexSet {
        positions: [
            frame.offset(-half_w, half_h),
            frame.offset(half_w, half_h),
            frame.offset(half_w, -half_h),
            frame.offset(-half_w, -half_h),
        ],
        normals: None,
    }
}
