//! Triangle connectivity between consecutive cross-section rings.
//!
//! Indices depend only on the ring size and the number of rings, never on
//! vertex positions, so a topology can be built once and reused for every
//! regeneration of a segment with the same sample count.

use tracing::debug;

use crate::section::{RIBBON_RING_SIZE, TUBE_RING_SIZE};

/// How the edges of a ring are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingClosure {
    /// `k - 1` edges; the last vertex does not connect back to the first.
    Open,
    /// `k` edges; edge `j` runs from vertex `j` to vertex `(j + 1) % k`.
    Closed,
}

impl RingClosure {
    /// Number of edges in a ring of `ring_size` vertices.
    #[must_use]
    pub const fn edge_count(self, ring_size: usize) -> usize {
        match self {
            Self::Open => ring_size.saturating_sub(1),
            Self::Closed => ring_size,
        }
    }
}

/// Generate the triangles joining `rings` consecutive rings.
///
/// Rings are stored contiguously, `stride` vertices apart. Every ring edge
/// `(a, b)` becomes the quad `a, b, a + stride, b + stride`, split into
/// triangles `(a, b, a + stride)` and `(b + stride, a + stride, b)`.
///
/// Returns `6 × edges × (rings - 1)` indices, or nothing for fewer than two
/// rings. `rings × stride` must fit in a `u32`; descriptors guarantee this
/// through [`MAX_SAMPLES`](track_curve::MAX_SAMPLES).
///
/// # Example
///
/// ```
/// use track_mesh::{triangle_loop, RingClosure};
///
/// let strip = triangle_loop(2, 2, 2, RingClosure::Open);
/// assert_eq!(strip, vec![0, 1, 2, 3, 2, 1]);
///
/// let tube = triangle_loop(4, 4, 3, RingClosure::Closed);
/// assert_eq!(tube.len(), 48);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn triangle_loop(
    ring_size: usize,
    stride: usize,
    rings: usize,
    closure: RingClosure,
) -> Vec<u32> {
    debug_assert!(stride >= ring_size, "rings must not overlap");
    debug_assert!(
        u32::try_from((rings * stride).saturating_sub(1)).is_ok(),
        "indices overflow u32"
    );

    let edges = closure.edge_count(ring_size);
    let transitions = rings.saturating_sub(1);
    let mut indices = Vec::with_capacity(6 * edges * transitions);

    for ring in 0..transitions {
        let base = ring * stride;
        for edge in 0..edges {
            let a = (base + edge) as u32;
            let b = (base + (edge + 1) % ring_size) as u32;
            let step = stride as u32;

            indices.extend_from_slice(&[a, b, a + step]);
            indices.extend_from_slice(&[b + step, a + step, b]);
        }
    }

    indices
}

/// Cached index buffers for the visual ribbon and collision tube of a
/// segment with a fixed sample count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTopology {
    samples: usize,
    ribbon_closure: RingClosure,
    visual: Vec<u32>,
    collision: Vec<u32>,
}

impl SegmentTopology {
    /// Build both index buffers for `samples` rings.
    #[must_use]
    pub fn new(samples: usize, double_sided_ribbon: bool) -> Self {
        let ribbon_closure = if double_sided_ribbon {
            RingClosure::Closed
        } else {
            RingClosure::Open
        };

        let visual = triangle_loop(RIBBON_RING_SIZE, RIBBON_RING_SIZE, samples, ribbon_closure);
        let collision = triangle_loop(TUBE_RING_SIZE, TUBE_RING_SIZE, samples, RingClosure::Closed);

        debug!(
            samples,
            visual_indices = visual.len(),
            collision_indices = collision.len(),
            "Built segment topology"
        );

        Self {
            samples,
            ribbon_closure,
            visual,
            collision,
        }
    }

    /// Sample count this topology was built for.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Closure used for the ribbon rings.
    #[must_use]
    pub const fn ribbon_closure(&self) -> RingClosure {
        self.ribbon_closure
    }

    /// Whether this topology can be reused for the given settings.
    #[must_use]
    pub fn fits(&self, samples: usize, double_sided_ribbon: bool) -> bool {
        let closed = self.ribbon_closure == RingClosure::Closed;
        self.samples == samples && closed == double_sided_ribbon
    }

    /// Ribbon triangle indices.
    #[must_use]
    pub fn visual_indices(&self) -> &[u32] {
        &self.visual
    }

    /// Tube triangle indices.
    #[must_use]
    pub fn collision_indices(&self) -> &[u32] {
        &self.collision
    }
}
