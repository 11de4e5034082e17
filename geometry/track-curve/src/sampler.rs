//! Frame sampling along a track centerline.
//!
//! Forward directions come from finite differences between consecutive
//! samples, not from the analytic Bézier derivative. Up vectors are
//! slerped between the two end orientations and then orthogonalized
//! against forward.

use std::f64::consts::PI;

use nalgebra::{Point3, Unit, UnitQuaternion, UnitVector3, Vector3};
use tracing::trace;

use crate::bezier::CubicBezier;
use crate::descriptor::CurveDescriptor;
use crate::error::{CurveError, CurveResult, FrameAxis};
use crate::frame::Frame;

/// Unit-scale vectors (up, right) shorter than this before normalization
/// are treated as collapsed.
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// Forward steps shorter than this fraction of the control polygon length
/// are treated as collapsed.
pub const SPAN_EPSILON: f64 = 1e-12;

/// Below this sine of the angle between the end up vectors, slerp is
/// considered undefined.
const SLERP_EPSILON: f64 = 1e-9;

/// Evaluates centerline positions and frames for a validated descriptor.
///
/// # Example
///
/// ```
/// use track_curve::{CurveDescriptor, CurveSampler};
/// use nalgebra::{Point3, Vector3};
///
/// let descriptor = CurveDescriptor::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(7.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
/// )
/// .with_samples(2);
///
/// let sampler = CurveSampler::new(&descriptor).unwrap();
/// let frame = sampler.frame_at(0).unwrap();
/// assert_eq!(frame.forward, Vector3::x());
/// assert_eq!(frame.right, Vector3::z());
/// ```
#[derive(Debug, Clone)]
pub struct CurveSampler {
    curve: CubicBezier,
    samples: usize,
    start_direction: Vector3<f64>,
    min_step: f64,
    up_a: UnitVector3<f64>,
    up_b: UnitVector3<f64>,
}

impl CurveSampler {
    /// Validate `descriptor` and prepare to sample it.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidDescriptor`] if validation fails, or
    /// [`CurveError::DegenerateCurve`] if `up_a` or `up_b` has zero or
    /// non-finite length.
    pub fn new(descriptor: &CurveDescriptor) -> CurveResult<Self> {
        descriptor.validate()?;
        let samples = descriptor.samples();

        let up_a =
            normalize_or_degenerate(descriptor.up_a(), DEGENERATE_EPSILON, 0, FrameAxis::Up)?;
        let up_b = normalize_or_degenerate(
            descriptor.up_b(),
            DEGENERATE_EPSILON,
            samples - 1,
            FrameAxis::Up,
        )?;

        let curve = descriptor.curve();
        Ok(Self {
            curve,
            samples,
            start_direction: descriptor.control_a() - descriptor.pos_a(),
            min_step: SPAN_EPSILON * curve.control_polygon_length(),
            up_a: Unit::new_unchecked(up_a),
            up_b: Unit::new_unchecked(up_b),
        })
    }

    /// Number of samples along the centerline.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// The centerline being sampled.
    #[must_use]
    pub const fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    /// Curve parameter of sample `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn parameter(&self, index: usize) -> f64 {
        index as f64 / (self.samples - 1) as f64
    }

    /// Centerline position of sample `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Point3<f64> {
        self.curve.point_at(self.parameter(index))
    }

    /// Compute the frame at sample `index`.
    ///
    /// Each frame depends only on its own index, so frames may be computed
    /// in any order.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::SampleOutOfRange`] if `index` is not below
    /// [`samples`](Self::samples), or [`CurveError::DegenerateCurve`] if
    /// forward, up, or right collapses to zero length (or overflows) before
    /// normalization.
    pub fn frame_at(&self, index: usize) -> CurveResult<Frame> {
        if index >= self.samples {
            return Err(CurveError::SampleOutOfRange {
                index,
                samples: self.samples,
            });
        }

        let t = self.parameter(index);
        let position = self.curve.point_at(t);

        let (forward, up) = if index == 0 {
            let forward = normalize_or_degenerate(
                self.start_direction,
                self.min_step,
                index,
                FrameAxis::Forward,
            )?;
            (forward, self.up_a.into_inner())
        } else {
            let previous = self.position(index - 1);
            let forward = normalize_or_degenerate(
                position - previous,
                self.min_step,
                index,
                FrameAxis::Forward,
            )?;

            let up = self.interpolate_up(t, &forward);
            let up = normalize_or_degenerate(
                up - forward * forward.dot(&up),
                DEGENERATE_EPSILON,
                index,
                FrameAxis::Up,
            )?;
            (forward, up)
        };

        let right = normalize_or_degenerate(
            forward.cross(&up),
            DEGENERATE_EPSILON,
            index,
            FrameAxis::Right,
        )?;

        Ok(Frame {
            position,
            forward,
            up,
            right,
            t,
        })
    }

    /// Compute every frame in sample order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CurveError::DegenerateCurve`] encountered.
    pub fn frames(&self) -> CurveResult<Vec<Frame>> {
        (0..self.samples).map(|i| self.frame_at(i)).collect()
    }

    /// Spherical interpolation of the end up vectors at `t`.
    ///
    /// Antiparallel ends have no unique great circle; in that case the start
    /// up vector is rolled about `forward` by `π·t`.
    fn interpolate_up(&self, t: f64, forward: &Vector3<f64>) -> Vector3<f64> {
        if let Some(up) = self.up_a.try_slerp(&self.up_b, t, SLERP_EPSILON) {
            return up.into_inner();
        }
        if self.up_a.dot(self.up_b.as_ref()) > 0.0 {
            return self.up_a.into_inner();
        }

        trace!(t, "rolling antiparallel up vectors about forward");
        let axis = Unit::new_unchecked(*forward);
        UnitQuaternion::from_axis_angle(&axis, PI * t) * self.up_a.into_inner()
    }
}

/// Normalize `v`, failing if its length is non-finite or at most `min_norm`.
fn normalize_or_degenerate(
    v: Vector3<f64>,
    min_norm: f64,
    sample: usize,
    axis: FrameAxis,
) -> CurveResult<Vector3<f64>> {
    let norm = v.norm();
    if norm.is_finite() && norm > min_norm {
        Ok(v / norm)
    } else {
        Err(CurveError::degenerate(sample, axis))
    }
}
