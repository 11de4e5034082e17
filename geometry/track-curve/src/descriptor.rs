//! Immutable description of one track segment.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bezier::CubicBezier;
use crate::error::{CurveResult, InvalidDescriptor};

/// Minimum number of samples along a segment.
pub const MIN_SAMPLES: usize = 2;

/// Maximum number of samples along a segment.
///
/// The collision tube has four vertices per sample and is indexed with
/// `u32`, so `4 * MAX_SAMPLES - 1` must fit in a `u32`.
pub const MAX_SAMPLES: usize = 1 << 30;

/// Parametric description of a curved track segment.
///
/// The centerline is a cubic Bézier from `pos_a` to `pos_b`, the surface
/// orientation is interpolated from `up_a` to `up_b`, and `width`/`height`
/// size the cross-section. `height` only affects the collision tube.
///
/// Descriptors are plain values: the builder methods return a modified copy
/// and nothing is checked until [`validate`](Self::validate) runs at a
/// generation boundary.
///
/// # Example
///
/// ```
/// use track_curve::CurveDescriptor;
/// use nalgebra::{Point3, Vector3};
///
/// let descriptor = CurveDescriptor::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(7.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
/// )
/// .with_width(2.0)
/// .with_samples(8);
///
/// assert!(descriptor.validate().is_ok());
/// assert_eq!(descriptor.up_a(), Vector3::y());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveDescriptor {
    pos_a: Point3<f64>,
    pos_b: Point3<f64>,
    control_a: Point3<f64>,
    control_b: Point3<f64>,
    up_a: Vector3<f64>,
    up_b: Vector3<f64>,
    width: f64,
    height: f64,
    samples: usize,
}

impl CurveDescriptor {
    /// Default cross-section width.
    pub const DEFAULT_WIDTH: f64 = 1.0;
    /// Default collision tube height.
    pub const DEFAULT_HEIGHT: f64 = 0.5;
    /// Default number of samples along the centerline.
    pub const DEFAULT_SAMPLES: usize = 20;

    /// Create a descriptor from the Bézier points, in curve order.
    ///
    /// Both ends start with `+Y` as up and default cross-section settings.
    #[must_use]
    pub fn new(
        pos_a: Point3<f64>,
        control_a: Point3<f64>,
        control_b: Point3<f64>,
        pos_b: Point3<f64>,
    ) -> Self {
        Self {
            pos_a,
            pos_b,
            control_a,
            control_b,
            up_a: Vector3::y(),
            up_b: Vector3::y(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            samples: Self::DEFAULT_SAMPLES,
        }
    }

    /// Set the up vectors at the start and end of the segment.
    #[must_use]
    pub fn with_up(mut self, up_a: Vector3<f64>, up_b: Vector3<f64>) -> Self {
        self.up_a = up_a;
        self.up_b = up_b;
        self
    }

    /// Set the cross-section width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the collision tube height.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the number of samples along the centerline.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Start point.
    #[must_use]
    pub const fn pos_a(&self) -> Point3<f64> {
        self.pos_a
    }

    /// End point.
    #[must_use]
    pub const fn pos_b(&self) -> Point3<f64> {
        self.pos_b
    }

    /// Control point leaving the start.
    #[must_use]
    pub const fn control_a(&self) -> Point3<f64> {
        self.control_a
    }

    /// Control point entering the end.
    #[must_use]
    pub const fn control_b(&self) -> Point3<f64> {
        self.control_b
    }

    /// Up vector at the start.
    #[must_use]
    pub const fn up_a(&self) -> Vector3<f64> {
        self.up_a
    }

    /// Up vector at the end.
    #[must_use]
    pub const fn up_b(&self) -> Vector3<f64> {
        self.up_b
    }

    /// Cross-section width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Collision tube height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Number of samples along the centerline.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// The centerline as a [`CubicBezier`].
    #[must_use]
    pub const fn curve(&self) -> CubicBezier {
        CubicBezier::new(self.pos_a, self.control_a, self.control_b, self.pos_b)
    }

    /// Check the descriptor for values that can never produce a mesh.
    ///
    /// Degenerate geometry (coincident control points, up parallel to
    /// forward) is only detected while sampling.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidDescriptor`](crate::CurveError::InvalidDescriptor) if:
    /// - fewer than [`MIN_SAMPLES`] or more than [`MAX_SAMPLES`] samples are
    ///   requested
    /// - any point, vector, or dimension is NaN or infinite
    /// - width or height is not positive
    pub fn validate(&self) -> CurveResult<()> {
        if self.samples < MIN_SAMPLES {
            return Err(InvalidDescriptor::TooFewSamples {
                min: MIN_SAMPLES,
                actual: self.samples,
            }
            .into());
        }
        if self.samples > MAX_SAMPLES {
            return Err(InvalidDescriptor::TooManySamples {
                max: MAX_SAMPLES,
                actual: self.samples,
            }
            .into());
        }

        let vectors = [
            ("pos_a", self.pos_a.coords),
            ("pos_b", self.pos_b.coords),
            ("control_a", self.control_a.coords),
            ("control_b", self.control_b.coords),
            ("up_a", self.up_a),
            ("up_b", self.up_b),
        ];
        for (field, v) in vectors {
            if !v.iter().all(|c| c.is_finite()) {
                return Err(InvalidDescriptor::NonFinite { field }.into());
            }
        }

        if !self.width.is_finite() {
            return Err(InvalidDescriptor::NonFinite { field: "width" }.into());
        }
        if self.width <= 0.0 {
            return Err(InvalidDescriptor::NonPositiveWidth(self.width).into());
        }
        if !self.height.is_finite() {
            return Err(InvalidDescriptor::NonFinite { field: "height" }.into());
        }
        if self.height <= 0.0 {
            return Err(InvalidDescriptor::NonPositiveHeight(self.height).into());
        }

        Ok(())
    }
}
