//! Cubic Bézier centerline.

use nalgebra::{Point3, Vector3};

/// A cubic Bézier curve defined by two endpoints and two control points.
///
/// # Equation
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
///
/// # Example
///
/// ```
/// use track_curve::CubicBezier;
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 3.0),
///     Point3::new(10.0, 0.0, 3.0),
///     Point3::new(10.0, 0.0, 0.0),
/// );
///
/// assert_eq!(curve.point_at(0.0), Point3::origin());
/// assert!(curve.point_at(0.5).z > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point (`posA`).
    pub p0: Point3<f64>,
    /// Control point leaving the start (`controlA`).
    pub p1: Point3<f64>,
    /// Control point entering the end (`controlB`).
    pub p2: Point3<f64>,
    /// End point (`posB`).
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Create a new cubic Bézier curve.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the centerline at parameter `t`, clamped to `[0, 1]`.
    ///
    /// `t == 0` returns the start point exactly instead of going through the
    /// polynomial.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return self.p0;
        }
        let s = 1.0 - t;

        Point3::from(
            self.p0.coords * (s * s * s)
                + self.p1.coords * (3.0 * s * s * t)
                + self.p2.coords * (3.0 * s * t * t)
                + self.p3.coords * (t * t * t),
        )
    }

    /// Analytic first derivative `B'(t)`.
    ///
    /// Frame sampling deliberately does not use this; it is provided to
    /// measure how far the finite-difference tangent drifts on tight bends.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;

        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Length of the control polygon, an upper bound on the arc length.
    ///
    /// Sampling uses it as the length scale for collapsed forward steps.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.p1 - self.p0).norm() + (self.p2 - self.p1).norm() + (self.p3 - self.p2).norm()
    }
}
