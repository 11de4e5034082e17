//! Local coordinate frames along a track centerline.

use nalgebra::{Point3, Vector3};

/// A coordinate frame at one sample of the centerline.
///
/// `right` is always `normalize(forward × up)`, so it is orthogonal to both
/// other axes. `up` is orthogonalized against `forward` at every sample
/// except the first, where it is the descriptor's `up_a` as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Position on the centerline.
    pub position: Point3<f64>,
    /// Unit direction of travel.
    pub forward: Vector3<f64>,
    /// Unit surface normal.
    pub up: Vector3<f64>,
    /// Unit lateral direction, `forward × up`.
    pub right: Vector3<f64>,
    /// Curve parameter this frame was sampled at.
    pub t: f64,
}

impl Frame {
    /// Point displaced from the centerline in the frame's cross-section plane.
    ///
    /// `lateral` moves along `right`, `vertical` along `up`.
    ///
    /// # Example
    ///
    /// ```
    /// use track_curve::Frame;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let frame = Frame {
    ///     position: Point3::origin(),
    ///     forward: Vector3::x(),
    ///     up: Vector3::y(),
    ///     right: Vector3::z(),
    ///     t: 0.0,
    /// };
    /// assert_eq!(frame.offset(1.0, -0.5), Point3::new(0.0, -0.5, 1.0));
    /// ```
    #[must_use]
    pub fn offset(&self, lateral: f64, vertical: f64) -> Point3<f64> {
        self.position + self.right * lateral + self.up * vertical
    }

    /// Largest deviation of `right` from being a unit vector orthogonal to
    /// `forward` and `up`.
    #[must_use]
    pub fn right_handedness_error(&self) -> f64 {
        let unit = (self.right.norm() - 1.0).abs();
        let along_forward = self.right.dot(&self.forward).abs();
        let along_up = self.right.dot(&self.up).abs();
        unit.max(along_forward).max(along_up)
    }
}
