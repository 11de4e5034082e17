//! Error types for track curve operations.

use std::fmt;

use thiserror::Error;

/// Result type for track curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur while sampling a track curve or building its meshes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// The descriptor was rejected before any sampling took place.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(#[from] InvalidDescriptor),

    /// A frame vector collapsed to (near) zero length before normalization.
    #[error("degenerate curve: {axis} vector collapses at sample {sample}")]
    DegenerateCurve {
        /// Sample index where the collapse was detected.
        sample: usize,
        /// Which frame vector collapsed.
        axis: FrameAxis,
    },

    /// A frame was requested past the last sample.
    #[error("sample {index} is out of range for {samples} samples")]
    SampleOutOfRange {
        /// Requested sample index.
        index: usize,
        /// Number of samples on the curve.
        samples: usize,
    },
}

impl CurveError {
    /// Whether this error came from descriptor validation.
    #[must_use]
    pub const fn is_invalid_descriptor(&self) -> bool {
        matches!(self, Self::InvalidDescriptor(_))
    }

    /// Whether this error came from a collapsed frame vector.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateCurve { .. })
    }

    pub(crate) const fn degenerate(sample: usize, axis: FrameAxis) -> Self {
        Self::DegenerateCurve { sample, axis }
    }
}

/// Reasons a [`CurveDescriptor`](crate::CurveDescriptor) fails validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidDescriptor {
    /// Sample count is below the minimum.
    #[error("need at least {min} samples, got {actual}")]
    TooFewSamples {
        /// Minimum sample count.
        min: usize,
        /// Requested sample count.
        actual: usize,
    },

    /// Sample count is too large for `u32` triangle indices.
    #[error("at most {max} samples are supported, got {actual}")]
    TooManySamples {
        /// Maximum sample count.
        max: usize,
        /// Requested sample count.
        actual: usize,
    },

    /// Cross-section width must be positive.
    #[error("width must be positive, got {0}")]
    NonPositiveWidth(f64),

    /// Cross-section height must be positive.
    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),

    /// A coordinate or dimension is NaN or infinite.
    #[error("{field} is not finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// One of the three basis vectors of a [`Frame`](crate::Frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameAxis {
    /// Direction of travel along the curve.
    Forward,
    /// Track surface normal.
    Up,
    /// Lateral direction, `forward × up`.
    Right,
}

impl fmt::Display for FrameAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Forward => "forward",
            Self::Up => "up",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}
