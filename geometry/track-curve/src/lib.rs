//! Cubic Bézier track centerlines and their sampled frames.
//!
//! This crate describes a single curved track segment and evaluates the
//! local coordinate frame at evenly spaced parameter values:
//!
//! - [`CurveDescriptor`] - Immutable segment description (endpoints, controls,
//!   up vectors, cross-section size, sample count)
//! - [`CubicBezier`] - The centerline polynomial
//! - [`CurveSampler`] - Produces a [`Frame`] per sample
//! - [`CurveError`] - Invalid descriptors and degenerate geometry
//!
//! # Example
//!
//! ```
//! use track_curve::{CurveDescriptor, CurveSampler};
//! use nalgebra::Point3;
//!
//! let descriptor = CurveDescriptor::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(4.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 6.0),
//!     Point3::new(10.0, 0.0, 10.0),
//! )
//! .with_samples(16);
//!
//! let frames = CurveSampler::new(&descriptor)?.frames()?;
//! assert_eq!(frames.len(), 16);
//! # Ok::<(), track_curve::CurveError>(())
//! ```
//!
//! # Coordinate System
//!
//! Right-handed. `right = forward × up`, so with forward `+X` and up `+Y`
//! the right vector is `+Z`. Descriptors default to `+Y` as up.
//!
//! # Layer 0 Crate
//!
//! No mesh or engine dependencies; mesh construction lives in `track-mesh`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bezier;
mod descriptor;
mod error;
mod frame;
mod sampler;

pub use bezier::CubicBezier;
pub use descriptor::{CurveDescriptor, MAX_SAMPLES, MIN_SAMPLES};
pub use error::{CurveError, CurveResult, FrameAxis, InvalidDescriptor};
pub use frame::Frame;
pub use sampler::{CurveSampler, DEGENERATE_EPSILON, SPAN_EPSILON};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
