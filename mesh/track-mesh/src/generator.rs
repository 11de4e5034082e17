//! Segment mesh generation.
//!
//! Frames are sampled along the centerline, a ribbon ring and a tube ring
//! are placed on each frame, and the cached topology supplies the indices.

use rayon::prelude::*;
use tracing::{debug, info};
use track_curve::{CurveDescriptor, CurveResult, CurveSampler, Frame};

use crate::buffer::{MeshBuffer, SegmentMeshes};
use crate::config::MeshConfig;
use crate::section::{RIBBON_RING_SIZE, TUBE_RING_SIZE, ribbon_ring, tube_ring};
use crate::topology::SegmentTopology;

/// Owns a segment description and regenerates its meshes on demand.
///
/// Index buffers are built once per sample count; replacing the
/// descriptor with one that keeps the same count only recomputes
/// vertices.
///
/// # Example
///
/// ```
/// use track_mesh::{CurveDescriptor, CurveMeshGenerator, MeshConfig};
/// use nalgebra::{Point3, Vector3};
///
/// let descriptor = CurveDescriptor::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(7.0, 0.0, 2.0),
///     Point3::new(10.0, 0.0, 4.0),
/// )
/// .with_samples(12);
///
/// let mut generator = CurveMeshGenerator::new(descriptor, MeshConfig::default())?;
/// let meshes = generator.generate()?;
/// assert_eq!(meshes.visual.vertex_count(), 24);
/// assert_eq!(meshes.collision.vertex_count(), 48);
///
/// // Bank the far end; the topology is reused.
/// generator.set_descriptor(descriptor.with_up(Vector3::y(), Vector3::new(0.0, 1.0, -1.0)))?;
/// let banked = generator.generate()?;
/// assert_eq!(banked.visual.indices, meshes.visual.indices);
/// # Ok::<(), track_mesh::CurveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CurveMeshGenerator {
    descriptor: CurveDescriptor,
    config: MeshConfig,
    topology: SegmentTopology,
}

impl CurveMeshGenerator {
    /// Create a generator for `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidDescriptor`](crate::CurveError::InvalidDescriptor)
    /// if the descriptor fails validation.
    pub fn new(descriptor: CurveDescriptor, config: MeshConfig) -> CurveResult<Self> {
        descriptor.validate()?;

        info!(
            samples = descriptor.samples(),
            width = descriptor.width(),
            height = descriptor.height(),
            "Created track segment generator"
        );

        let topology = SegmentTopology::new(descriptor.samples(), config.double_sided_ribbon);
        Ok(Self {
            descriptor,
            config,
            topology,
        })
    }

    /// The current descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &CurveDescriptor {
        &self.descriptor
    }

    /// The generation settings.
    #[must_use]
    pub const fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// The cached index buffers.
    #[must_use]
    pub const fn topology(&self) -> &SegmentTopology {
        &self.topology
    }

    /// Replace the descriptor, rebuilding the topology only if the sample
    /// count changed.
    ///
    /// On error the previous descriptor is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidDescriptor`](crate::CurveError::InvalidDescriptor)
    /// if the new descriptor fails validation.
    pub fn set_descriptor(&mut self, descriptor: CurveDescriptor) -> CurveResult<()> {
        descriptor.validate()?;
        self.descriptor = descriptor;
        self.refresh_topology();

        info!(samples = descriptor.samples(), "Replaced track segment descriptor");
        Ok(())
    }

    /// Replace the generation settings.
    pub fn set_config(&mut self, config: MeshConfig) {
        self.config = config;
        self.refresh_topology();
    }

    fn refresh_topology(&mut self) {
        let samples = self.descriptor.samples();
        let double_sided = self.config.double_sided_ribbon;
        if self.topology.fits(samples, double_sided) {
            debug!(samples, "Reusing segment topology");
        } else {
            self.topology = SegmentTopology::new(samples, double_sided);
        }
    }

    /// Sample every frame along the centerline.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`](crate::CurveError::DegenerateCurve)
    /// if any frame vector collapses.
    pub fn frames(&self) -> CurveResult<Vec<Frame>> {
        let sampler = CurveSampler::new(&self.descriptor)?;
        let samples = sampler.samples();

        if self.config.samples_in_parallel(samples) {
            (0..samples)
                .into_par_iter()
                .map(|i| sampler.frame_at(i))
                .collect()
        } else {
            sampler.frames()
        }
    }

    /// Generate the visual ribbon and collision tube.
    ///
    /// Nothing is returned unless every sample succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`](crate::CurveError::DegenerateCurve)
    /// if any frame vector collapses.
    pub fn generate(&self) -> CurveResult<SegmentMeshes> {
        let frames = self.frames()?;
        let width = self.descriptor.width();
        let height = self.descriptor.height();

        let mut visual_positions = Vec::with_capacity(frames.len() * RIBBON_RING_SIZE);
        let mut visual_normals = Vec::with_capacity(frames.len() * RIBBON_RING_SIZE);
        let mut collision_positions = Vec::with_capacity(frames.len() * TUBE_RING_SIZE);

        for frame in &frames {
            let ribbon = ribbon_ring(frame, width);
            visual_positions.extend_from_slice(&ribbon.positions);
            if let Some(normals) = ribbon.normals {
                visual_normals.extend_from_slice(&normals);
            }

            let tube = tube_ring(frame, width, height);
            collision_positions.extend_from_slice(&tube.positions);
        }

        debug!(
            samples = frames.len(),
            visual_vertices = visual_positions.len(),
            collision_vertices = collision_positions.len(),
            "Generated track segment meshes"
        );

        Ok(SegmentMeshes {
            visual: MeshBuffer {
                positions: visual_positions,
                normals: Some(visual_normals),
                indices: self.topology.visual_indices().to_vec(),
            },
            collision: MeshBuffer {
                positions: collision_positions,
                normals: None,
                indices: self.topology.collision_indices().to_vec(),
            },
        })
    }
}

/// Generate both meshes for `descriptor` with the default configuration.
///
/// # Errors
///
/// Returns [`CurveError::InvalidDescriptor`](crate::CurveError::InvalidDescriptor)
/// for an invalid descriptor, or
/// [`CurveError::DegenerateCurve`](crate::CurveError::DegenerateCurve) if any
/// frame vector collapses.
///
/// # Example
///
/// ```
/// use track_mesh::{generate, CurveDescriptor};
/// use nalgebra::Point3;
///
/// let descriptor = CurveDescriptor::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(7.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
/// )
/// .with_samples(2);
///
/// let meshes = generate(&descriptor).unwrap();
/// assert_eq!(meshes.visual.indices.len(), 6);
/// assert_eq!(meshes.collision.indices.len(), 24);
/// ```
pub fn generate(descriptor: &CurveDescriptor) -> CurveResult<SegmentMeshes> {
    CurveMeshGenerator::new(*descriptor, MeshConfig::default())?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use track_curve::{CurveError, FrameAxis, InvalidDescriptor};

    fn straight() -> CurveDescriptor {
        CurveDescriptor::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(7.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        )
        .with_width(2.0)
        .with_height(1.0)
        .with_samples(2)
    }

    fn hairpin(samples: usize) -> CurveDescriptor {
        CurveDescriptor::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(8.0, 0.0, 0.0),
            Point3::new(8.0, 1.0, 6.0),
            Point3::new(0.0, 2.0, 6.0),
        )
        .with_up(Vector3::y(), Vector3::new(0.3, 1.0, 0.0))
        .with_samples(samples)
    }

    fn default_generator(samples: usize) -> CurveMeshGenerator {
        CurveMeshGenerator::new(hairpin(samples), MeshConfig::default()).expect("generator")
    }

    #[test]
    fn straight_segment_vertices() {
        let meshes = generate(&straight()).expect("meshes");

        assert_eq!(meshes.visual.vertex_count(), 4);
        assert_eq!(meshes.collision.vertex_count(), 8);
        assert_relative_eq!(meshes.visual.positions[0], Point3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(meshes.visual.positions[1], Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(
            meshes.collision.positions[4],
            Point3::new(10.0, 0.5, -1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn visual_normals_follow_up() {
        let meshes = generate(&straight()).expect("meshes");
        let normals = meshes.visual.normals.expect("normals");
        assert_eq!(normals.len(), 4);
        for n in normals {
            assert_relative_eq!(n, Vector3::y(), epsilon = 1e-12);
        }
        assert!(meshes.collision.normals.is_none());
    }

    #[test]
    fn buffer_sizes_scale_with_samples() {
        for samples in [2, 3, 7, 20] {
            let meshes = generate(&hairpin(samples)).expect("meshes");
            assert_eq!(meshes.visual.vertex_count(), 2 * samples);
            assert_eq!(meshes.collision.vertex_count(), 4 * samples);
            assert_eq!(meshes.visual.indices.len(), 6 * (samples - 1));
            assert_eq!(meshes.collision.indices.len(), 24 * (samples - 1));
            assert!(meshes.visual.indices_in_bounds());
            assert!(meshes.collision.indices_in_bounds());
        }
    }

    #[test]
    fn double_sided_ribbon_doubles_indices() {
        let config = MeshConfig::default().double_sided();
        let generator = CurveMeshGenerator::new(hairpin(5), config).expect("generator");
        let meshes = generator.generate().expect("meshes");
        assert_eq!(meshes.visual.indices.len(), 12 * 4);
        assert!(meshes.visual.indices_in_bounds());
    }

    #[test]
    fn ribbon_faces_point_up() {
        let meshes = generate(&straight()).expect("meshes");
        let p = &meshes.visual.positions;
        for [a, b, c] in meshes.visual.triangles() {
            let (a, b, c) = (p[a as usize], p[b as usize], p[c as usize]);
            let normal = (b - a).cross(&(c - a));
            assert!(normal.y > 0.0);
        }
    }

    #[test]
    fn tube_faces_point_outward() {
        let meshes = generate(&hairpin(9)).expect("meshes");
        let p = &meshes.collision.positions;
        for (i, [a, b, c]) in meshes.collision.triangles().enumerate() {
            let ring = (i / 8) * 4;
            let center = p[ring..ring + 8]
                .iter()
                .fold(Vector3::zeros(), |acc, q| acc + q.coords)
                / 8.0;
            let (a, b, c) = (p[a as usize], p[b as usize], p[c as usize]);
            let normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&(centroid - center)) > 0.0, "triangle {i} faces inward");
        }
    }

    #[test]
    fn parallel_sampling_matches_sequential() {
        let descriptor = hairpin(64);
        let sequential = CurveMeshGenerator::new(descriptor, MeshConfig::default())
            .and_then(|g| g.generate())
            .expect("sequential");

        let config = MeshConfig::default()
            .with_parallel(true)
            .with_parallel_threshold(2);
        let parallel = CurveMeshGenerator::new(descriptor, config)
            .and_then(|g| g.generate())
            .expect("parallel");

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn set_descriptor_reuses_topology() {
        let mut generator = default_generator(6);
        let before = generator.topology().clone();

        generator
            .set_descriptor(hairpin(6).with_width(3.0))
            .expect("same sample count");
        assert_eq!(generator.topology(), &before);

        generator.set_descriptor(hairpin(9)).expect("new sample count");
        assert_eq!(generator.topology().samples(), 9);
        assert_eq!(generator.topology().visual_indices().len(), 6 * 8);
    }

    #[test]
    fn set_descriptor_rejects_invalid() {
        let mut generator = default_generator(6);
        let err = generator.set_descriptor(hairpin(6).with_width(-1.0));

        assert_eq!(
            err,
            Err(CurveError::InvalidDescriptor(InvalidDescriptor::NonPositiveWidth(-1.0)))
        );
        assert_eq!(generator.descriptor(), &hairpin(6));
    }

    #[test]
    fn set_config_rebuilds_ribbon_topology() {
        let mut generator = default_generator(4);
        generator.set_config(MeshConfig::default().double_sided());
        assert_eq!(generator.topology().visual_indices().len(), 12 * 3);
        assert!(generator.config().double_sided_ribbon);
    }

    #[test]
    fn invalid_descriptor_rejected_at_construction() {
        let result = CurveMeshGenerator::new(straight().with_samples(1), MeshConfig::default());
        assert!(result.is_err_and(|e| e.is_invalid_descriptor()));
    }

    #[test]
    fn degenerate_start_fails_generation() {
        let descriptor = CurveDescriptor::new(
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(7.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        );
        assert_eq!(
            generate(&descriptor),
            Err(CurveError::DegenerateCurve {
                sample: 0,
                axis: FrameAxis::Forward
            })
        );
    }

    #[test]
    fn frames_are_exposed_in_order() {
        let generator = default_generator(5);
        let frames = generator.frames().expect("frames");
        assert_eq!(frames.len(), 5);
        for pair in frames.windows(2) {
            assert!(pair[0].t < pair[1].t);
        }
    }
}
