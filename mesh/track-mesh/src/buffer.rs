//! Output mesh buffers.

use nalgebra::{Point3, Vector3};

/// Flat vertex and index arrays for one mesh.
///
/// `indices` holds three entries per triangle. `normals`, when present,
/// is parallel to `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions, ring by ring.
    pub positions: Vec<Point3<f64>>,
    /// Per-vertex normals. The collision tube has none.
    pub normals: Option<Vec<Vector3<f64>>>,
    /// Triangle vertex indices.
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Whether every index refers to an existing vertex.
    #[must_use]
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.positions.len();
        self.indices
            .iter()
            .all(|&i| usize::try_from(i).is_ok_and(|i| i < count))
    }

    /// Positions narrowed to `f32` for single-precision consumers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn positions_f32(&self) -> Vec<[f32; 3]> {
        self.positions
            .iter()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// Normals narrowed to `f32`, if the buffer has normals.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn normals_f32(&self) -> Option<Vec<[f32; 3]>> {
        self.normals.as_ref().map(|normals| {
            normals
                .iter()
                .map(|n| [n.x as f32, n.y as f32, n.z as f32])
                .collect()
        })
    }
}

/// The two meshes generated for one track segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMeshes {
    /// Thin ribbon for rendering, with normals.
    pub visual: MeshBuffer,
    /// Closed rectangular tube for collision, without normals.
    pub collision: MeshBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshBuffer {
        MeshBuffer {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
            ],
            normals: Some(vec![Vector3::y(); 4]),
            indices: vec![0, 1, 2, 3, 2, 1],
        }
    }

    #[test]
    fn counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn triangles_iterate_in_order() {
        let tris: Vec<_> = quad().triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [3, 2, 1]]);
    }

    #[test]
    fn bounds_check() {
        let mut mesh = quad();
        assert!(mesh.indices_in_bounds());
        mesh.indices.push(4);
        assert!(!mesh.indices_in_bounds());
    }

    #[test]
    fn empty_buffer() {
        let mesh = MeshBuffer::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.indices_in_bounds());
        assert!(mesh.normals_f32().is_none());
    }

    #[test]
    fn f32_export() {
        let mesh = quad();
        let positions = mesh.positions_f32();
        assert_eq!(positions[3], [1.0, 0.0, 1.0]);
        assert_eq!(mesh.normals_f32(), Some(vec![[0.0, 1.0, 0.0]; 4]));
    }
}
