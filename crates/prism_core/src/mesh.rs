//! Triangle mesh data as handed to the renderer.
//!
//! `MeshData` is renderer-agnostic: it holds object-space geometry only. The
//! renderer's `TriangleMesh` adds cull mode, material and the world-space cache.

use prism_math::{Aabb, Vec3};

/// Face normal of the triangle `(p0, p1, p2)`, counter-clockwise winding.
///
/// Zero-area triangles produce a non-finite normal; callers that care must
/// check with `is_finite()`.
#[inline]
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;
    let cross = edge1.cross(edge2);
    cross / cross.length()
}

/// Object-space triangle mesh with one normal per face.
#[derive(Clone, Debug)]
pub struct MeshData {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Face normals (one per triangle)
    pub normals: Vec<Vec3>,

    /// Axis-aligned bounding box of the positions
    pub bounds: Aabb,
}

impl MeshData {
    /// Create a mesh from positions and indices, deriving face normals.
    ///
    /// Indices must be in range; use [`MeshData::first_invalid_index`] to check
    /// untrusted input first.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::enclosing(&positions);
        let mut mesh = Self {
            positions,
            indices,
            normals: Vec::new(),
            bounds,
        };
        mesh.compute_face_normals();
        mesh
    }

    /// Recompute one normal per triangle from the current positions.
    ///
    /// Returns the number of degenerate faces (non-finite normals).
    pub fn compute_face_normals(&mut self) -> usize {
        self.normals = self
            .indices
            .chunks_exact(3)
            .map(|face| {
                face_normal(
                    self.positions[face[0] as usize],
                    self.positions[face[1] as usize],
                    self.positions[face[2] as usize],
                )
            })
            .collect();

        let degenerate = self.normals.iter().filter(|n| !n.is_finite()).count();
        if degenerate > 0 {
            log::debug!(
                "{} of {} faces are degenerate and have no valid normal",
                degenerate,
                self.normals.len()
            );
        }
        degenerate
    }

    /// Returns the first index that does not refer to a vertex, if any.
    pub fn first_invalid_index(positions: &[Vec3], indices: &[u32]) -> Option<u32> {
        indices
            .iter()
            .copied()
            .find(|&index| index as usize >= positions.len())
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Check if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}
