//! Triangle mesh with a cached world-space copy.
//!
//! Object-space geometry is transformed once per change into world space;
//! hit tests read only the cache. Call [`TriangleMesh::update_transforms`]
//! (or `Scene::update_mesh_caches`) after changing the transform or geometry
//! and before rendering: a stale cache is a bug, not something hit tests
//! check for.

use crate::{
    hittable::{HitRecord, Hittable},
    triangle::{CullMode, Triangle},
    MaterialId, Ray,
};
use prism_core::{face_normal, MeshData};
use prism_math::{Aabb, Mat4, Mat4Ext, Vec3};

/// An indexed triangle mesh sharing one cull mode and material.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    // Object space
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    /// One normal per triangle
    normals: Vec<Vec3>,
    bounds: Aabb,
    /// Positions changed since `bounds` was computed
    bounds_stale: bool,

    pub cull_mode: CullMode,
    pub material: MaterialId,

    // Transform parts, composed as translation * rotation * scale
    translation: Mat4,
    rotation: Mat4,
    scale: Mat4,

    // World-space cache
    transformed_positions: Vec<Vec3>,
    transformed_normals: Vec<Vec3>,
    transformed_bounds: Aabb,
    stale: bool,
}

impl TriangleMesh {
    /// Create a mesh from positions and indices, deriving face normals.
    ///
    /// The world-space cache is built immediately with an identity transform.
    /// Indices must be in range; use [`MeshData::first_invalid_index`] to check
    /// untrusted input first.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        cull_mode: CullMode,
        material: MaterialId,
    ) -> Self {
        debug_assert!(
            MeshData::first_invalid_index(&positions, &indices).is_none(),
            "mesh index out of range"
        );
        let mut mesh = Self::empty(cull_mode, material);
        mesh.positions = positions;
        mesh.indices = indices;
        mesh.calculate_normals();
        mesh.update_aabb();
        mesh.update_transforms();
        mesh
    }

    /// Create a mesh from imported geometry, keeping its face normals.
    pub fn from_mesh_data(data: MeshData, cull_mode: CullMode, material: MaterialId) -> Self {
        let mut mesh = Self::empty(cull_mode, material);
        mesh.positions = data.positions;
        mesh.indices = data.indices;
        mesh.normals = data.normals;
        mesh.bounds = data.bounds;
        mesh.update_transforms();
        mesh
    }

    /// A mesh with no triangles, to be filled with [`TriangleMesh::append_triangle`].
    pub fn empty(cull_mode: CullMode, material: MaterialId) -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
            normals: Vec::new(),
            bounds: Aabb::EMPTY,
            bounds_stale: false,
            cull_mode,
            material,
            translation: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            scale: Mat4::IDENTITY,
            transformed_positions: Vec::new(),
            transformed_normals: Vec::new(),
            transformed_bounds: Aabb::EMPTY,
            stale: false,
        }
    }

    /// Append a triangle as three new vertices.
    ///
    /// Unless `ignore_transform_update` is set, the object-space bounds and the
    /// world-space cache are refreshed right away. Batch appends should pass
    /// true and call [`TriangleMesh::update_transforms`] once at the end,
    /// which also refreshes the bounds.
    pub fn append_triangle(&mut self, triangle: &Triangle, ignore_transform_update: bool) {
        let start = self.positions.len() as u32;
        self.positions
            .extend_from_slice(&[triangle.v0, triangle.v1, triangle.v2]);
        self.indices.extend_from_slice(&[start, start + 1, start + 2]);
        self.normals.push(triangle.normal);

        if ignore_transform_update {
            self.bounds_stale = true;
            self.stale = true;
        } else {
            self.update_aabb();
            self.update_transforms();
        }
    }

    /// Recompute one normal per triangle from the object-space positions.
    pub fn calculate_normals(&mut self) {
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
        self.stale = true;
    }

    /// Set the translation part of the transform.
    pub fn translate(&mut self, translation: Vec3) {
        self.translation = Mat4::from_translation(translation);
        self.stale = true;
    }

    /// Set the rotation part of the transform to a rotation about +Y (radians).
    pub fn rotate_y(&mut self, yaw: f32) {
        self.rotation = Mat4::from_rotation_y(yaw);
        self.stale = true;
    }

    /// Set the scale part of the transform.
    pub fn scale(&mut self, scale: Vec3) {
        self.scale = Mat4::from_scale(scale);
        self.stale = true;
    }

    /// Object-to-world matrix.
    pub fn transform(&self) -> Mat4 {
        self.translation * self.rotation * self.scale
    }

    /// Recompute the object-space bounding box from the positions.
    pub fn update_aabb(&mut self) {
        self.bounds = Aabb::enclosing(&self.positions);
        self.bounds_stale = false;
        self.stale = true;
    }

    /// Rebuild the world-space positions, normals and bounding box.
    ///
    /// Object-space bounds left behind by batched appends are recomputed first.
    pub fn update_transforms(&mut self) {
        if self.bounds_stale {
            self.update_aabb();
        }

        let transform = self.transform();
        let normal_matrix = transform.normal_matrix();

        self.transformed_positions.clear();
        self.transformed_positions.extend(
            self.positions
                .iter()
                .map(|&p| transform.transform_point3(p)),
        );

        self.transformed_normals.clear();
        self.transformed_normals.extend(
            self.normals
                .iter()
                .map(|&n| normal_matrix.transform_vector3(n).normalize()),
        );

        self.transformed_bounds = transform.transform_aabb(&self.bounds);
        self.stale = false;
    }

    /// True if the transform or geometry changed since the last cache rebuild.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// World-space bounding box from the last cache rebuild.
    pub fn world_bounds(&self) -> Aabb {
        self.transformed_bounds
    }

    /// World-space triangle `index`, built from the cache.
    pub fn world_triangle(&self, index: usize) -> Triangle {
        let face = &self.indices[index * 3..index * 3 + 3];
        Triangle {
            v0: self.transformed_positions[face[0] as usize],
            v1: self.transformed_positions[face[1] as usize],
            v2: self.transformed_positions[face[2] as usize],
            normal: self.transformed_normals[index],
            cull_mode: self.cull_mode,
            material: self.material,
        }
    }

    fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(|index| self.world_triangle(index))
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        if !self.transformed_bounds.hit(ray) {
            return false;
        }

        // Every accepted triangle shrinks the range for the ones after it
        let mut ray = *ray;
        let mut hit_anything = false;

        for triangle in self.world_triangles() {
            if triangle.hit(&ray, rec) {
                hit_anything = true;
                ray.t_max = rec.t;
            }
        }

        hit_anything
    }

    fn occludes(&self, ray: &Ray) -> bool {
        if !self.transformed_bounds.hit(ray) {
            return false;
        }

        self.world_triangles().any(|triangle| triangle.occludes(ray))
    }
}
