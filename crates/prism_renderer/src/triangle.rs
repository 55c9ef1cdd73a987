//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then checks the hit point against
//! each edge with a scalar triple product. Only the face normal is needed, so
//! no barycentric coordinates are computed.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use prism_core::face_normal;
use prism_math::{approx_eq, Vec3};

/// Which triangle orientations rays can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Faces whose normal points away from the ray origin are skipped.
    #[default]
    BackFaceCulling,
    /// Faces whose normal points towards the ray origin are skipped.
    FrontFaceCulling,
    NoCulling,
}

impl CullMode {
    /// Whether a ray with `n_dot_d = dot(normal, direction)` is culled.
    ///
    /// Shadow rays use the opposite polarity: a face invisible to the camera
    /// still blocks light, and its camera-facing side does not.
    #[inline]
    pub fn culls(self, n_dot_d: f32, shadow: bool) -> bool {
        let back_facing = if shadow { n_dot_d < 0.0 } else { n_dot_d > 0.0 };
        let front_facing = if shadow { n_dot_d > 0.0 } else { n_dot_d < 0.0 };

        match self {
            CullMode::BackFaceCulling => back_facing,
            CullMode::FrontFaceCulling => front_facing,
            CullMode::NoCulling => false,
        }
    }
}

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Pre-computed face normal (unit length)
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material: MaterialId,
}

impl Triangle {
    /// Create a new triangle from three vertices, counter-clockwise winding.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self::with_normal(v0, v1, v2, face_normal(v0, v1, v2))
    }

    /// Create a triangle with a pre-computed normal.
    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal,
            cull_mode: CullMode::default(),
            material: MaterialId::DEFAULT,
        }
    }

    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = material;
        self
    }

    /// Distance to the intersection, if the ray hits this triangle.
    #[inline]
    pub fn intersect(&self, ray: &Ray, shadow: bool) -> Option<f32> {
        let n_dot_d = self.normal.dot(ray.direction());

        if self.cull_mode.culls(n_dot_d, shadow) {
            return None;
        }

        // Grazing the supporting plane
        if approx_eq(n_dot_d, 0.0) {
            return None;
        }

        let t = (self.v0 - ray.origin()).dot(self.normal) / n_dot_d;
        if !ray.accepts(t) {
            return None;
        }

        let p = ray.at(t);
        let inside = [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
            .into_iter()
            .all(|(a, b)| (b - a).cross(p - a).dot(self.normal) >= 0.0);

        inside.then_some(t)
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let Some(t) = self.intersect(ray, false) else {
            return false;
        };

        *rec = HitRecord {
            did_hit: true,
            t,
            p: ray.at(t),
            normal: self.normal,
            material: self.material,
        };

        true
    }

    fn occludes(&self, ray: &Ray) -> bool {
        self.intersect(ray, true).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangle in the z=0 plane, counter-clockwise seen from -Z, normal -Z.
    fn facing_minus_z() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        )
    }

    fn toward_plus_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z)
    }

    #[test]
    fn test_triangle_normal_from_winding() {
        let tri = facing_minus_z();
        assert!((tri.normal + Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_triangle_hit() {
        let tri = facing_minus_z().with_material(MaterialId(2));
        let ray = toward_plus_z();
        let mut rec = HitRecord::miss(&ray);

        assert!(tri.hit(&ray, &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(rec.p.length() < 1e-5);
        assert_eq!(rec.normal, tri.normal);
        assert_eq!(rec.material, MaterialId(2));
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let tri = facing_minus_z().with_cull_mode(CullMode::NoCulling);
        let ray = Ray::new(Vec3::new(2.0, 0.0, -2.0), Vec3::Z);
        let mut rec = HitRecord::miss(&ray);

        assert!(!tri.hit(&ray, &mut rec));
        assert!(!tri.occludes(&ray));
    }

    #[test]
    fn test_triangle_point_on_edge_is_inside() {
        let tri = facing_minus_z();
        // Midpoint of the bottom edge v2 -> v0
        let ray = Ray::new(Vec3::new(0.0, -1.0, -2.0), Vec3::Z);
        assert!(tri.intersect(&ray, false).is_some());
    }

    #[test]
    fn test_triangle_winding_flips_culling() {
        let front = facing_minus_z();
        let swapped = Triangle::new(front.v0, front.v2, front.v1);
        assert!((swapped.normal - Vec3::Z).length() < 1e-5);

        let ray = toward_plus_z();
        let mut rec = HitRecord::miss(&ray);

        // Back-face culling: the -Z facing triangle faces the ray, the swapped one does not
        assert!(front.hit(&ray, &mut rec));
        let mut rec = HitRecord::miss(&ray);
        assert!(!swapped.hit(&ray, &mut rec));

        // Front-face culling reverses that
        let front = front.with_cull_mode(CullMode::FrontFaceCulling);
        let swapped = swapped.with_cull_mode(CullMode::FrontFaceCulling);
        assert!(front.intersect(&ray, false).is_none());
        assert!(swapped.intersect(&ray, false).is_some());
    }

    #[test]
    fn test_triangle_shadow_rays_invert_culling() {
        let ray = toward_plus_z();

        let back = facing_minus_z();
        assert!(back.intersect(&ray, false).is_some());
        assert!(!back.occludes(&ray));

        let front = facing_minus_z().with_cull_mode(CullMode::FrontFaceCulling);
        assert!(front.intersect(&ray, false).is_none());
        assert!(front.occludes(&ray));

        let none = facing_minus_z().with_cull_mode(CullMode::NoCulling);
        assert!(none.intersect(&ray, false).is_some());
        assert!(none.occludes(&ray));
    }

    #[test]
    fn test_triangle_grazing_ray_is_rejected() {
        let tri = facing_minus_z().with_cull_mode(CullMode::NoCulling);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(tri.intersect(&ray, false).is_none());
        assert!(tri.intersect(&ray, true).is_none());
    }

    #[test]
    fn test_triangle_respects_ray_range() {
        let tri = facing_minus_z();
        let ray = Ray::with_bounds(Vec3::new(0.0, 0.0, -2.0), Vec3::Z, 0.0, 1.5);
        assert!(tri.intersect(&ray, false).is_none());
    }
}
