//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use prism_math::Vec3;

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center,
            radius,
            material,
        }
    }

    /// Nearest root of `|O + tD - C|^2 = r^2` inside the ray range.
    ///
    /// A tangent ray (zero discriminant) counts as a hit.
    #[inline]
    fn nearest_root(&self, ray: &Ray) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        let near = (h - sqrtd) / a;
        if ray.accepts(near) {
            return Some(near);
        }

        let far = (h + sqrtd) / a;
        ray.accepts(far).then_some(far)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let Some(t) = self.nearest_root(ray) else {
            return false;
        };

        let p = ray.at(t);
        *rec = HitRecord {
            did_hit: true,
            t,
            p,
            normal: (p - self.center).normalize(),
            material: self.material,
        };

        true
    }

    fn occludes(&self, ray: &Ray) -> bool {
        self.nearest_root(ray).is_some()
    }
}
