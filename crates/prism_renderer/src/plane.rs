//! One-sided infinite plane.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use prism_math::Vec3;

/// An infinite plane through `origin`, visible only from the side its normal
/// points to. Rays arriving from behind, or running parallel, never hit it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    /// Unit normal
    pub normal: Vec3,
    pub material: MaterialId,
}

impl Plane {
    pub fn new(origin: Vec3, normal: Vec3, material: MaterialId) -> Self {
        Self {
            origin,
            normal,
            material,
        }
    }

    #[inline]
    fn distance(&self, ray: &Ray) -> Option<f32> {
        let denominator = ray.direction().dot(self.normal);
        if denominator >= 0.0 {
            return None;
        }

        let t = (self.origin - ray.origin()).dot(self.normal) / denominator;
        ray.accepts(t).then_some(t)
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let Some(t) = self.distance(ray) else {
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
        self.distance(ray).is_some()
    }
}
