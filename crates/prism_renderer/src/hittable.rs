//! Hittable trait and HitRecord for ray-object intersection.

use crate::material::MaterialId;
use crate::Ray;
use prism_math::Vec3;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Whether anything was hit
    pub did_hit: bool,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: MaterialId,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            did_hit: false,
            t: f32::INFINITY,
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: MaterialId::DEFAULT,
        }
    }
}

impl HitRecord {
    /// A "no hit" record whose distance starts at the ray's current bound.
    pub fn miss(ray: &Ray) -> Self {
        Self {
            t: ray.t_max,
            ..Self::default()
        }
    }
}

/// Trait for geometry that can be hit by rays.
///
/// Both forms only accept hits with `t` in the ray's `[t_min, t_max)`.
pub trait Hittable: Send + Sync {
    /// Visible-hit test. On a hit, fills in `rec` and returns true; on a miss
    /// `rec` is left untouched.
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool;

    /// Occlusion test for shadow rays. Skips building a hit record and uses
    /// the shadow-side cull rules where they differ from [`Hittable::hit`].
    fn occludes(&self, ray: &Ray) -> bool;
}

/// Closest-hit scan over one homogeneous list of geometry.
///
/// `ray.t_max` is tightened to every accepted hit, so each later object can
/// only replace `rec` with something strictly closer.
pub fn closest_hit_in<T: Hittable>(objects: &[T], ray: &mut Ray, rec: &mut HitRecord) -> bool {
    let mut hit_anything = false;

    for object in objects {
        if object.hit(ray, rec) {
            hit_anything = true;
            ray.t_max = rec.t;
        }
    }

    hit_anything
}

/// Any-hit scan over one homogeneous list of geometry.
pub fn any_hit_in<T: Hittable>(objects: &[T], ray: &Ray) -> bool {
    objects.iter().any(|object| object.occludes(ray))
}
