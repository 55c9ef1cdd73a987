use crate::{Interval, Vec3};

/// Default lower bound for hit distances, keeps surfaces from hitting themselves.
pub const RAY_T_MIN: f32 = 1e-4;

/// A ray in 3D space with origin, direction, and a valid hit range.
///
/// Hits are accepted in the half-open range `[t_min, t_max)`. Queries that
/// look for the closest hit shrink `t_max` as nearer surfaces are found, and
/// shadow rays set it to the distance to the light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Direction of travel, expected to be unit length
    pub direction: Vec3,
    pub t_min: f32,
    pub t_max: f32,
}

impl Ray {
    /// Create a ray with the default range `[RAY_T_MIN, inf)`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t_min: RAY_T_MIN,
            t_max: f32::INFINITY,
        }
    }

    /// Create a ray with an explicit hit range.
    pub fn with_bounds(origin: Vec3, direction: Vec3, t_min: f32, t_max: f32) -> Self {
        Self {
            origin,
            direction,
            t_min,
            t_max,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns true if `t` lies in `[t_min, t_max)`.
    #[inline]
    pub fn accepts(&self, t: f32) -> bool {
        t >= self.t_min && t < self.t_max
    }

    /// The hit range as a closed interval, for slab tests.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.t_min, self.t_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
        assert_eq!(ray.t_min, RAY_T_MIN);
        assert_eq!(ray.t_max, f32::INFINITY);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_accepts_half_open_range() {
        let ray = Ray::with_bounds(Vec3::ZERO, Vec3::Z, 1.0, 5.0);

        assert!(ray.accepts(1.0));
        assert!(ray.accepts(4.999));
        assert!(!ray.accepts(5.0));
        assert!(!ray.accepts(0.5));
        assert!(!ray.accepts(f32::NAN));
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::new(Vec3::ZERO, Vec3::Y);
        let mut ray2 = ray1; // Copy, not move
        ray2.t_max = 2.0;

        assert_eq!(ray1.origin, ray2.origin);
        assert_eq!(ray1.t_max, f32::INFINITY);
        assert_eq!(ray2.interval(), Interval::new(RAY_T_MIN, 2.0));
    }
}
