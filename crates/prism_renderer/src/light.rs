//! Point and directional lights.

use crate::Color;
use prism_math::Vec3;

/// A light source.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Radiates from `origin`, falling off with the square of the distance.
    Point {
        origin: Vec3,
        intensity: f32,
        color: Color,
    },
    /// Infinitely far away; `direction` is the direction the light travels.
    Directional {
        direction: Vec3,
        intensity: f32,
        color: Color,
    },
}

impl Light {
    pub fn point(origin: Vec3, intensity: f32, color: Color) -> Self {
        Self::Point {
            origin,
            intensity,
            color,
        }
    }

    /// A directional light. `direction` need not be normalized.
    pub fn directional(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self::Directional {
            direction: direction.normalize(),
            intensity,
            color,
        }
    }

    /// Unit direction from `target` towards the light and the distance to it.
    ///
    /// Directional lights are at infinite distance.
    #[inline]
    pub fn direction_to(&self, target: Vec3) -> (Vec3, f32) {
        match *self {
            Light::Point { origin, .. } => {
                let to_light = origin - target;
                let distance = to_light.length();
                (to_light / distance, distance)
            }
            Light::Directional { direction, .. } => (-direction, f32::INFINITY),
        }
    }

    /// Irradiance the light delivers at `target`.
    #[inline]
    pub fn radiance(&self, target: Vec3) -> Color {
        match *self {
            Light::Point {
                origin,
                intensity,
                color,
            } => color * (intensity / origin.distance_squared(target)),
            Light::Directional {
                intensity, color, ..
            } => color * intensity,
        }
    }

    /// Move a point light. Has no effect on directional lights.
    pub fn set_origin(&mut self, new_origin: Vec3) {
        if let Light::Point { origin, .. } = self {
            *origin = new_origin;
        }
    }

    pub fn set_intensity(&mut self, new_intensity: f32) {
        match self {
            Light::Point { intensity, .. } | Light::Directional { intensity, .. } => {
                *intensity = new_intensity
            }
        }
    }
}
