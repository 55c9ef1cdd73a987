//! BRDF building blocks.
//!
//! Directions follow one convention throughout: `l` points from the surface
//! towards the light, `v` points from the surface towards the viewer, `n` is
//! the unit surface normal. No input is validated; grazing configurations can
//! yield non-finite values that the render loop clamps away.

use crate::material::Color;
use prism_math::Vec3;
use std::f32::consts::PI;

/// Base reflectance of dielectrics at normal incidence.
pub const DIELECTRIC_F0: f32 = 0.04;

/// Lambert diffuse with a scalar reflection coefficient.
///
/// - `kd`: diffuse reflection coefficient
/// - `cd`: diffuse color
#[inline]
pub fn lambert(kd: f32, cd: Color) -> Color {
    cd * kd / PI
}

/// Lambert diffuse with a per-channel reflection coefficient.
#[inline]
pub fn lambert_rgb(kd: Color, cd: Color) -> Color {
    cd * kd / PI
}

/// Phong specular lobe (white).
///
/// - `ks`: specular reflection coefficient
/// - `exp`: Phong exponent
///
/// The light direction is mirrored about the normal; the lobe is zero once
/// the mirrored direction and `v` are more than 90 degrees apart.
#[inline]
pub fn phong(ks: f32, exp: f32, l: Vec3, v: Vec3, n: Vec3) -> Color {
    let reflected = 2.0 * n.dot(l) * n - l;
    let cos_alpha = reflected.dot(v).max(0.0);
    Color::splat(ks * cos_alpha.powf(exp))
}

/// Fresnel term, Schlick's approximation.
///
/// `h` is the normalized half vector, `f0` the base reflectivity.
#[inline]
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Color) -> Color {
    let weight = (1.0 - h.dot(v)).powi(5);
    f0 + (Color::ONE - f0) * weight
}

/// Trowbridge-Reitz GGX normal distribution (UE4 squared-roughness remap).
#[inline]
pub fn normal_distribution_ggx(n: Vec3, h: Vec3, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let n_dot_h = n.dot(h);

    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

/// Schlick-GGX geometry term for direct lighting, for a single direction.
#[inline]
pub fn geometry_schlick_ggx(n: Vec3, v: Vec3, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let k = (a + 1.0) * (a + 1.0) / 8.0;

    let n_dot_v = n.dot(v);
    n_dot_v / (n_dot_v * (1.0 - k) + k)
}

/// Smith geometry term: masking (view) times shadowing (light).
#[inline]
pub fn geometry_smith(n: Vec3, v: Vec3, l: Vec3, roughness: f32) -> f32 {
    geometry_schlick_ggx(n, v, roughness) * geometry_schlick_ggx(n, l, roughness)
}
