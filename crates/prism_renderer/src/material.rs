//! Surface materials.
//!
//! A material turns a hit, a light direction and a view direction into a
//! reflectance color. Variants are a closed set and matched once per shade.

use crate::brdf;
use crate::hittable::HitRecord;
use prism_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Index of a material in the scene's material list.
///
/// Index 0 is always present and holds the scene's default material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub u8);

impl MaterialId {
    /// The scene's default material.
    pub const DEFAULT: MaterialId = MaterialId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reflectance model of a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Constant color, ignores lighting.
    SolidColor { color: Color },

    /// Perfectly diffuse surface.
    Lambert {
        diffuse_color: Color,
        /// Diffuse reflection coefficient, per channel
        kd: Color,
    },

    /// Lambert diffuse plus a white Phong highlight.
    LambertPhong {
        diffuse_color: Color,
        kd: f32,
        ks: f32,
        phong_exponent: f32,
    },

    /// Microfacet model with GGX distribution and Smith geometry.
    CookTorrance {
        albedo: Color,
        /// Zero for dielectrics, anything else is treated as metal
        metalness: f32,
        /// 0 = smooth, 1 = rough
        roughness: f32,
    },
}

impl Material {
    pub fn solid_color(color: Color) -> Self {
        Self::SolidColor { color }
    }

    /// Lambert material with a scalar reflection coefficient.
    pub fn lambert(diffuse_color: Color, kd: f32) -> Self {
        Self::Lambert {
            diffuse_color,
            kd: Color::splat(kd),
        }
    }

    /// Lambert material with a per-channel reflection coefficient.
    pub fn lambert_rgb(diffuse_color: Color, kd: Color) -> Self {
        Self::Lambert { diffuse_color, kd }
    }

    pub fn lambert_phong(diffuse_color: Color, kd: f32, ks: f32, phong_exponent: f32) -> Self {
        Self::LambertPhong {
            diffuse_color,
            kd,
            ks,
            phong_exponent,
        }
    }

    pub fn cook_torrance(albedo: Color, metalness: f32, roughness: f32) -> Self {
        Self::CookTorrance {
            albedo,
            metalness,
            roughness,
        }
    }

    /// Reflectance for light arriving from `l` and leaving towards `v`.
    ///
    /// Both directions are unit vectors pointing away from the surface.
    pub fn shade(&self, hit: &HitRecord, l: Vec3, v: Vec3) -> Color {
        match *self {
            Material::SolidColor { color } => color,

            Material::Lambert { diffuse_color, kd } => brdf::lambert_rgb(kd, diffuse_color),

            Material::LambertPhong {
                diffuse_color,
                kd,
                ks,
                phong_exponent,
            } => {
                brdf::lambert(kd, diffuse_color)
                    + brdf::phong(ks, phong_exponent, l, v, hit.normal)
            }

            Material::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => shade_cook_torrance(albedo, metalness, roughness, hit.normal, l, v),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::solid_color(Color::new(1.0, 0.0, 0.0))
    }
}

fn shade_cook_torrance(
    albedo: Color,
    metalness: f32,
    roughness: f32,
    n: Vec3,
    l: Vec3,
    v: Vec3,
) -> Color {
    let is_metal = metalness != 0.0;
    let f0 = if is_metal {
        albedo
    } else {
        Color::splat(brdf::DIELECTRIC_F0)
    };

    let h = (v + l).normalize();

    let f = brdf::fresnel_schlick(h, v, f0);
    let d = brdf::normal_distribution_ggx(n, h, roughness);
    let g = brdf::geometry_smith(n, v, l, roughness);

    let specular = f * d * g / (4.0 * v.dot(n) * l.dot(n));

    // Metals have no diffuse lobe
    let kd = if is_metal { Color::ZERO } else { Color::ONE - f };
    let diffuse = brdf::lambert_rgb(kd, albedo);

    diffuse + specular
}
