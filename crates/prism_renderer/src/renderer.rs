//! Whitted-style direct lighting renderer.
//!
//! For every pixel:
//! - One primary ray through the pixel center
//! - Closest hit against the scene
//! - Per light: shadow ray, then the contribution selected by [`LightMode`]
//! - Max-to-one tone mapping and 8-bit conversion
//!
//! Pixels are independent and rendered in parallel with rayon.

use crate::{Color, FrameBuffer, Ray, Rgb8, Scene};
use prism_math::{Mat4, Vec3, RAY_T_MIN};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Offset along the light direction applied to shadow ray origins.
pub const SHADOW_OFFSET: f32 = 0.01;

/// Which term of the lighting equation is accumulated per light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightMode {
    /// Cosine between normal and light direction, in white
    ObservedArea,
    /// Light irradiance only
    Radiance,
    /// Material BRDF only
    Brdf,
    /// Irradiance * BRDF * cosine
    #[default]
    Combined,
}

impl LightMode {
    /// Next mode, wrapping around after `Combined`.
    pub fn cycle(self) -> Self {
        match self {
            LightMode::ObservedArea => LightMode::Radiance,
            LightMode::Radiance => LightMode::Brdf,
            LightMode::Brdf => LightMode::Combined,
            LightMode::Combined => LightMode::ObservedArea,
        }
    }
}

/// Per-frame render options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub light_mode: LightMode,
    pub shadows_enabled: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            light_mode: LightMode::Combined,
            shadows_enabled: true,
        }
    }
}

impl RenderConfig {
    pub fn toggle_shadows(self) -> Self {
        Self {
            shadows_enabled: !self.shadows_enabled,
            ..self
        }
    }

    pub fn cycle_light_mode(self) -> Self {
        Self {
            light_mode: self.light_mode.cycle(),
            ..self
        }
    }
}

/// Per-frame values shared by every pixel.
struct FrameSetup {
    camera_to_world: Mat4,
    origin: Vec3,
    aspect_ratio: f32,
    fov: f32,
}

/// Renders scenes into frame buffers of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub width: u32,
    pub height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render a full frame.
    ///
    /// The scene is read-only here; mesh caches must be current.
    pub fn render(&self, scene: &Scene, config: &RenderConfig) -> FrameBuffer {
        let start = Instant::now();
        let mut frame = FrameBuffer::new(self.width, self.height);
        let setup = self.frame_setup(scene);

        frame
            .pixels
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, pixel)| {
                let px = (index % self.width as usize) as u32;
                let py = (index / self.width as usize) as u32;
                *pixel = color_to_rgb8(self.shade_pixel(scene, config, &setup, px, py));
            });

        log::debug!(
            "Rendered {}x{} frame ({:?}, shadows {}) in {:.2?}",
            self.width,
            self.height,
            config.light_mode,
            if config.shadows_enabled { "on" } else { "off" },
            start.elapsed()
        );

        frame
    }

    /// Render a single pixel, returning its tone-mapped color.
    pub fn render_pixel(&self, scene: &Scene, config: &RenderConfig, px: u32, py: u32) -> Color {
        let setup = self.frame_setup(scene);
        self.shade_pixel(scene, config, &setup, px, py)
    }

    /// Primary ray through the center of pixel (px, py).
    pub fn primary_ray(&self, scene: &Scene, px: u32, py: u32) -> Ray {
        self.primary_ray_with(&self.frame_setup(scene), px, py)
    }

    fn frame_setup(&self, scene: &Scene) -> FrameSetup {
        let camera = scene.camera();
        FrameSetup {
            camera_to_world: camera.camera_to_world(),
            origin: camera.origin,
            aspect_ratio: self.width as f32 / self.height as f32,
            fov: camera.fov_scale(),
        }
    }

    #[inline]
    fn primary_ray_with(&self, setup: &FrameSetup, px: u32, py: u32) -> Ray {
        let rx = px as f32 + 0.5;
        let ry = py as f32 + 0.5;

        let cx = (2.0 * (rx / self.width as f32) - 1.0) * setup.aspect_ratio * setup.fov;
        let cy = (1.0 - 2.0 * (ry / self.height as f32)) * setup.fov;

        let direction = setup
            .camera_to_world
            .transform_vector3(Vec3::new(cx, cy, 1.0))
            .normalize();

        Ray::new(setup.origin, direction)
    }

    fn shade_pixel(
        &self,
        scene: &Scene,
        config: &RenderConfig,
        setup: &FrameSetup,
        px: u32,
        py: u32,
    ) -> Color {
        let view_ray = self.primary_ray_with(setup, px, py);
        max_to_one(trace(scene, config, &view_ray))
    }
}

/// Direct lighting along `view_ray`, before tone mapping.
pub fn trace(scene: &Scene, config: &RenderConfig, view_ray: &Ray) -> Color {
    let hit = scene.closest_hit(view_ray);
    if !hit.did_hit {
        return Color::ZERO;
    }

    let material = scene.material(hit.material);
    let view_dir = -view_ray.direction();
    let mut color = Color::ZERO;

    for light in scene.lights() {
        let (light_dir, light_distance) = light.direction_to(hit.p);

        let observed_area = hit.normal.dot(light_dir);
        if observed_area <= 0.0 {
            continue;
        }

        if config.shadows_enabled {
            let shadow_ray = Ray::with_bounds(
                hit.p + light_dir * SHADOW_OFFSET,
                light_dir,
                RAY_T_MIN,
                light_distance - SHADOW_OFFSET,
            );
            if scene.does_hit(&shadow_ray) {
                continue;
            }
        }

        color += match config.light_mode {
            LightMode::ObservedArea => Color::splat(observed_area),
            LightMode::Radiance => light.radiance(hit.p),
            LightMode::Brdf => material.shade(&hit, light_dir, view_dir),
            LightMode::Combined => {
                light.radiance(hit.p) * material.shade(&hit, light_dir, view_dir) * observed_area
            }
        };
    }

    color
}

/// Scale a color down so its largest channel is at most 1.
#[inline]
pub fn max_to_one(color: Color) -> Color {
    let max = color.max_element();
    if max > 1.0 {
        color / max
    } else {
        color
    }
}

/// Convert a tone-mapped color to 8 bits per channel.
///
/// Float-to-int `as` saturates, so out-of-range values clamp and NaN becomes 0.
#[inline]
pub fn color_to_rgb8(color: Color) -> Rgb8 {
    Rgb8::new(
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    )
}
