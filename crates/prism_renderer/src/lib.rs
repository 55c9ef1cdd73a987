//! Prism Renderer - CPU ray tracing
//!
//! A Whitted-style direct lighting ray tracer:
//! - Spheres, one-sided planes and triangle meshes with cull modes
//! - Point and directional lights with hard shadows
//! - Lambert, Lambert-Phong and Cook-Torrance materials
//! - Parallel per-pixel rendering into an 8-bit RGB frame buffer

pub mod brdf;
mod camera;
mod frame;
mod hittable;
mod light;
mod material;
mod mesh;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use frame::{FrameBuffer, FrameError, FrameResult, Rgb8};
pub use hittable::{any_hit_in, closest_hit_in, HitRecord, Hittable};
pub use light::Light;
pub use material::{Color, Material, MaterialId};
pub use mesh::TriangleMesh;
pub use plane::Plane;
pub use renderer::{
    color_to_rgb8, max_to_one, trace, LightMode, RenderConfig, Renderer, SHADOW_OFFSET,
};
pub use scene::{LightId, MeshId, PlaneId, Scene, SceneError, SceneResult, SphereId, MAX_MATERIALS};
pub use sphere::Sphere;
pub use triangle::{CullMode, Triangle};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Aabb, Interval, Ray, Vec3, RAY_T_MIN};
