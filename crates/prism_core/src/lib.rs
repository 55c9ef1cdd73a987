//! Prism Core - mesh assets for the ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh data**: `MeshData`, object-space positions, triangle indices and
//!   one face normal per triangle
//! - **OBJ support**: Wavefront OBJ import via `tobj`
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_obj;
//!
//! let mesh = load_obj("resources/lowpoly_bunny.obj")?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use mesh::{face_normal, MeshData};
pub use obj::{load_obj, parse_obj, LoadError, LoadResult};
