//! Wavefront OBJ import.
//!
//! Only geometry is read: vertex positions and faces (triangulated). Normals
//! and materials in the file are ignored, face normals are always derived
//! from the winding so flat shading matches the cull-mode convention.

use std::io::BufReader;
use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

use crate::mesh::MeshData;

/// Errors that can occur during OBJ loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No geometry found in OBJ file")]
    NoGeometry,

    #[error("Face index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load an OBJ file into a single mesh.
///
/// All models in the file are merged, in file order.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<MeshData> {
    let path = path.as_ref();
    log::info!("Loading OBJ: {}", path.display());

    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = merge_models(&models)?;

    log::info!(
        "Loaded {} ({} vertices, {} triangles)",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse OBJ source text into a single mesh. `mtllib` statements are ignored.
pub fn parse_obj(source: &str) -> LoadResult<MeshData> {
    let mut reader = BufReader::new(source.as_bytes());
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    merge_models(&models)
}

fn merge_models(models: &[tobj::Model]) -> LoadResult<MeshData> {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let base = positions.len() as u32;
        positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        indices.extend(model.mesh.indices.iter().map(|&i| base + i));
        log::debug!(
            "OBJ model '{}': {} triangles",
            model.name,
            model.mesh.indices.len() / 3
        );
    }

    if indices.is_empty() {
        return Err(LoadError::NoGeometry);
    }

    if let Some(index) = MeshData::first_invalid_index(&positions, &indices) {
        return Err(LoadError::IndexOutOfRange {
            index,
            vertex_count: positions.len(),
        });
    }

    Ok(MeshData::new(positions, indices))
}
