//! Render settings, loaded from an optional JSON file.

use prism_renderer::{LightMode, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Which demo scene to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Cook-Torrance spheres and three spinning triangles in a box
    #[default]
    Reference,
    /// An OBJ mesh in the same box
    Bunny,
}

/// Everything the viewer needs to render a frame sequence.
///
/// Missing fields take their default, so `{}` is a valid settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub scene: SceneKind,
    /// Mesh loaded by the bunny scene
    pub obj_path: PathBuf,
    pub frames: u32,
    /// Seconds of animation time between frames
    pub time_step: f32,
    /// Frame output path, `{frame}` is replaced by the zero-padded frame
    /// number. Frames are not written when unset.
    pub output: Option<String>,
    pub light_mode: LightMode,
    pub shadows: bool,
    /// Seconds between frames-per-second reports
    pub fps_report_interval: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            scene: SceneKind::Reference,
            obj_path: PathBuf::from("resources/lowpoly_bunny.obj"),
            frames: 1,
            time_step: 1.0 / 30.0,
            output: Some("frame_{frame}.png".to_string()),
            light_mode: LightMode::Combined,
            shadows: true,
            fps_report_interval: 1.0,
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            light_mode: self.light_mode,
            shadows_enabled: self.shadows,
        }
    }

    /// Output path for `frame`, if frames are written.
    pub fn output_path(&self, frame: u32) -> Option<PathBuf> {
        self.output
            .as_ref()
            .map(|pattern| PathBuf::from(pattern.replace("{frame}", &format!("{frame:04}"))))
    }
}
