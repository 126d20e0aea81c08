use crate::{camera::CameraConfig, logging::LoggingConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Requested OpenGL core profile version.
    pub context_version: (u32, u32),
    /// Multisample count; `None` disables the hint.
    pub samples: Option<u32>,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "GLRender".to_string(),
            context_version: (3, 3),
            samples: Some(4),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Shader source files, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/Vertex.glsl"),
            fragment: PathBuf::from("shaders/Fragment.glsl"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub shaders: ShaderPaths,
    pub logging: LoggingConfig,
}
