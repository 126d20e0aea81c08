pub mod camera;
pub mod config;
pub mod error;
pub mod gpu;
pub mod input;
pub mod logging;
pub mod mesh;
pub mod model;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod transform;
pub mod uniforms;
pub mod window;

pub use camera::{AspectMode, Camera, CameraConfig};
pub use config::ViewerConfig;
pub use error::{ShaderError, WindowError};
pub use gpu::Gpu;
pub use input::{Key, KeyInput};
pub use model::Model;
pub use scene::{FrameControl, Scene};
pub use shader::ShaderProgram;
pub use transform::Transform;
pub use window::{Platform, Window};
