use crate::gpu::ShaderStage;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("unable to initialize GLFW: {0:?}")]
    Init(glfw::InitError),
    #[error("unable to create a {width}x{height} window")]
    Create { width: u32, height: u32 },
    #[error("unable to open the OpenGL library")]
    GlOpen,
    #[error("unable to load OpenGL: {0} is missing")]
    GlLoad(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("unable to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("unable to link program: {log}")]
    Link { log: String },
}
