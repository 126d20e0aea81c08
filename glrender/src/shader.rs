use crate::{
    error::ShaderError,
    gpu::{Gpu, INFO_LOG_CAPACITY, ProgramId, ShaderId, ShaderStage},
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    rc::Rc,
};

/// Reads a shader source file line by line, terminating every line with `\n`
/// (including a last line that had none).
pub fn read_source(path: impl AsRef<Path>) -> io::Result<String> {
    let reader = BufReader::new(File::open(path)?);
    let mut source = String::new();
    for line in reader.lines() {
        source.push_str(&line?);
        source.push('\n');
    }
    Ok(source)
}

/// Like [`read_source`], but a missing or unreadable file is logged and yields
/// an empty source, which then fails to compile.
pub fn load_source(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match read_source(path) {
        Ok(source) => {
            log::debug!("loaded shader source {}", path.display());
            source
        }
        Err(err) => {
            log::error!("unable to load {}: {err}", path.display());
            String::new()
        }
    }
}

/// Compiles one stage. On failure the shader object is released and the
/// bounded info log is returned in the error.
pub fn compile<G: Gpu + ?Sized>(
    gpu: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderId, ShaderError> {
    let shader = gpu.create_shader(stage, source);
    if gpu.compile_shader(shader) {
        return Ok(shader);
    }

    let log = gpu.shader_info_log(shader, INFO_LOG_CAPACITY);
    gpu.delete_shader(shader);
    log::error!("unable to compile {stage} shader: {log}");
    Err(ShaderError::Compile { stage, log })
}

/// A linked vertex + fragment program.
///
/// Models share one program through `Rc`; the GPU object is deleted when the
/// last reference goes away.
#[derive(Debug)]
pub struct ShaderProgram<G: Gpu> {
    gpu: Rc<G>,
    id: ProgramId,
}

impl<G: Gpu> ShaderProgram<G> {
    pub fn link(gpu: &Rc<G>, vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        let vertex_shader = compile(&**gpu, ShaderStage::Vertex, vertex)?;
        let fragment_shader = match compile(&**gpu, ShaderStage::Fragment, fragment) {
            Ok(shader) => shader,
            Err(err) => {
                gpu.delete_shader(vertex_shader);
                return Err(err);
            }
        };

        let id = gpu.create_program();
        gpu.attach_shader(id, vertex_shader);
        gpu.attach_shader(id, fragment_shader);
        let linked = gpu.link_program(id);

        // The stages are only flagged for deletion while still attached.
        gpu.delete_shader(vertex_shader);
        gpu.delete_shader(fragment_shader);

        if !linked {
            let log = gpu.program_info_log(id, INFO_LOG_CAPACITY);
            gpu.delete_program(id);
            log::error!("unable to link program: {log}");
            return Err(ShaderError::Link { log });
        }

        log::debug!("linked shader program {}", id.0);
        Ok(Self {
            gpu: Rc::clone(gpu),
            id,
        })
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn gpu(&self) -> &Rc<G> {
        &self.gpu
    }
}

impl<G: Gpu> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        log::debug!("deleting shader program {}", self.id.0);
        self.gpu.delete_program(self.id);
    }
}
