use super::{
    BufferId, BufferTarget, ClearMask, Gpu, ProgramId, ShaderId, ShaderStage, UniformLocation,
    VertexArrayId,
};
use crate::error::WindowError;
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr};
use std::{
    ffi::{CString, c_void},
    marker::PhantomData,
    ptr,
};

/// OpenGL through the `gl` function table.
///
/// Every call assumes the context the table was loaded for is current on the
/// calling thread, so the type is neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct GlGpu {
    _context: PhantomData<*const ()>,
}

impl GlGpu {
    /// Loads the function table with `loader` and applies the fixed render
    /// state: multisampling and depth testing on.
    pub fn load<F>(mut loader: F) -> Result<Self, WindowError>
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(|symbol| loader(symbol));

        let required: [(&'static str, fn() -> bool); 6] = [
            ("glCreateShader", gl::CreateShader::is_loaded),
            ("glLinkProgram", gl::LinkProgram::is_loaded),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
            ("glBufferData", gl::BufferData::is_loaded),
            ("glUniformMatrix4fv", gl::UniformMatrix4fv::is_loaded),
            ("glDrawElements", gl::DrawElements::is_loaded),
        ];
        if let Some((name, _)) = required.iter().find(|(_, loaded)| !loaded()) {
            return Err(WindowError::GlLoad(*name));
        }

        unsafe {
            gl::Enable(gl::MULTISAMPLE);
            gl::Enable(gl::DEPTH_TEST);
        }

        log::debug!("OpenGL function table loaded");
        Ok(Self {
            _context: PhantomData,
        })
    }

    pub fn set_clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }
}

fn stage_enum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
    }
}

fn read_info_log(
    capacity: usize,
    fetch: impl FnOnce(GLsizei, &mut GLsizei, *mut GLchar),
) -> String {
    let mut buf = vec![0u8; capacity];
    let mut written: GLsizei = 0;
    fetch(capacity as GLsizei, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.clamp(0, capacity as GLsizei) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

impl Gpu for GlGpu {
    fn create_shader(&self, stage: ShaderStage, source: &str) -> ShaderId {
        let src = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe {
            let id = gl::CreateShader(stage_enum(stage));
            gl::ShaderSource(id, 1, &src, &len);
            ShaderId(id)
        }
    }

    fn compile_shader(&self, shader: ShaderId) -> bool {
        let mut status: GLint = 0;
        unsafe {
            gl::CompileShader(shader.0);
            gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut status);
        }
        status != 0
    }

    fn shader_info_log(&self, shader: ShaderId, capacity: usize) -> String {
        read_info_log(capacity, |cap, written, buf| unsafe {
            gl::GetShaderInfoLog(shader.0, cap, written, buf)
        })
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader.0) }
    }

    fn create_program(&self) -> ProgramId {
        ProgramId(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::AttachShader(program.0, shader.0) }
    }

    fn link_program(&self, program: ProgramId) -> bool {
        let mut status: GLint = 0;
        unsafe {
            gl::LinkProgram(program.0);
            gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut status);
        }
        status != 0
    }

    fn program_info_log(&self, program: ProgramId, capacity: usize) -> String {
        read_info_log(capacity, |cap, written, buf| unsafe {
            gl::GetProgramInfoLog(program.0, cap, written, buf)
        })
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { gl::DeleteProgram(program.0) }
    }

    fn use_program(&self, program: ProgramId) {
        unsafe { gl::UseProgram(program.0) }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(program.0, name.as_ptr()) };
        (location >= 0).then_some(UniformLocation(location))
    }

    fn uniform_matrix4(&self, location: UniformLocation, columns: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location.0, 1, gl::FALSE, columns.as_ptr()) }
    }

    fn create_vertex_array(&self) -> VertexArrayId {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        VertexArrayId(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        unsafe { gl::BindVertexArray(vertex_array.map_or(0, |v| v.0)) }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array.0) }
    }

    fn create_buffer(&self, target: BufferTarget, data: &[u8]) -> BufferId {
        let mut id = 0;
        let target = target_enum(target);
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(target, id);
            gl::BufferData(
                target,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
        BufferId(id)
    }

    fn delete_buffer(&self, buffer: BufferId) {
        unsafe { gl::DeleteBuffers(1, &buffer.0) }
    }

    fn vertex_attribute(&self, slot: u32, components: u32) {
        let stride = (components as usize * std::mem::size_of::<f32>()) as GLsizei;
        unsafe {
            gl::VertexAttribPointer(
                slot,
                components as GLint,
                gl::FLOAT,
                gl::FALSE,
                stride,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(slot);
        }
    }

    fn draw_indexed_triangles(&self, count: u32) {
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                count as GLsizei,
                gl::UNSIGNED_INT,
                ptr::null(),
            )
        }
    }

    fn clear(&self, mask: ClearMask) {
        let mut bits = 0;
        if mask.color {
            bits |= gl::COLOR_BUFFER_BIT;
        }
        if mask.depth {
            bits |= gl::DEPTH_BUFFER_BIT;
        }
        unsafe { gl::Clear(bits) }
    }
}
