//! Thin capability boundary over the graphics API.
//!
//! `Gpu` lists exactly the calls the viewer issues. `opengl::GlGpu` forwards them to
//! OpenGL; `headless::HeadlessGpu` (tests and the `headless` feature) records
//! them so the shader builder, models and render protocol can be tested
//! without a context.

#[cfg(any(test, feature = "headless"))]
pub mod headless;
pub mod opengl;

use std::fmt;

/// Capacity of the buffer used to fetch shader and program info logs.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgramId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexArrayId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Index data; binding is recorded in the current vertex array.
    ElementArray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearMask {
    pub color: bool,
    pub depth: bool,
}

impl ClearMask {
    pub const COLOR: Self = Self {
        color: true,
        depth: false,
    };

    pub const COLOR_DEPTH: Self = Self {
        color: true,
        depth: true,
    };
}

pub trait Gpu {
    /// Creates a shader object for `stage` and attaches `source` to it.
    fn create_shader(&self, stage: ShaderStage, source: &str) -> ShaderId;
    /// Compiles the shader, returning the compile status.
    fn compile_shader(&self, shader: ShaderId) -> bool;
    /// Fetches at most `capacity - 1` bytes of the shader info log.
    fn shader_info_log(&self, shader: ShaderId, capacity: usize) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> ProgramId;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    /// Links the program, returning the link status.
    fn link_program(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId, capacity: usize) -> String;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: ProgramId);

    /// `None` when the program has no active uniform called `name`.
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    /// Uploads a column-major 4x4 matrix to the currently used program.
    fn uniform_matrix4(&self, location: UniformLocation, columns: &[f32; 16]);

    fn create_vertex_array(&self) -> VertexArrayId;
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>);
    fn delete_vertex_array(&self, vertex_array: VertexArrayId);

    /// Creates a buffer, binds it to `target` and uploads `data` once as
    /// static draw data. The buffer stays bound.
    fn create_buffer(&self, target: BufferTarget, data: &[u8]) -> BufferId;
    fn delete_buffer(&self, buffer: BufferId);

    /// Points attribute `slot` at the currently bound array buffer as tightly
    /// packed `components` x f32 and enables it.
    fn vertex_attribute(&self, slot: u32, components: u32);

    /// Draws `count` `u32` indices from the bound element buffer as triangles.
    fn draw_indexed_triangles(&self, count: u32);

    fn clear(&self, mask: ClearMask);
}
