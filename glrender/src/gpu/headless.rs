//! A `Gpu` without a context.
//!
//! Calls are recorded in order, object lifetimes are tracked, and shader
//! compilation is simulated with a light syntax check that produces
//! driver-style diagnostics. Uniform locations are served from the `uniform`
//! declarations found in the attached sources at link time.

use super::{
    BufferId, BufferTarget, ClearMask, Gpu, ProgramId, ShaderId, ShaderStage, UniformLocation,
    VertexArrayId,
};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    CreateShader(ShaderId, ShaderStage),
    CompileShader(ShaderId),
    DeleteShader(ShaderId),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    DeleteProgram(ProgramId),
    UseProgram(ProgramId),
    UniformLocation(ProgramId, String),
    UniformMatrix4(UniformLocation, [f32; 16]),
    CreateVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    DeleteVertexArray(VertexArrayId),
    CreateBuffer(BufferId, BufferTarget, usize),
    DeleteBuffer(BufferId),
    VertexAttribute {
        slot: u32,
        components: u32,
        buffer: Option<BufferId>,
    },
    DrawIndexedTriangles(u32),
    Clear(ClearMask),
}

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct ProgramObject {
    shaders: Vec<ShaderId>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    last_id: u32,
    shaders: HashMap<ShaderId, ShaderObject>,
    programs: HashMap<ProgramId, ProgramObject>,
    buffers: HashMap<BufferId, Vec<u8>>,
    vertex_arrays: HashSet<VertexArrayId>,
    bound_array_buffer: Option<BufferId>,
    calls: Vec<GpuCall>,
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Default)]
pub struct HeadlessGpu {
    state: RefCell<State>,
}

impl HeadlessGpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GpuCall> {
        self.state.borrow().calls.clone()
    }

    /// Returns the recorded calls and starts a fresh record.
    pub fn take_calls(&self) -> Vec<GpuCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    pub fn buffer_data(&self, buffer: BufferId) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    /// How many times `program` was passed to `delete_program`.
    pub fn program_deletions(&self, program: ProgramId) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| **call == GpuCall::DeleteProgram(program))
            .count()
    }

    fn record(&self, call: GpuCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

fn truncate_log(log: &str, capacity: usize) -> String {
    // Room for the terminating NUL a driver would write.
    let limit = capacity.saturating_sub(1);
    if log.len() <= limit {
        return log.to_owned();
    }
    let mut end = limit;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log[..end].to_owned()
}

fn check_source(source: &str) -> Result<(), String> {
    let Some((first_line, first)) = source
        .lines()
        .enumerate()
        .find(|(_, line)| !line.trim().is_empty())
    else {
        return Err("0:0(0): error: no shader source\n".to_owned());
    };
    if !first.trim_start().starts_with("#version") {
        return Err(format!(
            "0:{}(1): error: #version directive required\n",
            first_line + 1
        ));
    }
    if !source.contains("main") {
        return Err("0:0(0): error: main function not defined\n".to_owned());
    }

    let mut open = Vec::new();
    for (number, line) in source.lines().enumerate() {
        for (column, c) in line.chars().enumerate() {
            let expected = match c {
                '{' | '(' => {
                    open.push(c);
                    continue;
                }
                '}' => '{',
                ')' => '(',
                _ => continue,
            };
            if open.pop() != Some(expected) {
                return Err(format!(
                    "0:{}({}): error: syntax error, unexpected '{}'\n",
                    number + 1,
                    column + 1,
                    c
                ));
            }
        }
    }
    if let Some(c) = open.last() {
        return Err(format!(
            "0:{}(1): error: syntax error, unexpected end of file, unclosed '{}'\n",
            source.lines().count(),
            c
        ));
    }
    Ok(())
}

fn uniform_names(source: &str) -> impl Iterator<Item = String> + '_ {
    source
        .lines()
        .filter_map(|line| line.trim().strip_prefix("uniform "))
        .filter_map(|decl| {
            let decl = decl.trim().trim_end_matches(';');
            // Skip the type, keep the declarators.
            decl.split_once(char::is_whitespace).map(|(_, names)| names)
        })
        .flat_map(|names| names.split(','))
        .map(|name| {
            let name = name.trim();
            name.split('[').next().unwrap_or(name).trim().to_owned()
        })
        .filter(|name| !name.is_empty())
}

impl Gpu for HeadlessGpu {
    fn create_shader(&self, stage: ShaderStage, source: &str) -> ShaderId {
        let mut state = self.state.borrow_mut();
        let id = ShaderId(state.next_id());
        state.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: source.to_owned(),
                compiled: false,
                log: String::new(),
            },
        );
        state.calls.push(GpuCall::CreateShader(id, stage));
        id
    }

    fn compile_shader(&self, shader: ShaderId) -> bool {
        self.record(GpuCall::CompileShader(shader));
        let mut state = self.state.borrow_mut();
        let Some(object) = state.shaders.get_mut(&shader) else {
            return false;
        };
        match check_source(&object.source) {
            Ok(()) => {
                object.compiled = true;
                object.log.clear();
            }
            Err(log) => {
                object.compiled = false;
                object.log = log;
            }
        }
        object.compiled
    }

    fn shader_info_log(&self, shader: ShaderId, capacity: usize) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|object| truncate_log(&object.log, capacity))
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&shader);
        state.calls.push(GpuCall::DeleteShader(shader));
    }

    fn create_program(&self) -> ProgramId {
        let mut state = self.state.borrow_mut();
        let id = ProgramId(state.next_id());
        state.programs.insert(id, ProgramObject::default());
        state.calls.push(GpuCall::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        if let Some(object) = state.programs.get_mut(&program) {
            object.shaders.push(shader);
        }
        state.calls.push(GpuCall::AttachShader(program, shader));
    }

    fn link_program(&self, program: ProgramId) -> bool {
        let mut state = self.state.borrow_mut();
        state.calls.push(GpuCall::LinkProgram(program));
        let state = &mut *state;
        let Some(object) = state.programs.get_mut(&program) else {
            return false;
        };

        let attached: Vec<&ShaderObject> = object
            .shaders
            .iter()
            .filter_map(|id| state.shaders.get(id))
            .collect();
        let has_stage = |stage: ShaderStage| attached.iter().any(|s| s.stage == stage);

        object.log = if !has_stage(ShaderStage::Vertex) {
            "error: program lacks a vertex shader\n".to_owned()
        } else if !has_stage(ShaderStage::Fragment) {
            "error: program lacks a fragment shader\n".to_owned()
        } else if attached.iter().any(|s| !s.compiled) {
            "error: linking with uncompiled shader\n".to_owned()
        } else {
            String::new()
        };
        object.linked = object.log.is_empty();
        object.uniforms = if object.linked {
            attached
                .iter()
                .flat_map(|s| uniform_names(&s.source))
                .fold(Vec::new(), |mut names, name| {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                    names
                })
        } else {
            Vec::new()
        };
        object.linked
    }

    fn program_info_log(&self, program: ProgramId, capacity: usize) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|object| truncate_log(&object.log, capacity))
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        state.calls.push(GpuCall::DeleteProgram(program));
    }

    fn use_program(&self, program: ProgramId) {
        self.record(GpuCall::UseProgram(program));
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.record(GpuCall::UniformLocation(program, name.to_owned()));
        let state = self.state.borrow();
        let object = state.programs.get(&program).filter(|p| p.linked)?;
        object
            .uniforms
            .iter()
            .position(|uniform| uniform == name)
            .map(|index| UniformLocation(index as i32))
    }

    fn uniform_matrix4(&self, location: UniformLocation, columns: &[f32; 16]) {
        self.record(GpuCall::UniformMatrix4(location, *columns));
    }

    fn create_vertex_array(&self) -> VertexArrayId {
        let mut state = self.state.borrow_mut();
        let id = VertexArrayId(state.next_id());
        state.vertex_arrays.insert(id);
        state.calls.push(GpuCall::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        self.record(GpuCall::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        let mut state = self.state.borrow_mut();
        state.vertex_arrays.remove(&vertex_array);
        state.calls.push(GpuCall::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self, target: BufferTarget, data: &[u8]) -> BufferId {
        let mut state = self.state.borrow_mut();
        let id = BufferId(state.next_id());
        state.buffers.insert(id, data.to_vec());
        if target == BufferTarget::Array {
            state.bound_array_buffer = Some(id);
        }
        state.calls.push(GpuCall::CreateBuffer(id, target, data.len()));
        id
    }

    fn delete_buffer(&self, buffer: BufferId) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        if state.bound_array_buffer == Some(buffer) {
            state.bound_array_buffer = None;
        }
        state.calls.push(GpuCall::DeleteBuffer(buffer));
    }

    fn vertex_attribute(&self, slot: u32, components: u32) {
        let mut state = self.state.borrow_mut();
        let buffer = state.bound_array_buffer;
        state.calls.push(GpuCall::VertexAttribute {
            slot,
            components,
            buffer,
        });
    }

    fn draw_indexed_triangles(&self, count: u32) {
        self.record(GpuCall::DrawIndexedTriangles(count));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(GpuCall::Clear(mask));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = "#version 330 core\nuniform mat4 modelMatrix;\nuniform mat4 viewMatrix, projectionMatrix;\nvoid main() {\n}\n";
    const FRAGMENT: &str = "#version 330 core\nout vec4 color;\nvoid main() {\n    color = vec4(1.0);\n}\n";

    fn linked(gpu: &HeadlessGpu) -> ProgramId {
        let vs = gpu.create_shader(ShaderStage::Vertex, VERTEX);
        let fs = gpu.create_shader(ShaderStage::Fragment, FRAGMENT);
        assert!(gpu.compile_shader(vs));
        assert!(gpu.compile_shader(fs));
        let program = gpu.create_program();
        gpu.attach_shader(program, vs);
        gpu.attach_shader(program, fs);
        assert!(gpu.link_program(program));
        program
    }

    #[test]
    fn unbalanced_brace_fails_with_located_diagnostic() {
        let gpu = HeadlessGpu::new();
        let shader = gpu.create_shader(ShaderStage::Vertex, "#version 330 core\nvoid main() {\n");
        assert!(!gpu.compile_shader(shader));
        let log = gpu.shader_info_log(shader, 512);
        assert!(log.contains("unexpected end of file"), "{log}");
    }

    #[test]
    fn missing_version_is_rejected() {
        let gpu = HeadlessGpu::new();
        let shader = gpu.create_shader(ShaderStage::Fragment, "void main() {}");
        assert!(!gpu.compile_shader(shader));
        assert!(gpu.shader_info_log(shader, 512).contains("#version"));
    }

    #[test]
    fn info_log_is_bounded_by_capacity() {
        let gpu = HeadlessGpu::new();
        let shader = gpu.create_shader(ShaderStage::Vertex, "");
        assert!(!gpu.compile_shader(shader));
        assert_eq!(gpu.shader_info_log(shader, 8).len(), 7);
    }

    #[test]
    fn uniforms_are_collected_at_link_time() {
        let gpu = HeadlessGpu::new();
        let program = linked(&gpu);
        assert_eq!(
            gpu.uniform_location(program, "modelMatrix"),
            Some(UniformLocation(0))
        );
        assert_eq!(
            gpu.uniform_location(program, "projectionMatrix"),
            Some(UniformLocation(2))
        );
        assert_eq!(gpu.uniform_location(program, "normalMatrix"), None);
    }

    #[test]
    fn link_without_fragment_stage_fails() {
        let gpu = HeadlessGpu::new();
        let vs = gpu.create_shader(ShaderStage::Vertex, VERTEX);
        assert!(gpu.compile_shader(vs));
        let program = gpu.create_program();
        gpu.attach_shader(program, vs);
        assert!(!gpu.link_program(program));
        assert!(gpu.program_info_log(program, 512).contains("fragment"));
    }

    #[test]
    fn attribute_setup_sees_last_array_buffer() {
        let gpu = HeadlessGpu::new();
        let buffer = gpu.create_buffer(BufferTarget::Array, &[0; 12]);
        gpu.create_buffer(BufferTarget::ElementArray, &[0; 4]);
        gpu.vertex_attribute(0, 3);
        assert_eq!(
            gpu.calls().last(),
            Some(&GpuCall::VertexAttribute {
                slot: 0,
                components: 3,
                buffer: Some(buffer),
            })
        );
    }
}
