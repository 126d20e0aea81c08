use glam::{Mat4, Vec3};
use glrender::{
    Camera, Model, ShaderProgram,
    gpu::{ProgramId, UniformLocation, headless::{GpuCall, HeadlessGpu}},
};
use std::rc::Rc;

const VERTEX: &str = include_str!("../shaders/Vertex.glsl");
const FRAGMENT: &str = include_str!("../shaders/Fragment.glsl");

fn setup() -> (Rc<HeadlessGpu>, Rc<ShaderProgram<HeadlessGpu>>) {
    let gpu = Rc::new(HeadlessGpu::new());
    let program = ShaderProgram::link(&gpu, VERTEX, FRAGMENT).unwrap();
    (gpu, Rc::new(program))
}

fn uniform_lookups(program: ProgramId) -> Vec<GpuCall> {
    ["modelMatrix", "viewMatrix", "projectionMatrix"]
        .into_iter()
        .map(|name| GpuCall::UniformLocation(program, name.to_owned()))
        .collect()
}

#[test]
fn bundled_shaders_link() {
    let (gpu, program) = setup();
    assert_eq!(gpu.live_programs(), 1);
    assert_eq!(gpu.live_shaders(), 0);
    for (index, name) in ["modelMatrix", "viewMatrix", "projectionMatrix"]
        .into_iter()
        .enumerate()
    {
        assert_eq!(
            glrender::Gpu::uniform_location(&*gpu, program.id(), name),
            Some(UniformLocation(index as i32))
        );
    }
}

#[test]
fn render_issues_one_indexed_draw_with_three_matrices() {
    let (gpu, program) = setup();
    let mut model = Model::create(Rc::clone(&program));
    model.translate(Vec3::new(0.0, 2.0, 0.0));
    let camera = Camera::default();
    gpu.take_calls();

    glrender::renderer::render(&camera, &model);

    let mut expected = uniform_lookups(program.id());
    expected.extend([
        GpuCall::UseProgram(program.id()),
        GpuCall::BindVertexArray(Some(model.mesh().vertex_array())),
        GpuCall::UniformMatrix4(UniformLocation(0), model.matrix().to_cols_array()),
        GpuCall::UniformMatrix4(UniformLocation(1), camera.view().to_cols_array()),
        GpuCall::UniformMatrix4(UniformLocation(2), camera.projection().to_cols_array()),
        GpuCall::DrawIndexedTriangles(36),
        GpuCall::BindVertexArray(None),
    ]);
    assert_eq!(gpu.take_calls(), expected);
}

#[test]
fn missing_uniforms_are_skipped() {
    let gpu = Rc::new(HeadlessGpu::new());
    let vertex = "#version 330 core\nlayout(location = 0) in vec3 position;\nuniform mat4 modelMatrix;\nvoid main() {\n    gl_Position = modelMatrix * vec4(position, 1.0);\n}\n";
    let program = Rc::new(ShaderProgram::link(&gpu, vertex, FRAGMENT).unwrap());
    let model = Model::create(program);
    gpu.take_calls();

    glrender::renderer::render(&Camera::default(), &model);

    let uploads: Vec<_> = gpu
        .take_calls()
        .into_iter()
        .filter(|call| matches!(call, GpuCall::UniformMatrix4(..)))
        .collect();
    assert_eq!(
        uploads,
        [GpuCall::UniformMatrix4(UniformLocation(0), Mat4::IDENTITY.to_cols_array())]
    );
}

#[test]
fn repeated_renders_reupload_everything() {
    let (gpu, program) = setup();
    let model = Model::create(program);
    let camera = Camera::default();
    gpu.take_calls();

    glrender::renderer::render(&camera, &model);
    let first = gpu.take_calls();
    glrender::renderer::render(&camera, &model);
    assert_eq!(gpu.take_calls(), first);
}
