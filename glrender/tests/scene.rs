use glam::{Mat4, Vec3};
use glrender::{
    Camera, FrameControl, Key, Scene, ShaderProgram,
    gpu::headless::{GpuCall, HeadlessGpu},
    scene::{CAMERA_STEP, CUBE_BOOST, CUBE_SPIN, PROBE_DRIFT, PROBE_SPIN},
};
use std::rc::Rc;

const VERTEX: &str = include_str!("../shaders/Vertex.glsl");
const FRAGMENT: &str = include_str!("../shaders/Fragment.glsl");

fn scene() -> (Rc<HeadlessGpu>, Scene<HeadlessGpu>) {
    let gpu = Rc::new(HeadlessGpu::new());
    let program = Rc::new(ShaderProgram::link(&gpu, VERTEX, FRAGMENT).unwrap());
    (gpu, Scene::new(program, Camera::default()))
}

fn rotation(angle: f32, axis: Vec3) -> Mat4 {
    Mat4::from_axis_angle(axis.normalize(), angle)
}

fn assert_close(actual: Mat4, expected: Mat4) {
    assert!(
        actual.abs_diff_eq(expected, 1e-5),
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn initial_placement() {
    let (_gpu, scene) = scene();
    assert_close(
        scene.cube.matrix(),
        Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)),
    );
    assert_close(
        scene.ground.matrix(),
        Mat4::from_scale(Vec3::new(7.0, 0.05, 7.0))
            * Mat4::from_translation(Vec3::new(0.0, -2.0, 0.0)),
    );
    assert_close(
        scene.probe.matrix(),
        Mat4::from_scale(Vec3::splat(0.5)) * Mat4::from_translation(Vec3::new(0.0, 2.0, 7.0)),
    );
}

#[test]
fn idle_frame_animates_cube_and_probe_only() {
    let (_gpu, mut scene) = scene();
    let cube = scene.cube.matrix();
    let ground = scene.ground.matrix();
    let probe = scene.probe.matrix();
    let view = scene.camera.view();

    let held: [Key; 0] = [];
    assert_eq!(scene.update(&held[..]), FrameControl::Continue);

    assert_close(
        scene.cube.matrix(),
        cube * rotation(CUBE_SPIN, Vec3::new(1.0, 0.0, 1.0)),
    );
    assert_close(
        scene.probe.matrix(),
        probe
            * Mat4::from_translation(Vec3::new(PROBE_DRIFT, 0.0, 0.0))
            * rotation(PROBE_SPIN, Vec3::Y),
    );
    assert_eq!(scene.ground.matrix(), ground);
    assert_eq!(scene.camera.view(), view);
}

#[test]
fn rotate_key_adds_spin_about_x() {
    let (_gpu, mut scene) = scene();
    let cube = scene.cube.matrix();
    scene.update(&[Key::Rotate][..]);
    assert_close(
        scene.cube.matrix(),
        cube * rotation(CUBE_SPIN, Vec3::new(1.0, 0.0, 1.0)) * rotation(CUBE_BOOST, Vec3::X),
    );
}

#[test]
fn opposing_keys_favor_the_first() {
    let (_gpu, mut scene) = scene();
    let view = scene.camera.view();
    let held = [
        Key::Right,
        Key::Left,
        Key::Down,
        Key::Up,
        Key::LeftShift,
        Key::LeftControl,
    ];
    scene.update(&held[..]);
    let expected = view
        * Mat4::from_translation(Vec3::new(-CAMERA_STEP, 0.0, 0.0))
        * Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_STEP))
        * Mat4::from_translation(Vec3::new(0.0, CAMERA_STEP, 0.0));
    assert_close(scene.camera.view(), expected);
}

#[test]
fn single_keys_move_the_camera() {
    let cases = [
        (Key::Right, Vec3::new(CAMERA_STEP, 0.0, 0.0)),
        (Key::Down, Vec3::new(0.0, 0.0, CAMERA_STEP)),
        (Key::LeftShift, Vec3::new(0.0, -CAMERA_STEP, 0.0)),
    ];
    for (key, step) in cases {
        let (_gpu, mut scene) = scene();
        let view = scene.camera.view();
        scene.update(&[key][..]);
        assert_close(scene.camera.view(), view * Mat4::from_translation(step));
    }
}

#[test]
fn escape_quits() {
    let (_gpu, mut scene) = scene();
    assert_eq!(scene.update(&[Key::Quit][..]), FrameControl::Quit);
}

#[test]
fn render_draws_cube_ground_probe_in_order() {
    let (gpu, scene) = scene();
    gpu.take_calls();
    scene.render();

    let calls = gpu.take_calls();
    let bound: Vec<_> = calls
        .iter()
        .filter_map(|call| match call {
            GpuCall::BindVertexArray(Some(vertex_array)) => Some(*vertex_array),
            _ => None,
        })
        .collect();
    assert_eq!(
        bound,
        [
            scene.cube.mesh().vertex_array(),
            scene.ground.mesh().vertex_array(),
            scene.probe.mesh().vertex_array(),
        ]
    );
    let draws = calls
        .iter()
        .filter(|call| **call == GpuCall::DrawIndexedTriangles(36))
        .count();
    assert_eq!(draws, 3);
    assert_eq!(
        calls
            .iter()
            .filter(|call| matches!(call, GpuCall::UniformMatrix4(..)))
            .count(),
        9
    );
}

#[test]
fn destroy_releases_everything_once() {
    let (gpu, scene) = scene();
    let program = scene.cube.program().id();
    scene.destroy();
    assert_eq!(gpu.program_deletions(program), 1);
    assert_eq!(gpu.live_programs(), 0);
    assert_eq!(gpu.live_buffers(), 0);
    assert_eq!(gpu.live_vertex_arrays(), 0);
}
