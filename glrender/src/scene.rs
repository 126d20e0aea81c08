use crate::{
    camera::Camera,
    gpu::Gpu,
    input::{Key, KeyInput},
    model::Model,
    renderer,
    shader::ShaderProgram,
};
use glam::Vec3;
use std::rc::Rc;

/// Per-frame cube spin about (1, 0, 1).
pub const CUBE_SPIN: f32 = 0.005;
/// Extra cube spin about X while [`Key::Rotate`] is held.
pub const CUBE_BOOST: f32 = 0.005;
/// Per-frame probe drift along its local X.
pub const PROBE_DRIFT: f32 = 0.02;
/// Per-frame probe spin about its local Y.
pub const PROBE_SPIN: f32 = 0.003;
/// Per-frame camera step while a movement key is held.
pub const CAMERA_STEP: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Quit,
}

/// The demo scene: a spinning cube, a flat ground slab and a small probe that
/// drifts in a circle, all sharing one program, seen through a fly camera.
#[derive(Debug)]
pub struct Scene<G: Gpu> {
    pub cube: Model<G>,
    pub ground: Model<G>,
    pub probe: Model<G>,
    pub camera: Camera,
}

impl<G: Gpu> Scene<G> {
    pub fn new(program: Rc<ShaderProgram<G>>, camera: Camera) -> Self {
        let mut cube = Model::create(Rc::clone(&program));
        let mut ground = Model::create(Rc::clone(&program));
        let mut probe = Model::create(program);

        ground.scale(Vec3::new(7.0, 0.05, 7.0));
        probe.scale(Vec3::splat(0.5));
        ground.translate(Vec3::new(0.0, -2.0, 0.0));
        probe.translate(Vec3::new(0.0, 2.0, 7.0));
        cube.translate(Vec3::new(0.0, 2.0, 0.0));

        Self {
            cube,
            ground,
            probe,
            camera,
        }
    }

    /// Advances the animation one frame and applies the held keys.
    pub fn update<I: KeyInput + ?Sized>(&mut self, input: &I) -> FrameControl {
        self.cube.rotate(CUBE_SPIN, Vec3::new(1.0, 0.0, 1.0));
        self.probe.translate(Vec3::new(PROBE_DRIFT, 0.0, 0.0));
        self.probe.rotate(PROBE_SPIN, Vec3::Y);

        if input.is_key_down(Key::Rotate) {
            self.cube.rotate(CUBE_BOOST, Vec3::X);
        }

        // Opposing keys: the first one listed wins.
        if input.is_key_down(Key::Left) {
            self.camera.translate(Vec3::new(-CAMERA_STEP, 0.0, 0.0));
        } else if input.is_key_down(Key::Right) {
            self.camera.translate(Vec3::new(CAMERA_STEP, 0.0, 0.0));
        }
        if input.is_key_down(Key::Up) {
            self.camera.translate(Vec3::new(0.0, 0.0, -CAMERA_STEP));
        } else if input.is_key_down(Key::Down) {
            self.camera.translate(Vec3::new(0.0, 0.0, CAMERA_STEP));
        }
        if input.is_key_down(Key::LeftControl) {
            self.camera.translate(Vec3::new(0.0, CAMERA_STEP, 0.0));
        } else if input.is_key_down(Key::LeftShift) {
            self.camera.translate(Vec3::new(0.0, -CAMERA_STEP, 0.0));
        }

        if input.is_key_down(Key::Quit) {
            FrameControl::Quit
        } else {
            FrameControl::Continue
        }
    }

    pub fn render(&self) {
        for model in [&self.cube, &self.ground, &self.probe] {
            renderer::render(&self.camera, model);
        }
    }

    pub fn destroy(self) {
        self.cube.destroy();
        self.ground.destroy();
        self.probe.destroy();
    }
}
