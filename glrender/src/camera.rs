use crate::transform::Transform;
use glam::{Mat4, Vec3};

/// How the projection aspect ratio is derived from the viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectMode {
    /// Integer division, truncated before use: 800x600 gives 1.0, which
    /// squashes the picture horizontally. Kept as the default so the viewer
    /// renders the way it always has. Never below 1, so portrait viewports
    /// also get 1.0.
    Truncated,
    /// Floating-point division.
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraConfig {
    pub fn for_viewport(width: u32, height: u32, mode: AspectMode) -> Self {
        let aspect = match mode {
            AspectMode::Truncated => (width / height.max(1)).max(1) as f32,
            AspectMode::Exact => width as f32 / height.max(1) as f32,
        };
        Self {
            eye: Vec3::new(0.0, 2.0, -10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45.0,
            aspect,
            near: 0.01,
            far: 10000.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::for_viewport(800, 600, AspectMode::Truncated)
    }
}

/// Fixed-orientation fly camera.
///
/// The view matrix starts as a look-at and is then only ever translated, again
/// by post-multiplication, so motion happens along the camera's own axes.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    view: Transform,
    projection: Mat4,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let view = Mat4::look_at_rh(config.eye, config.target, config.up);
        // OpenGL clip space: depth in -1..1.
        let projection = Mat4::perspective_rh_gl(
            config.fov_y.to_radians(),
            config.aspect,
            config.near,
            config.far,
        );
        Self {
            view: Transform::new(view),
            projection,
        }
    }

    pub fn view(&self) -> Mat4 {
        self.view.matrix()
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.view.translate(translation);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}
