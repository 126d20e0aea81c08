use glam::{Mat4, Vec3};

/// A 4x4 matrix that accumulates elementary transforms.
///
/// Every mutator post-multiplies the current matrix (`matrix = matrix * T`), so
/// calls compose in call order and repeated per-frame calls keep accumulating.
/// There is no decomposed position/orientation/scale to reset to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.matrix *= Mat4::from_translation(translation);
    }

    /// Rotates by `angle` radians about `axis`. The axis is normalized here;
    /// a zero-length axis leaves the matrix untouched.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        let Some(axis) = axis.try_normalize() else {
            log::trace!("ignoring rotation about a zero-length axis");
            return;
        };
        self.matrix *= Mat4::from_axis_angle(axis, angle);
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.matrix *= Mat4::from_scale(scale);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }
}
