use crate::gpu::{Gpu, UniformLocation};
use glam::Mat4;
use glrender_macros::uniform_block;

/// A value that can be uploaded to a uniform of the currently used program.
pub trait UniformValue {
    fn upload<G: Gpu + ?Sized>(&self, gpu: &G, location: UniformLocation);
}

impl UniformValue for Mat4 {
    fn upload<G: Gpu + ?Sized>(&self, gpu: &G, location: UniformLocation) {
        // glam stores columns, which is what GL expects without transposing.
        gpu.uniform_matrix4(location, &self.to_cols_array());
    }
}

/// The three matrices every draw uploads, named as in the vertex shader.
#[uniform_block]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixUniforms {
    pub model_matrix: Mat4,
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{
        ProgramId,
        headless::{GpuCall, HeadlessGpu},
    };

    #[test]
    fn names_follow_shader_convention() {
        assert_eq!(
            MatrixUniforms::UNIFORM_NAMES,
            ["modelMatrix", "viewMatrix", "projectionMatrix"]
        );
    }

    #[test]
    fn missing_uniforms_are_skipped_on_upload() {
        let gpu = HeadlessGpu::new();
        let locations = MatrixUniformsLocations {
            model_matrix: Some(UniformLocation(3)),
            ..Default::default()
        };
        let uniforms = MatrixUniforms {
            model_matrix: Mat4::from_scale(glam::Vec3::splat(2.0)),
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        uniforms.upload(&gpu, &locations);
        assert_eq!(
            gpu.calls(),
            vec![GpuCall::UniformMatrix4(
                UniformLocation(3),
                uniforms.model_matrix.to_cols_array()
            )]
        );
    }

    #[test]
    fn unknown_program_locates_nothing() {
        let gpu = HeadlessGpu::new();
        let locations = MatrixUniforms::locate(&gpu, ProgramId(42));
        assert_eq!(locations, MatrixUniformsLocations::default());
        assert_eq!(gpu.calls().len(), 3);
    }
}
