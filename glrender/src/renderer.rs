use crate::{camera::Camera, gpu::Gpu, model::Model, uniforms::MatrixUniforms};

/// Draws one model: looks up the matrix uniforms on its program, binds program
/// and vertex array, uploads model/view/projection and issues one indexed draw.
///
/// Nothing is cached between calls; every model re-binds and re-uploads all
/// three matrices.
pub fn render<G: Gpu>(camera: &Camera, model: &Model<G>) {
    let gpu = model.gpu();
    let program = model.program().id();
    let locations = MatrixUniforms::locate(gpu, program);

    gpu.use_program(program);
    gpu.bind_vertex_array(Some(model.mesh().vertex_array()));

    let uniforms = MatrixUniforms {
        model_matrix: model.matrix(),
        view_matrix: camera.view(),
        projection_matrix: camera.projection(),
    };
    uniforms.upload(gpu, &locations);

    gpu.draw_indexed_triangles(model.element_count());
    gpu.bind_vertex_array(None);
}
