use crate::{gpu::Gpu, mesh::Mesh, shader::ShaderProgram, transform::Transform};
use glam::{Mat4, Vec3};
use std::rc::Rc;

/// A cube mesh with its own accumulated model transform.
///
/// The program is shared with other models; dropping a model releases only its
/// mesh and its reference to the program.
#[derive(Debug)]
pub struct Model<G: Gpu> {
    mesh: Mesh<G>,
    program: Rc<ShaderProgram<G>>,
    transform: Transform,
}

impl<G: Gpu> Model<G> {
    pub fn create(program: Rc<ShaderProgram<G>>) -> Self {
        let mesh = Mesh::cube(program.gpu());
        log::debug!(
            "created model with {} elements on program {}",
            mesh.element_count(),
            program.id().0
        );
        Self {
            mesh,
            program,
            transform: Transform::default(),
        }
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.transform.translate(translation);
    }

    /// `angle` in radians; `axis` does not need to be normalized.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.transform.rotate(angle, axis);
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.transform.scale(scale);
    }

    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    pub fn mesh(&self) -> &Mesh<G> {
        &self.mesh
    }

    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    pub fn element_count(&self) -> u32 {
        self.mesh.element_count()
    }

    pub fn gpu(&self) -> &G {
        self.program.gpu()
    }

    /// Releases the mesh. The program goes with the last model holding it.
    pub fn destroy(self) {
        log::debug!("destroying model on program {}", self.program.id().0);
    }
}
