use crate::gpu::{BufferId, BufferTarget, Gpu, VertexArrayId};
use std::rc::Rc;

/// Cube corners, four per face so every face carries its own attributes.
#[rustfmt::skip]
pub const CUBE_POSITIONS: [[f32; 3]; 24] = [
    // z = +0.5
    [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5],
    // z = -0.5
    [ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5],
    // x = -0.5
    [-0.5, -0.5,  0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [-0.5,  0.5,  0.5],
    // x = +0.5
    [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
    // y = -0.5
    [-0.5, -0.5,  0.5], [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5],
    // y = +0.5
    [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
];

/// Per-vertex colors: the positions again, except the last face, whose y is
/// 0.0 instead of 0.5. That face interpolates a flatter color than the rest.
/// The viewer has always rendered it this way; changing it changes the image.
#[rustfmt::skip]
pub const CUBE_COLORS: [[f32; 3]; 24] = [
    [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5],
    [ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5],
    [-0.5, -0.5,  0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [-0.5,  0.5,  0.5],
    [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
    [-0.5, -0.5,  0.5], [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5],
    [-0.5,  0.0,  0.5], [-0.5,  0.0, -0.5], [ 0.5,  0.0, -0.5], [ 0.5,  0.0,  0.5],
];

/// Two triangles per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,  0,  2,  3,
     4,  5,  6,  4,  6,  7,
     8,  9, 10,  8, 10, 11,
    12, 13, 14, 12, 14, 15,
    16, 17, 18, 16, 18, 19,
    20, 21, 22, 20, 22, 23,
];

/// One vertex buffer bound to an attribute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBuffer {
    pub buffer: BufferId,
    pub slot: u32,
}

/// Static geometry: vertex-array state, one buffer per attribute and an index
/// buffer, uploaded once. GPU objects are released on drop.
#[derive(Debug)]
pub struct Mesh<G: Gpu> {
    gpu: Rc<G>,
    vertex_array: VertexArrayId,
    vertex_buffers: Vec<VertexBuffer>,
    index_buffer: BufferId,
    /// Number of indices drawn.
    element_count: u32,
}

impl<G: Gpu> Mesh<G> {
    /// Uploads `attributes` (slot, 3-component data) and `indices`.
    pub fn new(gpu: &Rc<G>, attributes: &[(u32, &[[f32; 3]])], indices: &[u32]) -> Self {
        let vertex_array = gpu.create_vertex_array();
        gpu.bind_vertex_array(Some(vertex_array));

        let vertex_buffers = attributes
            .iter()
            .map(|&(slot, data)| {
                let buffer = gpu.create_buffer(BufferTarget::Array, bytemuck::cast_slice(data));
                gpu.vertex_attribute(slot, 3);
                VertexBuffer { buffer, slot }
            })
            .collect();

        let index_buffer =
            gpu.create_buffer(BufferTarget::ElementArray, bytemuck::cast_slice(indices));
        gpu.bind_vertex_array(None);

        Self {
            gpu: Rc::clone(gpu),
            vertex_array,
            vertex_buffers,
            index_buffer,
            element_count: indices.len() as u32,
        }
    }

    /// The fixed cube: positions at slot 0, colors at slot 1.
    pub fn cube(gpu: &Rc<G>) -> Self {
        let attributes: [(u32, &[[f32; 3]]); 2] = [(0, &CUBE_POSITIONS), (1, &CUBE_COLORS)];
        Self::new(gpu, &attributes, &CUBE_INDICES)
    }

    pub fn vertex_array(&self) -> VertexArrayId {
        self.vertex_array
    }

    pub fn vertex_buffers(&self) -> &[VertexBuffer] {
        &self.vertex_buffers
    }

    pub fn index_buffer(&self) -> BufferId {
        self.index_buffer
    }

    pub fn element_count(&self) -> u32 {
        self.element_count
    }
}

impl<G: Gpu> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gpu.delete_vertex_array(self.vertex_array);
        for vb in &self.vertex_buffers {
            self.gpu.delete_buffer(vb.buffer);
        }
        self.gpu.delete_buffer(self.index_buffer);
    }
}
