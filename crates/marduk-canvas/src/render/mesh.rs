use std::borrow::Cow;

use crate::shape::{Vertex, VertexIndex};

/// Smallest GPU buffer capacity, in elements.
const MIN_CAPACITY: usize = 64;

/// GPU copy of one shape batch: a vertex buffer and a `Uint16` index buffer.
///
/// Each upload replaces the whole previous contents. Buffers only grow,
/// to the next power of two of the requested element count.
pub struct Mesh {
    label: String,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    vertex_count: u32,

    index_ibo: Option<wgpu::Buffer>,
    index_capacity: usize,
    index_count: u32,
}

impl Mesh {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            vertex_vbo: None,
            vertex_capacity: 0,
            vertex_count: 0,
            index_ibo: None,
            index_capacity: 0,
            index_count: 0,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn upload_vertices(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        self.vertex_count = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }

        if vertices.len() > self.vertex_capacity || self.vertex_vbo.is_none() {
            let capacity = grown_capacity(vertices.len());
            log::trace!("mesh `{}`: vertex buffer grows to {capacity}", self.label);
            self.vertex_vbo = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label.as_str()),
                size: (capacity * std::mem::size_of::<Vertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = capacity;
        }

        let Some(vbo) = self.vertex_vbo.as_ref() else { return };
        queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
    }

    pub fn upload_indices(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        indices: &[VertexIndex],
    ) {
        self.index_count = indices.len() as u32;
        if indices.is_empty() {
            return;
        }

        if indices.len() > self.index_capacity || self.index_ibo.is_none() {
            let capacity = grown_capacity(indices.len());
            log::trace!("mesh `{}`: index buffer grows to {capacity}", self.label);
            self.index_ibo = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label.as_str()),
                size: (capacity * std::mem::size_of::<VertexIndex>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = capacity;
        }

        let Some(ibo) = self.index_ibo.as_ref() else { return };
        queue.write_buffer(ibo, 0, &padded_index_bytes(indices));
    }

    /// Binds both buffers on `pass` and returns the index count to draw,
    /// or `None` when there is nothing uploaded.
    pub(crate) fn bind(&self, pass: &mut wgpu::RenderPass<'_>) -> Option<u32> {
        if self.index_count == 0 || self.vertex_count == 0 {
            return None;
        }
        let vbo = self.vertex_vbo.as_ref()?;
        let ibo = self.index_ibo.as_ref()?;
        pass.set_vertex_buffer(0, vbo.slice(..));
        pass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        Some(self.index_count)
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(MIN_CAPACITY)
}

/// Index bytes padded to `wgpu::COPY_BUFFER_ALIGNMENT`.
///
/// An odd count of 16-bit indices gets one zero index appended; the draw
/// still uses the unpadded count.
fn padded_index_bytes(indices: &[VertexIndex]) -> Cow<'_, [u8]> {
    let bytes: &[u8] = bytemuck::cast_slice(indices);
    let align = wgpu::COPY_BUFFER_ALIGNMENT as usize;
    if bytes.len() % align == 0 {
        return Cow::Borrowed(bytes);
    }
    let mut padded = bytes.to_vec();
    padded.resize(bytes.len().next_multiple_of(align), 0);
    Cow::Owned(padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_has_a_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
    }

    #[test]
    fn capacity_rounds_up_to_power_of_two() {
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }

    #[test]
    fn even_index_count_is_not_copied() {
        let indices = [0u16, 1, 2, 2, 3, 0];
        assert!(matches!(padded_index_bytes(&indices), Cow::Borrowed(b) if b.len() == 12));
    }

    #[test]
    fn odd_index_count_is_padded() {
        let indices = [0u16, 1, 2];
        let bytes = padded_index_bytes(&indices);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[6..], &[0, 0]);
    }

    #[test]
    fn new_mesh_has_nothing_to_draw() {
        let mesh = Mesh::new("test");
        assert_eq!(mesh.index_count(), 0);
        assert_eq!(mesh.vertex_count(), 0);
    }
}
