use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, Vec2};

/// Index into the current batch's vertex buffer.
///
/// Uploaded as `wgpu::IndexFormat::Uint16`, which caps a batch at
/// [`MAX_BATCH_VERTICES`].
pub type VertexIndex = u16;

/// Number of vertices one batch can address.
pub const MAX_BATCH_VERTICES: usize = VertexIndex::MAX as usize + 1;

/// GPU vertex: position in target pixels plus a straight RGBA color.
///
/// Layout matches the program contract: `@location(0) position: vec2<f32>`,
/// `@location(1) color: vec4<f32>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4  // color
    ];

    #[inline]
    pub fn new(position: Vec2, color: ColorRgba) -> Self {
        Self {
            position: position.into(),
            color: color.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    #[inline]
    pub fn color(&self) -> ColorRgba {
        ColorRgba::from(self.color)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// A bare position becomes a white vertex.
impl From<Vec2> for Vertex {
    #[inline]
    fn from(position: Vec2) -> Self {
        Self::new(position, ColorRgba::WHITE)
    }
}

impl From<(Vec2, ColorRgba)> for Vertex {
    #[inline]
    fn from((position, color): (Vec2, ColorRgba)) -> Self {
        Self::new(position, color)
    }
}
