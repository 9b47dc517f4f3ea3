//! GPU draw submission.
//!
//! A [`Graphics`] context uploads its shape batch into a [`Mesh`] and draws
//! it through a [`Program`] on a borrowed [`Target`]. Programs, uniforms and
//! draw parameters default to the context's own values; any of them can be
//! overridden per draw with [`DrawOptions`].
//!
//! Convention:
//! - CPU geometry is in target pixels (top-left origin, +Y down).
//! - The vertex shader projects with the `Uniforms::projection` matrix.

mod graphics;
mod mesh;
mod params;
mod program;
mod target;
mod uniforms;

pub use graphics::{DrawOptions, Graphics, GraphicsConfig};
pub use mesh::Mesh;
pub use params::DrawParams;
pub use program::{DEFAULT_SHADER, Program};
pub use target::{RenderTarget, Target};
pub use uniforms::Uniforms;

/// Device on wgpu's noop backend: validates like a real one, renders nothing.
#[cfg(test)]
pub(crate) fn test_device() -> (wgpu::Device, wgpu::Queue) {
    wgpu::Device::noop(&wgpu::DeviceDescriptor::default())
}
