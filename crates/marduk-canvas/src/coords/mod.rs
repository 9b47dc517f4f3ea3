//! Coordinate and geometry types shared by the tessellators and the renderer.
//!
//! Canonical CPU space:
//! - pixels of the render target
//! - origin top-left
//! - +X right, +Y down
//!
//! The default shader converts to clip space with an orthographic projection
//! uniform (see `render::Uniforms`).

mod color;
mod mat3;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use mat3::Mat3;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
