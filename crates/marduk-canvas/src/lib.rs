//! Marduk canvas crate.
//!
//! Immediate-mode 2D shape rendering: build triangles, quads, arcs and thick
//! lines into a 16-bit indexed batch each frame, then upload and draw the
//! batch with one `wgpu` draw call.
//!
//! Window and device creation live with the caller; this crate borrows a
//! device, queue and texture view per draw through [`render::Target`].

pub mod coords;
pub mod error;
pub mod logging;
pub mod render;
pub mod shape;

pub use coords::{ColorRgba, Mat3, Rect, Vec2, Viewport};
pub use error::{GraphicsError, GraphicsResult};
pub use render::{DrawOptions, DrawParams, Graphics, GraphicsConfig, Program, RenderTarget, Target, Uniforms};
pub use shape::{
    ArcMode, ArcStyle, LineCap, LineJoin, LineStyle, PolylineStyle, ShapeBatch, Vertex, VertexIndex,
};
