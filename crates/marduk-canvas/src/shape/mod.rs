//! CPU-side shape building.
//!
//! A [`ShapeBatch`] holds one frame's (or one batch's) geometry: a vertex
//! buffer, a 16-bit index buffer and the transform applied to vertices as they
//! are appended. The tessellators in this module expand shape descriptions into
//! that geometry; nothing here touches the GPU.
//!
//! Per frame: `reset_shape` → shape calls (optionally inside `transform`
//! blocks) → `Graphics::draw`.

mod arc;
mod batch;
mod line;
mod primitives;
mod style;
mod transform;
mod vertex;

pub use arc::{DEFAULT_ARC_POINTS, DEFAULT_ELLIPSE_POINTS};
pub use batch::ShapeBatch;
pub use style::{ArcMode, ArcStyle, LineCap, LineJoin, LineStyle, PolylineStyle};
pub use transform::{TransformScope, TransformState};
pub use vertex::{MAX_BATCH_VERTICES, Vertex, VertexIndex};
