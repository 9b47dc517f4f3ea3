use crate::coords::{Mat3, Vec2};
use crate::error::{GraphicsError, GraphicsResult};

use super::transform::{TransformScope, TransformState};
use super::vertex::{MAX_BATCH_VERTICES, Vertex, VertexIndex};

/// CPU vertex/index buffers for one batch plus the active insertion transform.
///
/// Buffers start empty, grow through shape calls, and are cleared wholesale by
/// [`reset_shape`](Self::reset_shape). The transform survives resets until it
/// is reset explicitly or a scoped block ends.
///
/// Not synchronized: one thread builds a batch at a time.
#[derive(Debug, Clone, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    indices: Vec<VertexIndex>,
    transform: TransformState,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty batch with reserved CPU storage.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices.min(MAX_BATCH_VERTICES)),
            indices: Vec::with_capacity(indices),
            transform: TransformState::IDENTITY,
        }
    }

    // ── buffers ───────────────────────────────────────────────────────────

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[VertexIndex] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertices that can still be added before the batch is full.
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        MAX_BATCH_VERTICES - self.vertices.len()
    }

    /// Empties both buffers. The transform is left untouched.
    pub fn reset_shape(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends a vertex and returns its index.
    ///
    /// When the transform is enabled the position is multiplied by the current
    /// matrix first. A bare `Vec2` is accepted and becomes a white vertex.
    ///
    /// Fails with [`GraphicsError::BatchFull`] once the batch holds
    /// [`MAX_BATCH_VERTICES`] vertices.
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> GraphicsResult<VertexIndex> {
        let mut vertex = vertex.into();
        let index = self.vertices.len();
        if index >= MAX_BATCH_VERTICES {
            log::warn!("shape batch full at {index} vertices");
            return Err(GraphicsError::BatchFull {
                requested: 1,
                available: 0,
            });
        }

        if self.transform.enabled {
            vertex.position = self
                .transform
                .matrix
                .transform_point(vertex.position())
                .into();
        }

        self.vertices.push(vertex);
        Ok(index as VertexIndex)
    }

    /// Appends a raw index.
    ///
    /// Not validated: the index must refer to a vertex that is in the buffer
    /// when the batch is drawn.
    #[inline]
    pub fn add_index(&mut self, index: VertexIndex) {
        self.indices.push(index);
    }

    /// Appends raw indices. Same contract as [`add_index`](Self::add_index).
    #[inline]
    pub fn add_indices(&mut self, indices: &[VertexIndex]) {
        self.indices.extend_from_slice(indices);
    }

    /// Runs `build` and rolls both buffers back if it fails, so a shape is
    /// either added whole or not at all.
    ///
    /// A [`GraphicsError::BatchFull`] from `build` is reported for the whole
    /// shape: `requested` is its vertex count and `available` what the batch
    /// had left before it started.
    pub(crate) fn atomic<F>(&mut self, build: F) -> GraphicsResult<()>
    where
        F: Fn(&mut Self) -> GraphicsResult<()>,
    {
        let vertex_len = self.vertices.len();
        let index_len = self.indices.len();
        let Err(err) = build(self) else {
            return Ok(());
        };

        self.vertices.truncate(vertex_len);
        self.indices.truncate(index_len);
        Err(match err {
            GraphicsError::BatchFull { .. } => GraphicsError::BatchFull {
                requested: measure(&build),
                available: MAX_BATCH_VERTICES - vertex_len,
            },
            other => other,
        })
    }

    // ── transform ─────────────────────────────────────────────────────────

    /// Post-multiplies the matrix by a translation and enables the transform.
    pub fn translate(&mut self, offset: Vec2) {
        self.transform.matrix = self.transform.matrix * Mat3::translation(offset);
        self.transform.enabled = true;
    }

    /// Post-multiplies the matrix by a scale and enables the transform.
    pub fn scale(&mut self, factor: Vec2) {
        self.transform.matrix = self.transform.matrix * Mat3::scale(factor);
        self.transform.enabled = true;
    }

    /// Replaces the matrix with a rotation of `angle` radians about the origin
    /// and enables the transform.
    ///
    /// Unlike `translate`/`scale` this does not compose with earlier calls;
    /// any prior translation or scale is discarded. Call `rotate` first and
    /// then `translate`/`scale` to combine them.
    pub fn rotate(&mut self, angle: f32) {
        self.transform.matrix = Mat3::rotation(angle);
        self.transform.enabled = true;
    }

    /// Disables the transform and resets the matrix to identity.
    pub fn reset_transform(&mut self) {
        self.transform = TransformState::IDENTITY;
    }

    #[inline]
    pub fn is_transform_enabled(&self) -> bool {
        self.transform.enabled
    }

    #[inline]
    pub fn transform_matrix(&self) -> Mat3 {
        self.transform.matrix
    }

    #[inline]
    pub fn transform_state(&self) -> TransformState {
        self.transform
    }

    #[inline]
    pub(super) fn set_transform_state(&mut self, state: TransformState) {
        self.transform = state;
    }

    /// Opens a transform scope; the current transform is restored when the
    /// returned guard drops.
    pub fn transform_scope(&mut self) -> TransformScope<'_> {
        TransformScope::new(self)
    }

    /// Runs `body` inside a transform scope.
    ///
    /// Transform changes made by `body` do not outlive the call, whether it
    /// returns normally, returns an error, or panics.
    pub fn transform<R>(&mut self, body: impl FnOnce(&mut ShapeBatch) -> R) -> R {
        let mut scope = self.transform_scope();
        body(&mut scope)
    }
}

/// Vertex count of the shape `build` adds to an empty batch.
///
/// A shape that cannot fit even an empty batch reports one vertex past the
/// limit.
fn measure<F>(build: &F) -> usize
where
    F: Fn(&mut ShapeBatch) -> GraphicsResult<()>,
{
    let mut scratch = ShapeBatch::new();
    match build(&mut scratch) {
        Ok(()) => scratch.vertex_count(),
        Err(_) => MAX_BATCH_VERTICES + 1,
    }
}
