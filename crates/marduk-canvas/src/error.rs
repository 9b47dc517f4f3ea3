//! Error types for the canvas crate.

use thiserror::Error;

/// Errors reported by shape building and context setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// The current batch cannot address more vertices with 16-bit indices.
    ///
    /// The shape that hit the limit was not added. `requested` is its vertex
    /// count and `available` the room the batch had left. Draw the batch,
    /// call `reset_shape`, and submit the rest in a new batch.
    #[error("shape batch is full: {requested} vertices requested, {available} available")]
    BatchFull { requested: usize, available: usize },

    /// The shader module failed to compile.
    #[error("shader `{label}` failed to compile: {message}")]
    ShaderCompile { label: String, message: String },
}

/// Result type for canvas operations.
pub type GraphicsResult<T> = Result<T, GraphicsError>;
