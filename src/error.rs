//! Error types for scene construction and rendering.

use thiserror::Error;

/// Errors that can occur while building a scene or rendering it.
///
/// A ray that misses everything is not an error; primitives report that as
/// `None`.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A zero-length vector was normalized.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// A primitive was described with out-of-range parameters.
    #[error("invalid primitive: {0}")]
    InvalidPrimitive(String),

    /// The camera was described with out-of-range parameters.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    /// The shading law was described with out-of-range parameters.
    #[error("invalid shading: {0}")]
    InvalidShading(String),

    /// A parallel render was cancelled before every row was written.
    #[error("render cancelled")]
    Cancelled,

    #[error("could not build the render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene description: {0}")]
    Scene(#[from] serde_json::Error),
}

/// Result type for scene and render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
