//! Error types for scene construction and preparation.

use thiserror::Error;

/// Errors that can occur while building or preparing a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A transform chain combined into a matrix with no inverse. Zero
    /// scales are remapped before this can happen, so in practice this
    /// means a degenerate point-toward (parallel point and toward
    /// directions).
    #[error("transform chain combines into a singular matrix")]
    SingularTransform,

    /// A child was added to a primitive node.
    #[error("node is not a composite and cannot take children")]
    NotComposite,
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
