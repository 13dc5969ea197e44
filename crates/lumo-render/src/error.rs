//! Error types for rendering.

use lumo_scene::SceneError;
use thiserror::Error;

/// Errors that can occur while rendering a scene.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No camera was set on the scene.
    #[error("scene has no camera")]
    MissingCamera,

    /// No shader was set on the scene.
    #[error("scene has no shader")]
    MissingShader,

    /// The pixel sink has zero width or height.
    #[error("render target is {0}x{1}")]
    EmptyTarget(u32, u32),

    /// Scene preparation failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
