//! Rendering front end: cameras, shaders, pixel targets, and the
//! per-pixel render loop that ties a scene graph to an image.
//!
//! The split from `lumo-scene` mirrors the data flow: the scene crate
//! answers geometric queries (intersect, inside, normal, pigment), this
//! crate decides which rays to ask about and what color the answers
//! become.

#![warn(missing_docs)]

pub mod camera;
pub mod error;
pub mod pixel;
pub mod scene;
pub mod shader;

pub use camera::{Camera, PerspectiveCamera};
pub use error::{RenderError, Result};
pub use pixel::{Channel, PixelBuffer, PixelSink};
pub use scene::Scene;
pub use shader::{pov_shader, AmbientShader, CompositeShader, DiffuseShader, Shader};
