#![warn(missing_docs)]

//! Scene model for the lumo ray tracer.
//!
//! Everything between raw geometry and the render loop lives here:
//!
//! - [`TransformChain`] / [`TransformHandle`] — ordered affine chains of
//!   shared, mutable operations, cached into world/local/normal matrices
//!   by `prepare_render`;
//! - [`Pigment`] — placeable intrinsic-color fields;
//! - [`SceneGraph`] — an arena of primitive leaves and CSG composites
//!   (union, intersection; difference via inside-out primitives) with
//!   pigment inheritance along parent links;
//! - [`Light`] — point lights with biased, distance-bounded shadow rays.
//!
//! The lifecycle is: mutate freely, call `prepare_render`, then query.
//! Every query path is `&self` once prepared; skipping `prepare_render`
//! yields stale matrices, never a crash.

mod color;
mod error;
mod graph;
mod light;
mod pigment;
mod transform;

pub use color::{object_color, rgb, ObjectColor, RayColor};
pub use error::{Result, SceneError};
pub use graph::{CsgOp, Hit, NodeId, NodeKind, SceneGraph};
pub use light::{Light, SHADOW_BIAS};
pub use pigment::{ColorField, Pigment, SharedPigment};
pub use transform::{TransformChain, TransformHandle};
