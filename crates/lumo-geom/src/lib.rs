#![warn(missing_docs)]

//! Rays and local-space primitive geometry for the lumo ray tracer.
//!
//! Primitives answer four queries, all in their own local frame where
//! the shape takes its canonical form (unit sphere at the origin, the
//! z = 0 plane):
//!
//! - intersection: nearest strictly positive ray parameter, or every
//!   boundary crossing for CSG use;
//! - surface normal at a point on the surface (unspecified off-surface);
//! - point containment, a total function over all of space;
//! - a surface uv parameterization for pattern pigments.
//!
//! World placement is the owning scene node's business: it maps the ray
//! into the local frame with its cached inverse matrix before asking, and
//! maps the normal back out with the inverse-transpose.

mod plane;
mod ray;
mod sphere;

pub use plane::Plane;
pub use ray::Ray;
pub use sphere::Sphere;

use lumo_math::{Point3, Vec3};

/// The closed set of primitive shapes, dispatched by match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveKind {
    /// Unit sphere at the local origin.
    Sphere(Sphere),
    /// The local z = 0 plane, inside below.
    Plane(Plane),
}

impl PrimitiveKind {
    /// Nearest strictly positive intersection of `ray` (already in local
    /// space) with the primitive surface. `None` carries no parameter:
    /// there is no t to read on a miss.
    pub fn intersect_local(&self, ray: &Ray) -> Option<f64> {
        match self {
            PrimitiveKind::Sphere(s) => s.intersect_local(ray),
            PrimitiveKind::Plane(p) => p.intersect_local(ray),
        }
    }

    /// Append every boundary crossing of `ray` with the surface to `out`.
    pub fn intersect_local_all(&self, ray: &Ray, out: &mut Vec<f64>) {
        match self {
            PrimitiveKind::Sphere(s) => s.intersect_local_all(ray, out),
            PrimitiveKind::Plane(p) => p.intersect_local_all(ray, out),
        }
    }

    /// Surface normal at a local-space surface point.
    pub fn normal_local(&self, point: &Point3) -> Vec3 {
        match self {
            PrimitiveKind::Sphere(s) => s.normal_local(point),
            PrimitiveKind::Plane(p) => p.normal_local(point),
        }
    }

    /// Whether a local-space point is inside the primitive. Total over
    /// all inputs.
    pub fn inside_local(&self, point: &Point3) -> bool {
        match self {
            PrimitiveKind::Sphere(s) => s.inside_local(point),
            PrimitiveKind::Plane(p) => p.inside_local(point),
        }
    }

    /// Surface parameterization of a local-space surface point, for
    /// pattern pigments.
    pub fn uv_local(&self, point: &Point3) -> (f64, f64) {
        match self {
            PrimitiveKind::Sphere(s) => s.uv_local(point),
            PrimitiveKind::Plane(p) => p.uv_local(point),
        }
    }
}
