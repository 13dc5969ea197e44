//! Ray representation.

use lumo_math::{transform_dir, transform_point, Mat4, Point3, Vec3};

/// A ray in 3D space, `r(t) = origin + t * direction`.
///
/// The direction is deliberately *not* normalized: the length of the
/// direction carries meaning for camera rays (zoom) and shadow rays (the
/// light sits at exactly `t = 1`).
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray, not necessarily unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Evaluate the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Map this ray by a homogeneous matrix: the origin participates in
    /// translation, the direction does not.
    #[inline]
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: transform_point(m, &self.origin),
            direction: transform_dir(m, &self.direction),
        }
    }

    /// Advance the origin along the direction by `fraction` of the
    /// direction length, leaving the direction unchanged. Used to lift
    /// shadow-ray origins off the surface they start on.
    #[inline]
    pub fn advanced(&self, fraction: f64) -> Ray {
        Ray {
            origin: self.origin + self.direction * fraction,
            direction: self.direction,
        }
    }
}
