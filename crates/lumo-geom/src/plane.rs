//! The z = 0 plane.

use crate::Ray;
use lumo_math::{Point3, Vec3};

/// The plane z = 0 in local space. Renders as an infinite flat surface
/// and combines in CSG as a half-space: everything below the plane
/// (z < 0) counts as inside.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane;

impl Plane {
    /// Ray intersection with z = 0.
    ///
    /// From `r0.z + v.z t = 0`, `t = -r0.z / v.z`, rejected unless
    /// strictly positive. A ray parallel to the plane (`v.z == 0`) only
    /// hits if it starts in the plane, reported at `t = 0`.
    pub fn intersect_local(&self, ray: &Ray) -> Option<f64> {
        if ray.direction.z == 0.0 {
            return (ray.origin.z == 0.0).then_some(0.0);
        }
        let t = -ray.origin.z / ray.direction.z;
        (t > 0.0).then_some(t)
    }

    /// All boundary crossings; a plane has at most one.
    pub fn intersect_local_all(&self, ray: &Ray, out: &mut Vec<f64>) {
        if let Some(t) = self.intersect_local(ray) {
            out.push(t);
        }
    }

    /// Surface normal, the constant local +z axis. Correct anywhere on
    /// the plane, so no surface-point dependence.
    pub fn normal_local(&self, _point: &Point3) -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }

    /// Half-space inside test: z < 0.
    pub fn inside_local(&self, point: &Point3) -> bool {
        point.z < 0.0
    }

    /// Planar parameterization: local x and y pass straight through,
    /// unbounded. Pattern pigments tile them as they see fit.
    pub fn uv_local(&self, point: &Point3) -> (f64, f64) {
        (point.x, point.y)
    }
}
