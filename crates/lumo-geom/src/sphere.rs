//! Unit sphere at the local origin.

use crate::Ray;
use lumo_math::{Point3, Vec3};
use std::f64::consts::PI;

/// The unit sphere centered at the local origin. Position and size come
/// from the owning node's transform chain, so no parameters live here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere;

impl Sphere {
    /// Nearest strictly positive ray intersection, if any.
    ///
    /// Solves `|r0 + v t|^2 = 1` via the numerically stable quadratic
    /// form: `q = -(b + sign(b) sqrt(d)) / 2`, `t1 = q / a`, `t2 = c / q`,
    /// which avoids catastrophic cancellation when `b` dominates.
    pub fn intersect_local(&self, ray: &Ray) -> Option<f64> {
        let mut t1 = f64::NAN;
        let mut t2 = f64::NAN;
        if !self.roots(ray, &mut t1, &mut t2) {
            return None;
        }
        if t1 <= 0.0 {
            return (t2 > 0.0).then_some(t2);
        }
        if t2 <= 0.0 {
            return Some(t1);
        }
        Some(t1.min(t2))
    }

    /// All strictly positive boundary crossings, unsorted. Up to two for
    /// a sphere. Used by CSG composites, which must see every candidate
    /// surface, not just the nearest.
    pub fn intersect_local_all(&self, ray: &Ray, out: &mut Vec<f64>) {
        let mut t1 = f64::NAN;
        let mut t2 = f64::NAN;
        if !self.roots(ray, &mut t1, &mut t2) {
            return;
        }
        if t1 > 0.0 {
            out.push(t1);
        }
        if t2 > 0.0 {
            out.push(t2);
        }
    }

    fn roots(&self, ray: &Ray, t1: &mut f64, t2: &mut f64) -> bool {
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.origin.coords.dot(&ray.direction);
        let c = ray.origin.coords.dot(&ray.origin.coords) - 1.0;
        let d = b * b - 4.0 * a * c;
        if d < 0.0 {
            return false;
        }
        let q = -(b + b.signum() * d.sqrt()) / 2.0;
        *t1 = q / a;
        *t2 = c / q;
        true
    }

    /// Surface normal at `point`, which must lie on the sphere. A surface
    /// point on the unit sphere is its own normal.
    pub fn normal_local(&self, point: &Point3) -> Vec3 {
        point.coords / point.coords.norm()
    }

    /// Whether `point` is strictly inside the sphere.
    pub fn inside_local(&self, point: &Point3) -> bool {
        point.coords.norm() < 1.0
    }

    /// Longitude/latitude parameterization of a surface point, both
    /// mapped into [0, 1].
    pub fn uv_local(&self, point: &Point3) -> (f64, f64) {
        let mut lon = point.y.atan2(point.x);
        if lon < 0.0 {
            lon += 2.0 * PI;
        }
        let lat = (point.z / point.coords.norm()).asin();
        (lon / (2.0 * PI), lat / PI + 0.5)
    }
}
