#![warn(missing_docs)]

//! Math types for the lumo ray-tracing core.
//!
//! Thin wrappers around nalgebra providing the domain types used throughout
//! the tracer — points, vectors, directions, 4x4 homogeneous matrices — plus
//! [`TransformOp`], the parameterized affine operation that every
//! transform chain is built from.

use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 homogeneous affine matrix.
pub type Mat4 = Matrix4<f64>;

/// Convert degrees to radians.
pub fn deg2rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Convert radians to degrees.
pub fn rad2deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Degree-mode sine.
pub fn sind(angle: f64) -> f64 {
    deg2rad(angle).sin()
}

/// Degree-mode cosine.
pub fn cosd(angle: f64) -> f64 {
    deg2rad(angle).cos()
}

/// Degree-mode tangent.
pub fn tand(angle: f64) -> f64 {
    deg2rad(angle).tan()
}

/// Degree-mode inverse tangent.
pub fn atand(arg: f64) -> f64 {
    rad2deg(arg.atan())
}

/// Transform a point with a homogeneous matrix (w = 1, participates in
/// translation).
#[inline]
pub fn transform_point(m: &Mat4, p: &Point3) -> Point3 {
    let v = m * Vector4::new(p.x, p.y, p.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}

/// Transform a direction with a homogeneous matrix (w = 0, does not
/// participate in translation).
#[inline]
pub fn transform_dir(m: &Mat4, v: &Vec3) -> Vec3 {
    let r = m * Vector4::new(v.x, v.y, v.z, 0.0);
    Vec3::new(r.x, r.y, r.z)
}

/// Rotation matrix about a coordinate axis (x = 0, y = 1, z = 2) by `angle`
/// radians, in the right-handed physical sense.
fn axis_rotation(axis: usize, angle: f64) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let a1 = (axis + 1) % 3;
    let a2 = (axis + 2) % 3;
    let mut m = Mat4::identity();
    m[(a1, a1)] = c;
    m[(a1, a2)] = -s;
    m[(a2, a1)] = s;
    m[(a2, a2)] = c;
    m
}

/// Zero scale factors make the matrix singular, so they are silently
/// remapped to 1 (the POV-Ray convention).
#[inline]
fn nonzero_scale(s: f64) -> f64 {
    if s == 0.0 {
        1.0
    } else {
        s
    }
}

/// A single parameterized affine operation.
///
/// Each variant holds mutable numeric parameters and can produce its 4x4
/// matrix on demand from the current values. Operations are interpreted as
/// *physical* moves of the object about the world origin: an object at the
/// origin translated by `(1, 2, 3)` is afterwards located at `(1, 2, 3)`,
/// and an object 5 units out on the x axis rotated 90 degrees about z ends
/// up 5 units out on the y axis.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    /// Translation by a vector.
    Translate(Vec3),
    /// Non-uniform scale about the origin. Zero components are remapped
    /// to 1 rather than producing a singular matrix.
    Scale(Vec3),
    /// Uniform scale about the origin. Zero is remapped to 1.
    UniformScale(f64),
    /// Right-handed rotation about the x axis, in radians.
    RotateX(f64),
    /// Right-handed rotation about the y axis, in radians.
    RotateY(f64),
    /// Right-handed rotation about the z axis, in radians.
    RotateZ(f64),
    /// Rotation about x, then y, then z, each component in radians.
    RotateXyz(Vec3),
    /// Rotate the body so that `point_body` (a body-frame direction) maps
    /// onto `point_world`, while `toward_body` ends up as close as
    /// possible to `toward_world`.
    PointToward {
        /// Primary (point) direction in the body frame.
        point_body: Vec3,
        /// Primary (point) direction in the world frame.
        point_world: Vec3,
        /// Secondary (toward) constraint in the body frame.
        toward_body: Vec3,
        /// Secondary (toward) constraint in the world frame.
        toward_world: Vec3,
    },
    /// Place the body origin at `location` and point `point_body` at
    /// `look_at`, with `toward_body` kept as close as possible to
    /// `toward_world`. This is the POV-Ray `location`/`look_at` camera
    /// placement.
    LocationLookat {
        /// Body origin in world coordinates.
        location: Point3,
        /// World point the body is aimed at.
        look_at: Point3,
        /// Boresight direction in the body frame.
        point_body: Vec3,
        /// Secondary direction in the body frame.
        toward_body: Vec3,
        /// Secondary direction in the world frame (the POV-Ray `sky`).
        toward_world: Vec3,
    },
}

impl TransformOp {
    /// A `LocationLookat` with the conventional camera basis: boresight
    /// +z, secondary +y in the body frame and -z in the world frame.
    pub fn location_lookat(location: Point3, look_at: Point3) -> Self {
        TransformOp::LocationLookat {
            location,
            look_at,
            point_body: Vec3::new(0.0, 0.0, 1.0),
            toward_body: Vec3::new(0.0, 1.0, 0.0),
            toward_world: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Construct the matrix for this operation from its current
    /// parameters.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            TransformOp::Translate(v) => {
                let mut m = Mat4::identity();
                m[(0, 3)] = v.x;
                m[(1, 3)] = v.y;
                m[(2, 3)] = v.z;
                m
            }
            TransformOp::Scale(v) => {
                let mut m = Mat4::identity();
                m[(0, 0)] = nonzero_scale(v.x);
                m[(1, 1)] = nonzero_scale(v.y);
                m[(2, 2)] = nonzero_scale(v.z);
                m
            }
            TransformOp::UniformScale(s) => {
                let s = nonzero_scale(s);
                let mut m = Mat4::identity();
                m[(0, 0)] = s;
                m[(1, 1)] = s;
                m[(2, 2)] = s;
                m
            }
            TransformOp::RotateX(angle) => axis_rotation(0, angle),
            TransformOp::RotateY(angle) => axis_rotation(1, angle),
            TransformOp::RotateZ(angle) => axis_rotation(2, angle),
            TransformOp::RotateXyz(v) => {
                axis_rotation(2, v.z) * axis_rotation(1, v.y) * axis_rotation(0, v.x)
            }
            TransformOp::PointToward {
                point_body,
                point_world,
                toward_body,
                toward_world,
            } => point_toward(&point_body, &point_world, &toward_body, &toward_world),
            TransformOp::LocationLookat {
                location,
                look_at,
                point_body,
                toward_body,
                toward_world,
            } => {
                let aim = point_toward(
                    &point_body,
                    &(look_at - location),
                    &toward_body,
                    &toward_world,
                );
                TransformOp::Translate(location.coords).matrix() * aim
            }
        }
    }
}

/// Rotation matrix that maps body direction `p_b` onto world direction
/// `p_r` while keeping body direction `t_b` as close as possible to world
/// direction `t_r`.
///
/// Both frames get an orthonormal basis `[p, s, u]` with
/// `s = normalize(p × t)` and `u = p × s`; since each basis matrix is
/// orthogonal the solution is `R * B^T` with no explicit inverse.
pub fn point_toward(p_b: &Vec3, p_r: &Vec3, t_b: &Vec3, t_r: &Vec3) -> Mat4 {
    let s_r = p_r.cross(t_r).normalize();
    let u_r = p_r.cross(&s_r).normalize();
    let r = Matrix3::from_columns(&[p_r.normalize(), s_r, u_r]);

    let s_b = p_b.cross(t_b).normalize();
    let u_b = p_b.cross(&s_b).normalize();
    let b = Matrix3::from_columns(&[p_b.normalize(), s_b, u_b]);

    let mut m = Mat4::identity();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&(r * b.transpose()));
    m
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tracer tolerances.
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_translate() {
        let m = TransformOp::Translate(Vec3::new(10.0, 20.0, 30.0)).matrix();
        let p = transform_point(&m, &Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p.x, 11.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 22.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 33.0, epsilon = 1e-12);
    }

    #[test]
    fn test_translate_ignores_directions() {
        let m = TransformOp::Translate(Vec3::new(10.0, 20.0, 30.0)).matrix();
        let v = transform_dir(&m, &Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(v.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_z_90() {
        let m = TransformOp::RotateZ(PI / 2.0).matrix();
        let p = transform_point(&m, &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_x_90() {
        let m = TransformOp::RotateX(PI / 2.0).matrix();
        let p = transform_point(&m, &Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_y_90() {
        let m = TransformOp::RotateY(PI / 2.0).matrix();
        let p = transform_point(&m, &Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale() {
        let m = TransformOp::Scale(Vec3::new(2.0, 3.0, 4.0)).matrix();
        let p = transform_point(&m, &Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_scale_remapped_to_one() {
        let m = TransformOp::Scale(Vec3::new(0.0, 2.0, 0.0)).matrix();
        let p = transform_point(&m, &Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
        // The remapped matrix must stay invertible.
        assert!(m.try_inverse().is_some());

        let u = TransformOp::UniformScale(0.0).matrix();
        assert_relative_eq!(u[(0, 0)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_xyz_order() {
        // x then y then z must match the explicit product.
        let v = Vec3::new(0.3, -0.7, 1.1);
        let combined = TransformOp::RotateXyz(v).matrix();
        let explicit = TransformOp::RotateZ(v.z).matrix()
            * TransformOp::RotateY(v.y).matrix()
            * TransformOp::RotateX(v.x).matrix();
        assert_relative_eq!(combined, explicit, epsilon = 1e-12);
    }

    #[test]
    fn test_point_toward_shuttle() {
        // Thrust axis 13 degrees below body x, commanded 30 degrees above
        // the horizon at azimuth 80 degrees, heads-down.
        let p_b = Vec3::new(cosd(13.0), 0.0, -sind(13.0));
        let t_b = Vec3::new(0.0, 0.0, 1.0);
        let p_r = Vec3::new(cosd(30.0) * sind(80.0), cosd(30.0) * cosd(80.0), sind(30.0));
        let t_r = Vec3::new(0.0, 0.0, -1.0);

        let m = point_toward(&p_b, &p_r, &t_b, &t_r);
        let mapped = transform_dir(&m, &p_b);
        assert_relative_eq!(mapped.x, p_r.x, epsilon = 1e-9);
        assert_relative_eq!(mapped.y, p_r.y, epsilon = 1e-9);
        assert_relative_eq!(mapped.z, p_r.z, epsilon = 1e-9);

        // The toward constraint cannot be met exactly; the mapped toward
        // vector lands in the plane of p_r and t_r.
        let mapped_t = transform_dir(&m, &t_b);
        let plane_normal = p_r.cross(&t_r);
        assert_relative_eq!(mapped_t.dot(&plane_normal), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_location_lookat_places_origin() {
        let loc = Point3::new(1.0, 2.0, 3.0);
        let m = TransformOp::location_lookat(loc, Point3::new(10.0, 2.0, 3.0)).matrix();
        let origin = transform_point(&m, &Point3::origin());
        assert_relative_eq!(origin.x, loc.x, epsilon = 1e-12);
        assert_relative_eq!(origin.y, loc.y, epsilon = 1e-12);
        assert_relative_eq!(origin.z, loc.z, epsilon = 1e-12);
    }

    #[test]
    fn test_location_lookat_aims_boresight() {
        let loc = Point3::new(-5.0, 0.0, 0.0);
        let target = Point3::origin();
        let m = TransformOp::location_lookat(loc, target).matrix();
        // Body +z is the boresight; it must map onto the direction from
        // location to look_at.
        let bore = transform_dir(&m, &Vec3::new(0.0, 0.0, 1.0));
        let want = (target - loc).normalize();
        assert_relative_eq!(bore.normalize().dot(&want), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degree_helpers() {
        assert_relative_eq!(sind(90.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cosd(180.0), -1.0, epsilon = 1e-12);
        assert_relative_eq!(tand(45.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(atand(1.0), 45.0, epsilon = 1e-12);
        assert_relative_eq!(rad2deg(deg2rad(123.4)), 123.4, epsilon = 1e-12);
    }
}
