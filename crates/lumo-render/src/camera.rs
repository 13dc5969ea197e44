//! Cameras: mapping normalized image-plane coordinates to world rays.

use lumo_geom::Ray;
use lumo_math::{atand, tand, Point3, Vec3};
use lumo_scene::{Result, TransformChain};

/// A camera maps normalized image-plane coordinates to world-space rays.
///
/// Both coordinates run from -0.5 to 0.5; x increases to the right and y
/// increases *downward*, so a row-major top-to-bottom pixel buffer needs
/// no vertical flip. A camera is transformable: `project` runs the local
/// ray through the camera's own world matrix, so a `location_lookat` on
/// the chain is the usual way to aim it.
pub trait Camera: Send + Sync {
    /// The camera's transform chain.
    fn chain(&self) -> &TransformChain;

    /// Mutable access to the transform chain, for aiming the camera.
    fn chain_mut(&mut self) -> &mut TransformChain;

    /// Ray through image-plane coordinates `(x, y)`, both in
    /// [-0.5, 0.5], in the camera's local frame.
    fn project_local(&self, x: f64, y: f64) -> Ray;

    /// Recompute the cached transform matrices.
    fn prepare_render(&mut self) -> Result<()> {
        self.chain_mut().prepare_render()
    }

    /// Ray through `(x, y)` in world space.
    fn project(&self, x: f64, y: f64) -> Ray {
        self.project_local(x, y)
            .transformed(self.chain().world_from_local())
    }
}

/// Pinhole perspective camera.
///
/// Rays start at the local origin with direction
/// `direction + right * x + down * y`. The *length* of `direction`
/// encodes zoom: a longer boresight narrows the field of view. The
/// default frame looks straight up the local +z axis with +x right and
/// +y down — think of a camera phone lying face-up on a table.
#[derive(Debug)]
pub struct PerspectiveCamera {
    /// Right-pointing basis vector of the image plane.
    pub right: Vec3,
    /// Down-pointing basis vector of the image plane.
    pub down: Vec3,
    /// Boresight vector, perpendicular to the image plane; its length
    /// sets the field of view.
    pub direction: Vec3,
    chain: TransformChain,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
    }
}

impl PerspectiveCamera {
    /// Camera with explicit basis vectors. They should normally be
    /// mutually perpendicular; nothing breaks if they are not, the image
    /// just shears.
    pub fn new(right: Vec3, down: Vec3, direction: Vec3) -> Self {
        Self {
            right,
            down,
            direction,
            chain: TransformChain::new(),
        }
    }

    /// Camera for an image of the given pixel size: the right vector is
    /// stretched to `width / height` so the image plane matches the
    /// buffer's aspect ratio.
    pub fn with_aspect(width: u32, height: u32) -> Self {
        Self::new(
            Vec3::new(width as f64 / height as f64, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
    }

    /// Aspect-matched camera with the given full horizontal field of
    /// view in degrees, encoded as the boresight length.
    pub fn with_fov(width: u32, height: u32, angle: f64) -> Self {
        let right_len = width as f64 / height as f64;
        Self::new(
            Vec3::new(right_len, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, Self::angle_to_dir(angle, right_len)),
        )
    }

    /// Boresight length for a full horizontal field of view of `angle`
    /// degrees: `|dir| = |right| / (2 tan(angle / 2))`.
    pub fn angle_to_dir(angle: f64, right_len: f64) -> f64 {
        right_len / (2.0 * tand(angle / 2.0))
    }

    /// Full horizontal field of view in degrees for the given vector
    /// lengths: `angle = 2 atan(|right| / (2 |dir|))`.
    pub fn dir_to_angle(dir_len: f64, right_len: f64) -> f64 {
        2.0 * atand(right_len / (2.0 * dir_len))
    }
}

impl Camera for PerspectiveCamera {
    fn chain(&self) -> &TransformChain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut TransformChain {
        &mut self.chain
    }

    fn project_local(&self, x: f64, y: f64) -> Ray {
        Ray::new(
            Point3::origin(),
            self.direction + self.right * x + self.down * y,
        )
    }
}
