//! Shared transform handles and the per-object transform chain.

use crate::error::{Result, SceneError};
use lumo_math::{deg2rad, Mat4, Point3, TransformOp, Vec3};
use std::sync::{Arc, PoisonError, RwLock};

/// A shared, mutable handle to one [`TransformOp`].
///
/// The same handle may sit in any number of chains: a composite that is
/// moved broadcasts one handle to all of its current children, so a later
/// parameter edit through the handle moves every holder at once. Editing
/// a handle takes effect at the next `prepare_render`, which is how
/// animation works — mutate, re-prepare, re-render.
#[derive(Debug, Clone)]
pub struct TransformHandle {
    inner: Arc<RwLock<TransformOp>>,
}

impl TransformHandle {
    /// Wrap an operation in a fresh shared handle.
    pub fn new(op: TransformOp) -> Self {
        Self {
            inner: Arc::new(RwLock::new(op)),
        }
    }

    /// Replace the operation.
    pub fn set(&self, op: TransformOp) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = op;
    }

    /// Edit the operation in place.
    pub fn update(&self, f: impl FnOnce(&mut TransformOp)) {
        f(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Copy of the current operation.
    pub fn get(&self) -> TransformOp {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Matrix for the current parameter values.
    pub fn matrix(&self) -> Mat4 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .matrix()
    }
}

/// An ordered, append-only chain of shared transform operations, plus the
/// matrices derived from it.
///
/// `combine` left-multiplies each successive matrix onto the running
/// product (`result = m_i * result`): transforms apply in insertion order
/// as successive physical moves of the object, the POV-Ray convention.
/// Derived matrices are filled by [`prepare_render`](Self::prepare_render)
/// and stay valid only until any constituent operation's parameters
/// change.
#[derive(Debug, Clone)]
pub struct TransformChain {
    ops: Vec<TransformHandle>,
    world_from_local: Mat4,
    local_from_world: Mat4,
    normal_matrix: Mat4,
}

impl Default for TransformChain {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            world_from_local: Mat4::identity(),
            local_from_world: Mat4::identity(),
            normal_matrix: Mat4::identity(),
        }
    }
}

impl TransformChain {
    /// Empty chain; all cached matrices are the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations in the chain.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the chain holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Append an existing shared handle.
    pub fn push(&mut self, handle: TransformHandle) {
        self.ops.push(handle);
    }

    /// Wrap `op` in a new handle, append it, and hand the handle back for
    /// later in-place mutation.
    pub fn add(&mut self, op: TransformOp) -> TransformHandle {
        let handle = TransformHandle::new(op);
        self.push(handle.clone());
        handle
    }

    /// Physical translation by `(x, y, z)`.
    pub fn translate(&mut self, x: f64, y: f64, z: f64) -> TransformHandle {
        self.add(TransformOp::Translate(Vec3::new(x, y, z)))
    }

    /// Right-handed rotation about the x axis, `angle` in degrees.
    pub fn rotate_x(&mut self, angle: f64) -> TransformHandle {
        self.add(TransformOp::RotateX(deg2rad(angle)))
    }

    /// Right-handed rotation about the y axis, `angle` in degrees.
    pub fn rotate_y(&mut self, angle: f64) -> TransformHandle {
        self.add(TransformOp::RotateY(deg2rad(angle)))
    }

    /// Right-handed rotation about the z axis, `angle` in degrees.
    pub fn rotate_z(&mut self, angle: f64) -> TransformHandle {
        self.add(TransformOp::RotateZ(deg2rad(angle)))
    }

    /// Rotation about x, then y, then z, components in degrees.
    pub fn rotate(&mut self, x: f64, y: f64, z: f64) -> TransformHandle {
        self.add(TransformOp::RotateXyz(Vec3::new(
            deg2rad(x),
            deg2rad(y),
            deg2rad(z),
        )))
    }

    /// Non-uniform scale about the origin. Zero components are remapped
    /// to 1 when the matrix is built.
    pub fn scale(&mut self, x: f64, y: f64, z: f64) -> TransformHandle {
        self.add(TransformOp::Scale(Vec3::new(x, y, z)))
    }

    /// Uniform scale about the origin.
    pub fn scale_uniform(&mut self, s: f64) -> TransformHandle {
        self.add(TransformOp::UniformScale(s))
    }

    /// Place the object at `location` pointing its boresight at
    /// `look_at`, with the conventional camera basis.
    pub fn location_lookat(&mut self, location: Point3, look_at: Point3) -> TransformHandle {
        self.add(TransformOp::location_lookat(location, look_at))
    }

    /// Fold the chain into one world-from-local matrix, applying the
    /// operations in insertion order.
    pub fn combine(&self) -> Mat4 {
        let mut result = Mat4::identity();
        for op in &self.ops {
            result = op.matrix() * result;
        }
        result
    }

    /// Recompute the cached matrices from the current operation
    /// parameters. Must be called between any parameter change and the
    /// next use of the cached matrices. Calling it twice with no
    /// intervening mutation reproduces the same matrices bit for bit.
    pub fn prepare_render(&mut self) -> Result<()> {
        self.world_from_local = self.combine();
        self.local_from_world = self
            .world_from_local
            .try_inverse()
            .ok_or(SceneError::SingularTransform)?;
        self.normal_matrix = self.local_from_world.transpose();
        Ok(())
    }

    /// Cached world-from-local matrix.
    #[inline]
    pub fn world_from_local(&self) -> &Mat4 {
        &self.world_from_local
    }

    /// Cached local-from-world matrix (inverse of world-from-local).
    #[inline]
    pub fn local_from_world(&self) -> &Mat4 {
        &self.local_from_world
    }

    /// Cached normal-transform matrix, the inverse-transpose of
    /// world-from-local. Needed because non-uniform scale does not
    /// preserve angles: for tangent p and normal n with n·p = 0, keeping
    /// (Qn)·(Mp) = 0 for all p forces Q = (M⁻¹)ᵀ.
    #[inline]
    pub fn normal_matrix(&self) -> &Mat4 {
        &self.normal_matrix
    }
}
