//! Pigments: position-dependent intrinsic surface color.

use crate::color::{object_color, ObjectColor};
use crate::error::Result;
use crate::transform::{TransformChain, TransformHandle};
use lumo_math::{transform_point, Point3};
use std::sync::{Arc, PoisonError, RwLock};

/// The closed set of color fields: functions from a local-space position
/// to an object color.
#[derive(Debug, Clone)]
pub enum ColorField {
    /// The same color everywhere.
    Constant(ObjectColor),
}

impl ColorField {
    fn eval(&self, _point: &Point3) -> ObjectColor {
        match self {
            ColorField::Constant(c) => *c,
        }
    }
}

/// A color field with its own placement.
///
/// A pigment owns a transform chain so that *where* the field is sampled
/// can be remapped independently of the surface that wears it; a node
/// that is moved forwards its transforms to its pigment so the color
/// rides along with the geometry.
#[derive(Debug)]
pub struct Pigment {
    field: ColorField,
    chain: TransformChain,
}

impl Pigment {
    /// Pigment over an arbitrary field.
    pub fn new(field: ColorField) -> Self {
        Self {
            field,
            chain: TransformChain::new(),
        }
    }

    /// Opaque constant color from RGB.
    pub fn constant(r: f64, g: f64, b: f64) -> Self {
        Self::new(ColorField::Constant(object_color(r, g, b, 0.0, 0.0)))
    }

    /// The pigment's own transform chain.
    pub fn chain_mut(&mut self) -> &mut TransformChain {
        &mut self.chain
    }

    /// Append a shared transform handle, as broadcast from the node that
    /// wears this pigment.
    pub fn add_transform(&mut self, handle: TransformHandle) {
        self.chain.push(handle);
    }

    /// Recompute the cached placement matrices.
    pub fn prepare_render(&mut self) -> Result<()> {
        self.chain.prepare_render()
    }

    /// Evaluate the field at a world-space position, mapping it through
    /// the pigment's own inverse placement first.
    pub fn eval(&self, point: &Point3) -> ObjectColor {
        let local = transform_point(self.chain.local_from_world(), point);
        self.field.eval(&local)
    }

    /// Move the pigment behind a shared handle so siblings can reuse it.
    pub fn into_shared(self) -> SharedPigment {
        Arc::new(RwLock::new(self))
    }
}

/// Shared ownership of a pigment: one pigment instance may be worn by
/// several sibling nodes.
pub type SharedPigment = Arc<RwLock<Pigment>>;

/// Read-side access helper that shrugs off lock poisoning (a pigment
/// holds no invariants that a panicked writer could break).
pub(crate) fn read_pigment<R>(p: &SharedPigment, f: impl FnOnce(&Pigment) -> R) -> R {
    f(&p.read().unwrap_or_else(PoisonError::into_inner))
}

/// Write-side access helper.
pub(crate) fn write_pigment<R>(p: &SharedPigment, f: impl FnOnce(&mut Pigment) -> R) -> R {
    f(&mut p.write().unwrap_or_else(PoisonError::into_inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_is_position_independent() {
        let mut pig = Pigment::constant(1.0, 0.5, 0.25);
        pig.prepare_render().unwrap();
        let a = pig.eval(&Point3::origin());
        let b = pig.eval(&Point3::new(100.0, -3.0, 9.0));
        assert_relative_eq!(a[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(a[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(a[2], 0.25, epsilon = 1e-12);
        assert_eq!(a, b);
        // filter/transmit default to opaque
        assert_eq!(a[3], 0.0);
        assert_eq!(a[4], 0.0);
    }

    #[test]
    fn test_pigment_has_own_placement() {
        let mut pig = Pigment::constant(0.0, 1.0, 0.0);
        pig.chain_mut().translate(5.0, 0.0, 0.0);
        // A constant field cannot show the remap, but preparing must
        // still succeed and evaluation still run through the inverse.
        pig.prepare_render().unwrap();
        let c = pig.eval(&Point3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(c[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shared_pigment_reused_across_holders() {
        let shared = Pigment::constant(0.2, 0.4, 0.6).into_shared();
        let other = Arc::clone(&shared);
        write_pigment(&shared, |p| p.prepare_render()).unwrap();
        let a = read_pigment(&shared, |p| p.eval(&Point3::origin()));
        let b = read_pigment(&other, |p| p.eval(&Point3::origin()));
        assert_eq!(a, b);
    }
}
