//! Color vector types.

use nalgebra::{SVector, Vector3};

/// The color carried by a ray — the RGB that ultimately lands in the
/// pixel buffer. Channels are unclamped until quantization.
pub type RayColor = Vector3<f64>;

/// The intrinsic color of a surface point: RGB plus the POV-Ray filter
/// and transmit channels.
pub type ObjectColor = SVector<f64, 5>;

/// Build an [`ObjectColor`] from all five channels.
pub fn object_color(r: f64, g: f64, b: f64, filter: f64, transmit: f64) -> ObjectColor {
    ObjectColor::from_column_slice(&[r, g, b, filter, transmit])
}

/// The RGB head of an object color.
#[inline]
pub fn rgb(color: &ObjectColor) -> RayColor {
    RayColor::new(color[0], color[1], color[2])
}
