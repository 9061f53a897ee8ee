//! Angle resolution: turns an [`AngleSpec`] into a concrete angle in `[0, 360)`.

use rand::Rng;

use crate::config::AngleSpec;
use crate::error::RotateError;

/// The π literal used for degree to radian conversion.
///
/// Kept at this precision so projected coordinates match the labels produced
/// by existing augmentation pipelines bit for bit.
#[allow(clippy::approx_constant)]
pub const REFERENCE_PI: f64 = 3.1415927;

/// Resolve `spec` to an integer angle in `[0, 360)`.
///
/// A range draws uniformly from `rng`; a fixed angle never touches it.
pub fn resolve_angle<R: Rng>(spec: &AngleSpec, rng: &mut R) -> Result<i32, RotateError> {
    spec.validate()?;
    let raw = match *spec {
        AngleSpec::Fixed(degrees) => degrees,
        AngleSpec::Range { lo, hi } => rng.random_range(lo..=hi),
    };
    Ok(normalize_degrees(raw))
}

/// Wrap any integer angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Convert integer degrees to radians with [`REFERENCE_PI`].
#[inline]
pub fn degrees_to_radians(degrees: i32) -> f64 {
    degrees as f64 * REFERENCE_PI / 180.0
}
