//! Configuration for a single rotation request.
//!
//! Both types round-trip through serde so a dataset tool can keep its
//! augmentation settings next to the rest of its pipeline configuration.
//!
//! ```text
//! { "angle": { "lo": -15, "hi": 15 }, "expand_edges": true, "filter": "Bilinear" }
//! { "angle": 90, "expand_edges": false }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RotateError;
use crate::transform::InterpolationFilter;

/// Default random range used for augmentation, in degrees.
pub const DEFAULT_ANGLE_RANGE: (i32, i32) = (-15, 15);

/// How the rotation angle is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleSpec {
    /// A fixed angle in degrees. May be negative or exceed 360.
    Fixed(i32),
    /// A uniformly drawn angle in the inclusive range `[lo, hi]` degrees.
    Range { lo: i32, hi: i32 },
}

impl Default for AngleSpec {
    fn default() -> Self {
        let (lo, hi) = DEFAULT_ANGLE_RANGE;
        AngleSpec::Range { lo, hi }
    }
}

impl AngleSpec {
    /// Reject reversed ranges.
    pub fn validate(&self) -> Result<(), RotateError> {
        match *self {
            AngleSpec::Fixed(_) => Ok(()),
            AngleSpec::Range { lo, hi } if lo > hi => Err(RotateError::invalid(format!(
                "angle range [{}, {}] has lo > hi",
                lo, hi
            ))),
            AngleSpec::Range { .. } => Ok(()),
        }
    }

    /// True when resolving this spec consumes randomness.
    pub fn is_random(&self) -> bool {
        matches!(self, AngleSpec::Range { lo, hi } if lo != hi)
    }
}

/// Settings for one call to [`crate::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Fixed angle or random range, in degrees (positive = counter-clockwise).
    pub angle: AngleSpec,
    /// Grow the canvas so the rotated corners are not clipped.
    pub expand_edges: bool,
    /// Resampling kernel for the raster rotation.
    pub filter: InterpolationFilter,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            angle: AngleSpec::default(),
            expand_edges: true,
            filter: InterpolationFilter::default(),
        }
    }
}

impl RotationConfig {
    /// A config that always rotates by `degrees`.
    pub fn fixed(degrees: i32, expand_edges: bool) -> Self {
        Self {
            angle: AngleSpec::Fixed(degrees),
            expand_edges,
            ..Default::default()
        }
    }

    /// A config that draws the angle from `[lo, hi]` on every call.
    pub fn random(lo: i32, hi: i32, expand_edges: bool) -> Self {
        Self {
            angle: AngleSpec::Range { lo, hi },
            expand_edges,
            ..Default::default()
        }
    }
}
