//! Labelspin Core - rotation augmentation for labeled images
//!
//! This crate rotates an RGB image by a fixed or randomly drawn angle and
//! re-projects its detection/segmentation labels so they stay aligned with
//! the rotated pixels.
//!
//! # Module Structure
//!
//! - `config` - Angle spec (fixed or random range) and rotation settings
//! - `angle` - Angle resolution and normalization to `[0, 360)`
//! - `transform` - Canvas sizing, point projection and raster rotation
//! - `annotation` - Label encodings and their re-projectors
//! - `buffer` - The RGB pixel buffer
//!
//! Image decoding, encoding and drawing are left to the caller; see
//! [`RgbBuffer::from_rgb_image`] for handing over an `image::RgbImage`.

pub mod angle;
pub mod annotation;
pub mod buffer;
pub mod config;
pub mod error;
pub mod geometry;
mod rotate;
pub mod transform;

pub use annotation::{
    min_area_rect, Annotations, AxisRect, CenterSizeAngleRect, EncodedOrientedRect,
    OrientedRect, Polygon, Quadrilateral, ReprojectedAnnotations,
};
pub use buffer::RgbBuffer;
pub use config::{AngleSpec, RotationConfig};
pub use error::RotateError;
pub use geometry::{Point, Size};
pub use rotate::{rotate, rotate_with_rng, RotationOutput};
pub use transform::{rotate_raster, InterpolationFilter, ResolvedTransform};
