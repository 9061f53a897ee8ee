//! The `rotate` entry point: one image plus its labels, one resolved angle.

use rand::Rng;

use crate::angle::resolve_angle;
use crate::annotation::{reproject_all, Annotations, ReprojectedAnnotations};
use crate::buffer::RgbBuffer;
use crate::config::RotationConfig;
use crate::error::RotateError;
use crate::transform::{rotate_raster, ResolvedTransform};

/// The rotated image, the transform that produced it and the labels in the
/// output frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationOutput {
    pub image: RgbBuffer,
    pub transform: ResolvedTransform,
    pub annotations: ReprojectedAnnotations,
}

/// Rotate `image` and re-project `annotations`, drawing a random angle from
/// the thread-local generator when `config.angle` is a range.
///
/// # Example
///
/// ```ignore
/// use labelspin_core::{rotate, Annotations, Point, RotationConfig};
///
/// let labels = Annotations::new().with_points(vec![Point::new(113.0, 127.0)]);
/// let out = rotate(&image, &labels, &RotationConfig::fixed(15, true))?;
/// println!("{}x{}", out.image.width, out.image.height);
/// ```
pub fn rotate(
    image: &RgbBuffer,
    annotations: &Annotations,
    config: &RotationConfig,
) -> Result<RotationOutput, RotateError> {
    rotate_with_rng(image, annotations, config, &mut rand::rng())
}

/// Like [`rotate`], drawing random angles from `rng` so callers can seed it.
///
/// Everything is validated and every annotation is re-projected before the
/// output pixel buffer is allocated, so an error leaves no partial output.
pub fn rotate_with_rng<R: Rng>(
    image: &RgbBuffer,
    annotations: &Annotations,
    config: &RotationConfig,
    rng: &mut R,
) -> Result<RotationOutput, RotateError> {
    image.validate()?;
    annotations.validate()?;
    let angle = resolve_angle(&config.angle, rng)?;

    let transform = ResolvedTransform::new(image.width, image.height, angle, config.expand_edges);
    log::debug!(
        "rotating {}x{} by {} degrees ({}) onto {}x{} canvas (pad {}, {})",
        transform.source_w,
        transform.source_h,
        transform.angle,
        if config.angle.is_random() { "drawn" } else { "fixed" },
        transform.dest_w,
        transform.dest_h,
        transform.width_pad,
        transform.height_pad
    );

    let annotations = reproject_all(annotations, &transform)?;
    let image = rotate_raster(image, &transform, config.filter);

    Ok(RotationOutput {
        image,
        transform,
        annotations,
    })
}
