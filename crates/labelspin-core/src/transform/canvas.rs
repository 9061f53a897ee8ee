//! Canvas sizing and the [`ResolvedTransform`] value.

use serde::{Deserialize, Serialize};

use crate::angle::{degrees_to_radians, normalize_degrees};

/// Everything a projection needs to know about one rotation.
///
/// Computed once per call and shared read-only by the raster rotation and
/// every annotation re-projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTransform {
    /// Rotation angle in degrees, in `[0, 360)`, counter-clockwise.
    pub angle: i32,
    /// `angle` in radians.
    pub radian: f64,
    pub source_w: u32,
    pub source_h: u32,
    pub dest_w: u32,
    pub dest_h: u32,
    /// `dest_w - source_w`. Negative when the canvas shrinks along x.
    pub width_pad: i64,
    /// `dest_h - source_h`. Negative when the canvas shrinks along y.
    pub height_pad: i64,
}

/// Compute the output canvas for a `width` x `height` source rotated by `radian`.
///
/// With `expand_edges` the canvas is the axis-aligned bounding box of the
/// rotated source rectangle; otherwise the source dimensions are kept and
/// rotated corners may be clipped.
///
/// # Example
///
/// ```
/// use labelspin_core::transform::canvas_size;
///
/// // 90 degrees swaps dimensions
/// let (w, h) = canvas_size(400, 300, std::f64::consts::FRAC_PI_2, true);
/// assert_eq!((w, h), (300, 400));
/// ```
pub fn canvas_size(width: u32, height: u32, radian: f64, expand_edges: bool) -> (u32, u32) {
    if !expand_edges {
        return (width, height);
    }

    let (sin, cos) = radian.sin_cos();
    let w = width as f64;
    let h = height as f64;

    let new_w = ((h * sin).abs() + (w * cos).abs()).round() as u32;
    let new_h = ((w * sin).abs() + (h * cos).abs()).round() as u32;

    (new_w, new_h)
}

impl ResolvedTransform {
    /// Resolve the transform for a `source_w` x `source_h` image.
    ///
    /// `angle` may be any integer; it is wrapped into `[0, 360)`.
    pub fn new(source_w: u32, source_h: u32, angle: i32, expand_edges: bool) -> Self {
        let angle = normalize_degrees(angle);
        let radian = degrees_to_radians(angle);
        let (dest_w, dest_h) = canvas_size(source_w, source_h, radian, expand_edges);

        Self {
            angle,
            radian,
            source_w,
            source_h,
            dest_w,
            dest_h,
            width_pad: dest_w as i64 - source_w as i64,
            height_pad: dest_h as i64 - source_h as i64,
        }
    }

    /// The transform that maps output-frame points back into the source frame.
    ///
    /// Source and destination swap, padding is negated and the angle is
    /// reversed, so projecting through `self` and then `self.inverse()`
    /// returns the original point within one pixel per axis.
    pub fn inverse(&self) -> Self {
        let angle = normalize_degrees(-self.angle);
        Self {
            angle,
            radian: degrees_to_radians(angle),
            source_w: self.dest_w,
            source_h: self.dest_h,
            dest_w: self.source_w,
            dest_h: self.source_h,
            width_pad: -self.width_pad,
            height_pad: -self.height_pad,
        }
    }

    /// True when the transform leaves every pixel and point where it was.
    pub fn is_identity(&self) -> bool {
        self.angle == 0 && self.width_pad == 0 && self.height_pad == 0
    }

    /// Pixel offset of the source image inside the padded canvas.
    ///
    /// Floor division, so negative padding crops symmetrically.
    pub(crate) fn pixel_offset(&self) -> (i64, i64) {
        (self.width_pad.div_euclid(2), self.height_pad.div_euclid(2))
    }
}
