//! Raster rotation of the pixel buffer onto the output canvas.
//!
//! The source is conceptually embedded in a black canvas of the output size at
//! offset `(width_pad // 2, height_pad // 2)` and the canvas is rotated about
//! its center `(dest_w / 2, dest_h / 2)`. Both steps are folded into a single
//! inverse mapping: for each output pixel we find the canvas position it came
//! from, shift it back into the source and sample there.
//!
//! For a counter-clockwise rotation by θ about `(cx, cy)`:
//! ```text
//! canvas_x = (dst_x - cx) * cos θ - (dst_y - cy) * sin θ + cx
//! canvas_y = (dst_x - cx) * sin θ + (dst_y - cy) * cos θ + cy
//! src      = canvas - offset
//! ```
//!
//! Samples that fall outside the source are black. Negative padding (a canvas
//! narrower than the source along one axis) is handled without cropping the
//! source first, so content that rotates into view is kept.

use serde::{Deserialize, Serialize};

use super::ResolvedTransform;
use crate::buffer::RgbBuffer;

/// Interpolation filter for the raster rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest neighbor. Keeps label masks free of blended values.
    Nearest,
    /// Bilinear interpolation over the 4 nearest pixels.
    #[default]
    Bilinear,
}

/// Rotate `image` onto the canvas described by `transform`.
///
/// The caller's buffer is left untouched; a new buffer of
/// `dest_w` x `dest_h` is returned.
pub fn rotate_raster(
    image: &RgbBuffer,
    transform: &ResolvedTransform,
    filter: InterpolationFilter,
) -> RgbBuffer {
    // Fast path: nothing moves
    if transform.is_identity() {
        return image.clone();
    }

    let (dst_w, dst_h) = (transform.dest_w, transform.dest_h);
    let (offset_x, offset_y) = transform.pixel_offset();
    let (offset_x, offset_y) = (offset_x as f64, offset_y as f64);

    let (sin, cos) = transform.radian.sin_cos();
    let cx = dst_w as f64 / 2.0;
    let cy = dst_h as f64 / 2.0;

    let mut output = RgbBuffer::black(dst_w, dst_h);

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 - cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 - cx;

            let src_x = dx * cos - dy * sin + cx - offset_x;
            let src_y = dx * sin + dy * cos + cy - offset_y;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
            };

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 3;
            output.pixels[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
        }
    }

    output
}

/// Fetch a pixel as `[f64; 3]`, black when outside the image.
#[inline]
fn fetch(image: &RgbBuffer, px: i64, py: i64) -> [f64; 3] {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return [0.0; 3];
    }
    let [r, g, b] = image.pixel(px as u32, py as u32);
    [r as f64, g as f64, b as f64]
}

fn sample_nearest(image: &RgbBuffer, x: f64, y: f64) -> [u8; 3] {
    let px = x.round() as i64;
    let py = y.round() as i64;
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return [0, 0, 0];
    }
    image.pixel(px as u32, py as u32)
}

/// Sample a pixel using bilinear interpolation.
///
/// Neighbors outside the image count as black, so edges blend into the
/// background instead of being cut hard.
fn sample_bilinear(image: &RgbBuffer, x: f64, y: f64) -> [u8; 3] {
    // Entirely outside: no neighbor can contribute
    if x <= -1.0 || y <= -1.0 || x >= image.width as f64 || y >= image.height as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = fetch(image, x0, y0);
    let p10 = fetch(image, x0 + 1, y0);
    let p01 = fetch(image, x0, y0 + 1);
    let p11 = fetch(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> RgbBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 8 % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        RgbBuffer {
            width,
            height,
            pixels,
        }
    }

    /// A black image with a single white pixel at (x, y).
    fn dot_image(width: u32, height: u32, x: u32, y: u32) -> RgbBuffer {
        let mut img = RgbBuffer::black(width, height);
        let idx = ((y * width + x) * 3) as usize;
        img.pixels[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
        img
    }

    fn brightest(img: &RgbBuffer) -> (u32, u32) {
        let mut best = (0, 0);
        let mut best_v = 0;
        for y in 0..img.height {
            for x in 0..img.width {
                let v = img.pixel(x, y)[0];
                if v > best_v {
                    best_v = v;
                    best = (x, y);
                }
            }
        }
        best
    }

    #[test]
    fn test_no_rotation_is_identity() {
        let img = test_image(40, 30);
        let t = ResolvedTransform::new(40, 30, 0, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        assert_eq!(result, img);
    }

    #[test]
    fn test_output_has_canvas_dimensions() {
        let img = test_image(40, 30);
        let t = ResolvedTransform::new(40, 30, 15, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        assert_eq!((result.width, result.height), (t.dest_w, t.dest_h));
        assert_eq!(result.pixels.len(), (t.dest_w * t.dest_h * 3) as usize);
    }

    #[test]
    fn test_90_degree_swaps_dimensions() {
        let img = test_image(200, 100);
        let t = ResolvedTransform::new(200, 100, 90, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        assert_eq!((result.width, result.height), (100, 200));
    }

    #[test]
    fn test_90_degree_moves_pixel_counter_clockwise() {
        // Near the right edge, mid-height: ends up near the top, mid-width
        let img = dot_image(20, 10, 18, 5);
        let t = ResolvedTransform::new(20, 10, 90, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Nearest);
        let (x, y) = brightest(&result);
        assert!((x as i32 - 5).abs() <= 1, "x was {}", x);
        assert!((y as i32 - 2).abs() <= 1, "y was {}", y);
    }

    #[test]
    fn test_pixels_follow_point_projection() {
        let img = dot_image(40, 30, 8, 6);
        let t = ResolvedTransform::new(40, 30, 30, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        let projected = t.project_point(crate::geometry::Point::new(8.0, 6.0));
        let (x, y) = brightest(&result);
        assert!((x as f64 - projected.x).abs() <= 1.5, "x {} vs {}", x, projected.x);
        assert!((y as f64 - projected.y).abs() <= 1.5, "y {} vs {}", y, projected.y);
    }

    #[test]
    fn test_corners_are_black_after_45_degrees() {
        let img = RgbBuffer {
            width: 20,
            height: 20,
            pixels: vec![200u8; 20 * 20 * 3],
        };
        let t = ResolvedTransform::new(20, 20, 45, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        assert_eq!(result.pixel(0, 0), [0, 0, 0]);
        assert_eq!(result.pixel(result.width - 1, result.height - 1), [0, 0, 0]);
        let center = result.pixel(result.width / 2, result.height / 2);
        assert_eq!(center, [200, 200, 200]);
    }

    #[test]
    fn test_no_expand_keeps_canvas() {
        let img = test_image(30, 20);
        let t = ResolvedTransform::new(30, 20, 45, false);
        let result = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        assert_eq!((result.width, result.height), (30, 20));
    }

    #[test]
    fn test_180_degree_nearest_is_exact_flip() {
        let img = test_image(6, 4);
        let t = ResolvedTransform::new(6, 4, 180, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Nearest);
        // Pixel centers sit on integer coordinates, so (x, y) maps to (w - x, h - y)
        for y in 1..4 {
            for x in 1..6 {
                assert_eq!(result.pixel(6 - x, 4 - y), img.pixel(x, y), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = RgbBuffer {
            width: 1,
            height: 1,
            pixels: vec![128, 128, 128],
        };
        let t = ResolvedTransform::new(1, 1, 45, true);
        let result = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        assert!(result.width >= 1);
        assert!(result.height >= 1);
    }

    #[test]
    fn test_input_buffer_untouched() {
        let img = test_image(10, 10);
        let before = img.clone();
        let t = ResolvedTransform::new(10, 10, 30, true);
        let _ = rotate_raster(&img, &t, InterpolationFilter::Bilinear);
        assert_eq!(img, before);
    }
}
