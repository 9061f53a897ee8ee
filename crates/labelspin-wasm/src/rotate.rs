//! WASM bindings for rotation with label re-projection.
//!
//! Annotations and configuration are passed as plain JavaScript objects with
//! the same shape as the core serde types:
//!
//! ```typescript
//! const annotations = {
//!   points: [[113, 127], [156, 127]],
//!   axis_rects: [[117, 188, 108, 57]],
//!   polygons: [[[0, 0], [10, 0], [10, 10]]],
//! };
//! const config = { angle: { lo: -15, hi: 15 }, expand_edges: true };
//! ```

use crate::types::JsRgbImage;
use labelspin_core::{
    Annotations, InterpolationFilter, Point, ResolvedTransform, RotationConfig, RotationOutput,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// Deserialize `value`, treating `undefined` and `null` as the default.
fn from_js_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    what: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

/// Result of a rotation: the rotated image plus re-projected annotations.
#[wasm_bindgen]
pub struct JsRotation {
    inner: RotationOutput,
}

#[wasm_bindgen]
impl JsRotation {
    /// The resolved angle in degrees, in [0, 360).
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> i32 {
        self.inner.transform.angle
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.image.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.image.height
    }

    /// The rotated image. Copies the pixel data.
    pub fn image(&self) -> JsRgbImage {
        JsRgbImage::from_buffer(self.inner.image.clone())
    }

    /// Re-projected annotations; only collections that were passed in are present.
    pub fn annotations(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.annotations)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The resolved transform (angle, canvas size and padding).
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.transform)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Rotate an image and its annotations.
///
/// # Arguments
///
/// * `image` - Source image
/// * `annotations` - Annotation collections, or `undefined` for image only
/// * `config` - Rotation config, or `undefined` for a random angle in [-15, 15]
///
/// # Errors
///
/// Returns an error for a malformed config, malformed annotations, a pixel
/// buffer that is not RGB, or a degenerate rectangle.
#[wasm_bindgen]
pub fn rotate(
    image: &JsRgbImage,
    annotations: JsValue,
    config: JsValue,
) -> Result<JsRotation, JsValue> {
    let annotations: Annotations = from_js_or_default(annotations, "annotations")?;
    let config: RotationConfig = from_js_or_default(config, "rotation config")?;

    labelspin_core::rotate(&image.to_buffer(), &annotations, &config)
        .map(|inner| JsRotation { inner })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rotate only the pixels by a fixed angle.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Preview with nearest-neighbor sampling (keeps mask colors exact)
/// const rotated = rotate_image(mask, 30, true, true);
/// ```
#[wasm_bindgen]
pub fn rotate_image(
    image: &JsRgbImage,
    angle_degrees: i32,
    expand_edges: bool,
    use_nearest: bool,
) -> Result<JsRgbImage, JsValue> {
    let config = RotationConfig {
        filter: if use_nearest {
            InterpolationFilter::Nearest
        } else {
            InterpolationFilter::Bilinear
        },
        ..RotationConfig::fixed(angle_degrees, expand_edges)
    };

    labelspin_core::rotate(&image.to_buffer(), &Annotations::new(), &config)
        .map(|out| JsRgbImage::from_buffer(out.image))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Project a single source-frame point, returning `[x, y]` in the output frame.
///
/// Lets a labeling UI place a new label on a rotated preview without
/// re-running the rotation.
#[wasm_bindgen]
pub fn project_point(
    width: u32,
    height: u32,
    angle_degrees: i32,
    expand_edges: bool,
    x: f64,
    y: f64,
) -> Vec<f64> {
    let transform = ResolvedTransform::new(width, height, angle_degrees, expand_edges);
    let p = transform.project_point(Point::new(x, y));
    vec![p.x, p.y]
}


/// WASM-specific tests that require JsValue.
///
/// These tests use functions that take or return `JsValue` and can only run
/// on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_image(width: u32, height: u32) -> JsRgbImage {
        let pixels: Vec<u8> = (0..(width * height * 3) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsRgbImage::new(width, height, pixels)
    }

    #[derive(Serialize)]
    struct TestAnnotations {
        points: Vec<[f64; 2]>,
    }

    #[wasm_bindgen_test]
    fn test_rotate_with_points() {
        let img = test_image(400, 300);
        let annotations = serde_wasm_bindgen::to_value(&TestAnnotations {
            points: vec![[113.0, 127.0]],
        })
        .unwrap();
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"angle".into(), &JsValue::from(15)).unwrap();

        let result = rotate(&img, annotations, config.into()).unwrap();
        assert_eq!(result.angle(), 15);
        assert_eq!((result.width(), result.height()), (464, 393));

        let out: Annotations =
            serde_wasm_bindgen::from_value(result.annotations().unwrap()).unwrap();
        assert_eq!(out.points, Some(vec![Point::new(142.0, 197.0)]));
    }

    #[wasm_bindgen_test]
    fn test_rotate_undefined_inputs_use_defaults() {
        let img = test_image(20, 20);
        let result = rotate(&img, JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
        let angle = result.angle();
        assert!(angle <= 15 || angle >= 345);
    }

    #[wasm_bindgen_test]
    fn test_rotate_rejects_short_rect() {
        let img = test_image(20, 20);
        let annotations = js_sys::Object::new();
        let rects = js_sys::Array::new();
        rects.push(&js_sys::Array::of3(
            &JsValue::from(1.0),
            &JsValue::from(2.0),
            &JsValue::from(3.0),
        ));
        js_sys::Reflect::set(&annotations, &"axis_rects".into(), &rects).unwrap();

        assert!(rotate(&img, annotations.into(), JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_rotate_image_90_degrees() {
        let img = test_image(100, 50);
        let result = rotate_image(&img, 90, true, false).unwrap();
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 100);
    }

    #[wasm_bindgen_test]
    fn test_rotate_image_rejects_bad_buffer() {
        let img = JsRgbImage::new(10, 10, vec![0u8; 10]);
        assert!(rotate_image(&img, 10, true, false).is_err());
    }
}
