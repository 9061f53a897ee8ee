//! WASM-compatible wrapper types for image data.

use labelspin_core::RgbBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// The pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsRgbImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRgbImage {
    /// Create a new JsRgbImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// The buffer is validated when it is rotated, not here.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRgbImage {
        JsRgbImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsRgbImage {
    pub(crate) fn from_buffer(buffer: RgbBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Convert to a core RgbBuffer. Clones the pixel data.
    pub(crate) fn to_buffer(&self) -> RgbBuffer {
        RgbBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}
