//! Labelspin WASM - WebAssembly bindings for Labelspin
//!
//! This crate exposes the labelspin-core rotation engine to browser-based
//! labeling tools, so an augmentation can be previewed with its labels before
//! a dataset is exported.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGB pixel buffers
//! - `rotate` - Rotation bindings (image plus annotations)
//!
//! # Usage
//!
//! ```typescript
//! import init, { rotate, JsRgbImage } from '@labelspin/wasm';
//!
//! await init();
//!
//! const image = new JsRgbImage(width, height, rgbBytes);
//! const result = rotate(image, { points: [[113, 127]] }, { angle: 15 });
//! console.log(result.angle, result.annotations().points);
//! ```

use wasm_bindgen::prelude::*;

mod rotate;
mod types;

pub use rotate::{project_point, rotate, rotate_image, JsRotation};
pub use types::JsRgbImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
