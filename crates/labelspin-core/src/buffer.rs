//! RGB pixel buffer handed in and out of the rotation engine.

use crate::error::RotateError;

/// An 8-bit, 3-channel image in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl RgbBuffer {
    /// Create a buffer, rejecting empty images and pixel data whose length
    /// does not describe exactly three channels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RotateError> {
        let buffer = Self {
            width,
            height,
            pixels,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Create a zero-filled (black) buffer.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 3],
        }
    }

    /// Create an RgbBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for encoding or drawing by the caller.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check that the buffer is non-empty and holds exactly 3 channels per pixel.
    pub fn validate(&self) -> Result<(), RotateError> {
        if self.width == 0 || self.height == 0 {
            return Err(RotateError::invalid(format!(
                "image must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize * 3;
        if self.pixels.len() != expected {
            return Err(RotateError::invalid(format!(
                "expected {} bytes for a {}x{} RGB image, got {}",
                expected,
                self.width,
                self.height,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Read the pixel at (x, y). Caller guarantees the coordinates are in bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
