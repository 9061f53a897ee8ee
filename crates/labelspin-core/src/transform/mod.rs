//! The resolved rotation transform and everything parameterized by it.
//!
//! # Pipeline
//!
//! For each call to [`crate::rotate`]:
//! 1. The angle spec is resolved to an integer angle in `[0, 360)`
//! 2. [`ResolvedTransform::new`] fixes the output canvas and padding
//! 3. Every annotation vertex goes through [`ResolvedTransform::project_point`]
//! 4. The pixels are resampled by [`rotate_raster`]
//!
//! The transform is an immutable value; nothing here holds state between calls.

mod canvas;
mod project;
mod raster;

pub use canvas::{canvas_size, ResolvedTransform};
pub use raster::{rotate_raster, InterpolationFilter};
