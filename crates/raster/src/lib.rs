#![forbid(unsafe_code)]
// Pixel math converts freely between f64 coordinates and integer indices.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::float_cmp)]

//! # Raster
//!
//! Drawing-surface plumbing for the kinematics animation engine.
//!
//! Raster provides:
//! - **Surface**: the stateless drawing contract the engine renders through
//! - **PixelCanvas**: an RGB pixel buffer with alpha blending and PPM export
//! - **RecordingSurface**: a surface that records draw calls, for tests
//! - **CoordinateTransform**: meters (y-up) to pixels (y-down), with dynamic
//!   scaling to fit a predicted extent
//! - **Color**: RGBA colors parsed from hex strings, names, or RGB maps
//!
//! ## Example
//!
//! ```rust
//! use raster::{Color, CoordinateTransform, PixelCanvas, Surface};
//!
//! let mut canvas = PixelCanvas::new(800, 600).unwrap();
//! let mut transform = CoordinateTransform::new(800.0, 600.0);
//!
//! // Fit a 40 m x 10 m trajectory into the drawable area
//! transform.apply_dynamic_scale(40.0, 10.0);
//!
//! let ball = transform.to_raster(20.0, 10.0);
//! canvas.fill_circle(ball, 8.0, Color::RED);
//! let frame = canvas.encode().unwrap();
//! assert!(frame.bytes.starts_with(b"P6"));
//! ```

mod canvas;
mod color;
mod recording;
mod surface;
mod transform;

pub use canvas::{MAX_DIMENSION, PixelCanvas, TextRun};
pub use color::{Color, ParseColorError};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{EncodedFrame, Font, RasterPoint, Result, Stroke, Surface, SurfaceError};
pub use transform::{CoordinateTransform, DEFAULT_PADDING, DEFAULT_SCALE};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::surface::{Font, RasterPoint, Stroke, Surface};
    pub use crate::transform::CoordinateTransform;
}
