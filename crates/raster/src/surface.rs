//! The drawing-surface contract.
//!
//! A [`Surface`] is an opaque 2D raster with known pixel dimensions. The
//! engine only issues stateless per-frame calls against it (clear, paths,
//! filled shapes, text) and never relies on state retained by the surface
//! between frames.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// A point in raster space: pixels, origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RasterPoint {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl RasterPoint {
    /// Creates a new raster point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by the given pixel offsets.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another raster point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Line style for [`Surface::stroke_path`].
///
/// # Example
///
/// ```rust
/// use raster::{Color, Stroke};
///
/// let trail = Stroke::new(Color::RED.with_alpha(77)).width(1.0).dashed(5.0, 5.0);
/// assert_eq!(trail.dash, Some((5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
    /// Optional dash pattern as `(on, off)` lengths in pixels.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    /// A solid one-pixel stroke in the given color.
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            width: 1.0,
            dash: None,
        }
    }

    /// Sets the line width.
    pub const fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets a dash pattern.
    pub const fn dashed(mut self, on: f64, off: f64) -> Self {
        self.dash = Some((on, off));
        self
    }
}

/// Font settings for [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Glyph height in pixels.
    pub size: f64,
    /// Text color.
    pub color: Color,
    /// Bold weight.
    pub bold: bool,
}

impl Font {
    /// A regular-weight font.
    pub const fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            bold: false,
        }
    }

    /// Switches to bold weight.
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(12.0, Color::BLACK)
    }
}

/// Encoded snapshot of a surface's current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded image data.
    pub bytes: Vec<u8>,
}

/// Errors raised by surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The requested dimensions cannot back a drawable surface.
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// The surface content could not be encoded.
    #[error("failed to encode frame: {0}")]
    Encode(String),
}

/// Result alias for surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// A 2D raster drawing target.
///
/// Implementations must tolerate coordinates outside the surface (they are
/// clipped) and must not panic on degenerate input such as empty paths or
/// zero-sized shapes.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Erases the whole surface.
    fn clear(&mut self);

    /// Strokes an open polyline through `points`.
    fn stroke_path(&mut self, points: &[RasterPoint], stroke: &Stroke);

    /// Fills a circle.
    fn fill_circle(&mut self, center: RasterPoint, radius: f64, color: Color);

    /// Fills an axis-aligned rectangle whose top-left corner is `origin`.
    fn fill_rect(&mut self, origin: RasterPoint, width: f64, height: f64, color: Color);

    /// Fills a closed polygon.
    fn fill_polygon(&mut self, points: &[RasterPoint], color: Color);

    /// Draws a text run with its baseline starting at `at`.
    fn fill_text(&mut self, text: &str, at: RasterPoint, font: &Font);

    /// Encodes the current content as an image.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Encode`] if the content cannot be encoded.
    fn encode(&self) -> Result<EncodedFrame>;

    /// Strokes a single segment.
    fn stroke_line(&mut self, from: RasterPoint, to: RasterPoint, stroke: &Stroke) {
        self.stroke_path(&[from, to], stroke);
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn stroke_path(&mut self, points: &[RasterPoint], stroke: &Stroke) {
        (**self).stroke_path(points, stroke);
    }

    fn fill_circle(&mut self, center: RasterPoint, radius: f64, color: Color) {
        (**self).fill_circle(center, radius, color);
    }

    fn fill_rect(&mut self, origin: RasterPoint, width: f64, height: f64, color: Color) {
        (**self).fill_rect(origin, width, height, color);
    }

    fn fill_polygon(&mut self, points: &[RasterPoint], color: Color) {
        (**self).fill_polygon(points, color);
    }

    fn fill_text(&mut self, text: &str, at: RasterPoint, font: &Font) {
        (**self).fill_text(text, at, font);
    }

    fn encode(&self) -> Result<EncodedFrame> {
        (**self).encode()
    }
}
