//! Physical-to-raster coordinate mapping.
//!
//! Physical space is measured in meters with y pointing up and the origin
//! at the problem's reference point. Raster space is measured in pixels
//! with y pointing down and the origin at the top-left corner:
//!
//! ```text
//!   px = x * scale + padding_x
//!   py = height - y * scale - padding_y
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::surface::RasterPoint;

/// Default pixels per meter.
pub const DEFAULT_SCALE: f64 = 50.0;

/// Default axis padding in pixels.
pub const DEFAULT_PADDING: f64 = 50.0;

/// Maps physical coordinates onto a surface of known size.
///
/// # Example
///
/// ```rust
/// use raster::CoordinateTransform;
///
/// let t = CoordinateTransform::new(800.0, 600.0);
/// let p = t.to_raster(2.0, 1.0);
/// assert_eq!(p.x, 150.0);
/// assert_eq!(p.y, 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    /// Pixels per meter.
    pub scale: f64,
    /// Horizontal offset of the physical origin from the left edge.
    pub padding_x: f64,
    /// Vertical offset of the physical origin from the bottom edge.
    pub padding_y: f64,
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
}

impl CoordinateTransform {
    /// Creates a transform with the default scale and padding.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            scale: DEFAULT_SCALE,
            padding_x: DEFAULT_PADDING,
            padding_y: DEFAULT_PADDING,
            width,
            height,
        }
    }

    /// Sets the static scale.
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the axis padding.
    pub const fn with_padding(mut self, padding_x: f64, padding_y: f64) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    /// Maps a physical point to raster space.
    #[inline]
    pub fn to_raster(&self, x: f64, y: f64) -> RasterPoint {
        RasterPoint::new(
            x.mul_add(self.scale, self.padding_x),
            self.height - y.mul_add(self.scale, self.padding_y),
        )
    }

    /// Maps a raster point back to physical space.
    #[inline]
    pub fn to_physical(&self, p: RasterPoint) -> (f64, f64) {
        (
            (p.x - self.padding_x) / self.scale,
            (self.height - p.y - self.padding_y) / self.scale,
        )
    }

    /// Converts a physical length in meters to pixels.
    #[inline]
    pub fn length_to_raster(&self, meters: f64) -> f64 {
        meters * self.scale
    }

    /// Width available for content once padding is removed on both sides.
    pub fn drawable_width(&self) -> f64 {
        2.0f64.mul_add(-self.padding_x, self.width)
    }

    /// Height available for content once padding is removed on both sides.
    pub fn drawable_height(&self) -> f64 {
        2.0f64.mul_add(-self.padding_y, self.height)
    }

    /// Physical coordinates of the middle of the drawable area.
    pub fn drawable_center(&self) -> (f64, f64) {
        (
            self.drawable_width() / 2.0 / self.scale,
            self.drawable_height() / 2.0 / self.scale,
        )
    }

    /// Computes a scale that fits `max_range_x` by `max_range_y` meters
    /// into the drawable area.
    ///
    /// Returns `None` when either range is zero, negative or non-finite,
    /// or when the padding leaves no drawable area; the static scale should
    /// then be kept.
    pub fn compute_dynamic_scale(&self, max_range_x: f64, max_range_y: f64) -> Option<f64> {
        let usable = |range: f64| range.is_finite() && range > 0.0;
        if !usable(max_range_x) || !usable(max_range_y) {
            return None;
        }
        let (w, h) = (self.drawable_width(), self.drawable_height());
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        let scale = (w / max_range_x).min(h / max_range_y);
        (scale.is_finite() && scale > 0.0).then_some(scale)
    }

    /// Replaces the scale with [`Self::compute_dynamic_scale`] when it is
    /// defined. Returns true if the scale changed.
    pub fn apply_dynamic_scale(&mut self, max_range_x: f64, max_range_y: f64) -> bool {
        match self.compute_dynamic_scale(max_range_x, max_range_y) {
            Some(scale) => {
                debug!(
                    transform.scale_from = self.scale,
                    transform.scale_to = scale,
                    extent.x = max_range_x,
                    extent.y = max_range_y,
                    "Dynamic scale applied"
                );
                self.scale = scale;
                true
            }
            None => {
                debug!(
                    extent.x = max_range_x,
                    extent.y = max_range_y,
                    "Dynamic scale skipped"
                );
                false
            }
        }
    }
}
