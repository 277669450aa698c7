//! An in-memory RGB pixel surface.
//!
//! [`PixelCanvas`] rasterizes paths and filled shapes into an opaque pixel
//! buffer with alpha blending and encodes frames as binary PPM (`P6`).
//! Glyph rasterization is not performed: text runs are kept alongside the
//! pixel buffer and can be inspected with [`PixelCanvas::text_runs`].

use tracing::trace;

use crate::color::Color;
use crate::surface::{EncodedFrame, Font, RasterPoint, Result, Stroke, Surface, SurfaceError};

/// Largest accepted edge length in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// A text run recorded by [`PixelCanvas::fill_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The text drawn.
    pub text: String,
    /// Baseline start.
    pub at: RasterPoint,
    /// Font used.
    pub font: Font,
}

/// A pixel buffer implementing [`Surface`].
///
/// # Example
///
/// ```rust
/// use raster::{Color, PixelCanvas, RasterPoint, Surface};
///
/// let mut canvas = PixelCanvas::new(40, 30).unwrap();
/// canvas.fill_circle(RasterPoint::new(20.0, 15.0), 5.0, Color::RED);
/// assert_eq!(canvas.pixel(20, 15), Some(Color::RED));
/// assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
/// ```
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<Color>,
    text: Vec<TextRun>,
}

impl PixelCanvas {
    /// Creates a white canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidDimensions`] if either edge is zero or
    /// exceeds [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_background(width, height, Color::WHITE)
    }

    /// Creates a canvas cleared to `background` (alpha is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidDimensions`] if either edge is zero or
    /// exceeds [`MAX_DIMENSION`].
    pub fn with_background(width: u32, height: u32, background: Color) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let background = background.with_alpha(255);
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
            text: Vec::new(),
        })
    }

    /// Returns the color of a pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Text runs drawn since the last [`Surface::clear`].
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    /// Number of pixels that differ from the background.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != self.background).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        let dst = self.pixels[idx];
        self.pixels[idx] = color.over(dst);
    }

    fn stamp(&mut self, center: RasterPoint, width: f64, color: Color) {
        if width <= 1.5 {
            self.blend(center.x.floor() as i64, center.y.floor() as i64, color);
        } else {
            self.fill_circle(center, width / 2.0, color);
        }
    }

    fn stroke_segment(
        &mut self,
        from: RasterPoint,
        to: RasterPoint,
        stroke: &Stroke,
        travelled: &mut f64,
    ) {
        let length = from.distance(to);
        if !length.is_finite() {
            return;
        }
        let steps = (length * 2.0).ceil().max(1.0) as usize;
        let step_len = length / steps as f64;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = RasterPoint::new(
                (to.x - from.x).mul_add(t, from.x),
                (to.y - from.y).mul_add(t, from.y),
            );
            let visible = match stroke.dash {
                Some((on, off)) if on > 0.0 && on + off > 0.0 => {
                    (*travelled + step_len * i as f64) % (on + off) < on
                }
                _ => true,
            };
            if visible {
                self.stamp(p, stroke.width, stroke.color);
            }
        }
        *travelled += length;
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.text.clear();
    }

    fn stroke_path(&mut self, points: &[RasterPoint], stroke: &Stroke) {
        let mut travelled = 0.0;
        for pair in points.windows(2) {
            self.stroke_segment(pair[0], pair[1], stroke, &mut travelled);
        }
    }

    fn fill_circle(&mut self, center: RasterPoint, radius: f64, color: Color) {
        if !(radius.is_finite() && center.x.is_finite() && center.y.is_finite()) || radius <= 0.0 {
            return;
        }
        let min_x = (center.x - radius).floor() as i64;
        let max_x = (center.x + radius).ceil() as i64;
        let min_y = (center.y - radius).floor() as i64;
        let max_y = (center.y + radius).ceil() as i64;
        let r2 = radius * radius;
        for y in min_y.max(0)..=max_y.min(i64::from(self.height) - 1) {
            for x in min_x.max(0)..=max_x.min(i64::from(self.width) - 1) {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                if dx.mul_add(dx, dy * dy) <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn fill_rect(&mut self, origin: RasterPoint, width: f64, height: f64, color: Color) {
        if !(origin.x.is_finite() && origin.y.is_finite() && width.is_finite() && height.is_finite())
        {
            return;
        }
        let x0 = origin.x.min(origin.x + width).round() as i64;
        let x1 = origin.x.max(origin.x + width).round() as i64;
        let y0 = origin.y.min(origin.y + height).round() as i64;
        let y1 = origin.y.max(origin.y + height).round() as i64;
        for y in y0.max(0)..y1.min(i64::from(self.height)) {
            for x in x0.max(0)..x1.min(i64::from(self.width)) {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[RasterPoint], color: Color) {
        if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let y_start = (min_y.floor() as i64).max(0);
        let y_end = (max_y.ceil() as i64).min(i64::from(self.height) - 1);

        let mut crossings = Vec::with_capacity(points.len());
        for y in y_start..=y_end {
            let scan = y as f64 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                    let t = (scan - a.y) / (b.y - a.y);
                    crossings.push((b.x - a.x).mul_add(t, a.x));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                let x_start = (span[0] - 0.5).ceil() as i64;
                let x_end = (span[1] - 0.5).floor() as i64;
                for x in x_start.max(0)..=x_end.min(i64::from(self.width) - 1) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, at: RasterPoint, font: &Font) {
        self.text.push(TextRun {
            text: text.to_string(),
            at,
            font: *font,
        });
    }

    fn encode(&self) -> Result<EncodedFrame> {
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);
        let mut bytes = Vec::with_capacity(header.len() + self.pixels.len() * 3);
        bytes.extend_from_slice(header.as_bytes());
        for px in &self.pixels {
            bytes.extend_from_slice(&[px.r, px.g, px.b]);
        }
        trace!(
            canvas.width = self.width,
            canvas.height = self.height,
            bytes = bytes.len(),
            "Encoded frame"
        );
        Ok(EncodedFrame {
            mime: "image/x-portable-pixmap",
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> PixelCanvas {
        PixelCanvas::new(100, 80).unwrap()
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert!(PixelCanvas::new(0, 10).is_err());
        assert!(PixelCanvas::new(10, 0).is_err());
        assert!(PixelCanvas::new(MAX_DIMENSION + 1, 10).is_err());
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut c = canvas();
        c.fill_rect(RasterPoint::new(-10.0, -10.0), 20.0, 20.0, Color::BLUE);
        assert_eq!(c.pixel(0, 0), Some(Color::BLUE));
        assert_eq!(c.pixel(9, 9), Some(Color::BLUE));
        assert_eq!(c.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(c.painted_pixels(), 100);
    }

    #[test]
    fn test_solid_line_paints_endpoints() {
        let mut c = canvas();
        c.stroke_line(
            RasterPoint::new(10.5, 10.5),
            RasterPoint::new(60.5, 10.5),
            &Stroke::new(Color::BLACK),
        );
        assert_eq!(c.pixel(10, 10), Some(Color::BLACK));
        assert_eq!(c.pixel(60, 10), Some(Color::BLACK));
        assert_eq!(c.pixel(35, 10), Some(Color::BLACK));
        assert_eq!(c.pixel(35, 11), Some(Color::WHITE));
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let mut solid = canvas();
        let mut dashed = canvas();
        let from = RasterPoint::new(0.5, 40.5);
        let to = RasterPoint::new(99.5, 40.5);
        solid.stroke_line(from, to, &Stroke::new(Color::BLACK));
        dashed.stroke_line(from, to, &Stroke::new(Color::BLACK).dashed(5.0, 5.0));
        assert!(dashed.painted_pixels() > 0);
        assert!(dashed.painted_pixels() < solid.painted_pixels());
    }

    #[test]
    fn test_polygon_fill_triangle() {
        let mut c = canvas();
        c.fill_polygon(
            &[
                RasterPoint::new(10.0, 10.0),
                RasterPoint::new(50.0, 10.0),
                RasterPoint::new(10.0, 50.0),
            ],
            Color::GREEN,
        );
        assert_eq!(c.pixel(15, 15), Some(Color::GREEN));
        assert_eq!(c.pixel(45, 45), Some(Color::WHITE));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut c = canvas();
        c.fill_circle(RasterPoint::new(50.0, 40.0), 4.0, Color::RED.with_alpha(128));
        let px = c.pixel(50, 40).unwrap();
        assert_eq!(px.r, 255);
        assert!(px.g > 100 && px.g < 140);
    }

    #[test]
    fn test_clear_resets_pixels_and_text() {
        let mut c = canvas();
        c.fill_circle(RasterPoint::new(50.0, 40.0), 10.0, Color::RED);
        c.fill_text("t = 0.00 s", RasterPoint::new(10.0, 20.0), &Font::default());
        assert_eq!(c.text_runs().len(), 1);
        c.clear();
        assert_eq!(c.painted_pixels(), 0);
        assert!(c.text_runs().is_empty());
    }

    #[test]
    fn test_encode_ppm_header_and_size() {
        let c = PixelCanvas::new(3, 2).unwrap();
        let frame = c.encode().unwrap();
        assert_eq!(frame.mime, "image/x-portable-pixmap");
        assert!(frame.bytes.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(frame.bytes.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let mut c = canvas();
        c.stroke_path(&[], &Stroke::new(Color::BLACK));
        c.stroke_path(&[RasterPoint::new(1.0, 1.0)], &Stroke::new(Color::BLACK));
        c.fill_circle(RasterPoint::new(f64::NAN, 1.0), 3.0, Color::RED);
        c.fill_circle(RasterPoint::new(1.0, 1.0), -3.0, Color::RED);
        c.fill_polygon(&[RasterPoint::new(1.0, 1.0)], Color::RED);
        assert_eq!(c.painted_pixels(), 0);
    }
}
