//! A surface that records draw calls instead of rasterizing them.
//!
//! Useful for testing render passes without inspecting pixels.

use std::fmt::Write as _;

use crate::color::Color;
use crate::surface::{EncodedFrame, Font, RasterPoint, Result, Stroke, Surface, SurfaceError};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    StrokePath {
        points: Vec<RasterPoint>,
        stroke: Stroke,
    },
    FillCircle {
        center: RasterPoint,
        radius: f64,
        color: Color,
    },
    FillRect {
        origin: RasterPoint,
        width: f64,
        height: f64,
        color: Color,
    },
    FillPolygon {
        points: Vec<RasterPoint>,
        color: Color,
    },
    Text {
        text: String,
        at: RasterPoint,
        font: Font,
    },
}

/// A [`Surface`] that keeps every draw call of the current frame.
///
/// Each [`Surface::clear`] starts a new frame; the number of frames seen
/// so far is available from [`RecordingSurface::frames`].
///
/// # Example
///
/// ```rust
/// use raster::{Color, RasterPoint, RecordingSurface, Surface};
///
/// let mut surface = RecordingSurface::new(800, 600);
/// surface.clear();
/// surface.fill_circle(RasterPoint::new(10.0, 10.0), 4.0, Color::RED);
/// assert_eq!(surface.frames(), 1);
/// assert_eq!(surface.commands().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    /// Creates a recording surface with the given dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Draw calls of the current frame, starting with its `Clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started (calls to `clear`).
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Text runs of the current frame.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns true if any text run of the current frame contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Circles filled in the current frame.
    pub fn circles(&self) -> impl Iterator<Item = (RasterPoint, f64, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    /// Paths stroked in the current frame.
    pub fn paths(&self) -> impl Iterator<Item = (&[RasterPoint], &Stroke)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::StrokePath { points, stroke } => Some((points.as_slice(), stroke)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn stroke_path(&mut self, points: &[RasterPoint], stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            stroke: *stroke,
        });
    }

    fn fill_circle(&mut self, center: RasterPoint, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, origin: RasterPoint, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            width,
            height,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[RasterPoint], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: RasterPoint, font: &Font) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            font: *font,
        });
    }

    /// Encodes the current frame as a plain-text command listing.
    fn encode(&self) -> Result<EncodedFrame> {
        let mut out = String::new();
        for cmd in &self.commands {
            writeln!(out, "{cmd:?}").map_err(|e| SurfaceError::Encode(e.to_string()))?;
        }
        Ok(EncodedFrame {
            mime: "text/plain",
            bytes: out.into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_new_frame() {
        let mut s = RecordingSurface::new(10, 10);
        s.clear();
        s.fill_text("a", RasterPoint::default(), &Font::default());
        s.clear();
        assert_eq!(s.frames(), 2);
        assert_eq!(s.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_queries() {
        let mut s = RecordingSurface::new(10, 10);
        s.clear();
        s.fill_text("v=1.00m/s", RasterPoint::default(), &Font::default());
        s.fill_circle(RasterPoint::new(1.0, 2.0), 3.0, Color::RED);
        s.stroke_line(
            RasterPoint::default(),
            RasterPoint::new(5.0, 5.0),
            &Stroke::new(Color::BLACK),
        );
        assert!(s.has_text("v="));
        assert!(!s.has_text("missing"));
        assert_eq!(s.circles().count(), 1);
        assert_eq!(s.paths().next().unwrap().0.len(), 2);
    }

    #[test]
    fn test_encode_lists_commands() {
        let mut s = RecordingSurface::new(10, 10);
        s.clear();
        let frame = s.encode().unwrap();
        assert_eq!(frame.mime, "text/plain");
        assert_eq!(String::from_utf8(frame.bytes).unwrap(), "Clear\n");
    }
}
