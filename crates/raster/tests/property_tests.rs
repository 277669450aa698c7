#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

use proptest::prelude::*;
use raster::{Color, CoordinateTransform, PixelCanvas, RasterPoint, Stroke, Surface};

// =============================================================================
// Coordinate transform properties
// =============================================================================

proptest! {
    #[test]
    fn transform_roundtrips(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        scale in 1.0f64..200.0,
    ) {
        let t = CoordinateTransform::new(800.0, 600.0).with_scale(scale);
        let (bx, by) = t.to_physical(t.to_raster(x, y));
        prop_assert!((bx - x).abs() < 1e-6, "x {} -> {}", x, bx);
        prop_assert!((by - y).abs() < 1e-6, "y {} -> {}", y, by);
    }

    #[test]
    fn dynamic_scale_keeps_extent_on_surface(
        range_x in 0.01f64..5000.0,
        range_y in 0.01f64..5000.0,
        width in 200.0f64..2000.0,
        height in 200.0f64..2000.0,
    ) {
        let mut t = CoordinateTransform::new(width, height);
        prop_assert!(t.apply_dynamic_scale(range_x, range_y));

        let origin = t.to_raster(0.0, 0.0);
        let far = t.to_raster(range_x, range_y);
        for p in [origin, far] {
            prop_assert!(p.x >= t.padding_x - 1e-6 && p.x <= width - t.padding_x + 1e-6);
            prop_assert!(p.y >= t.padding_y - 1e-6 && p.y <= height - t.padding_y + 1e-6);
        }
    }

    #[test]
    fn higher_physical_y_is_higher_on_screen(
        y in -100.0f64..100.0,
        dy in 0.001f64..100.0,
    ) {
        let t = CoordinateTransform::new(800.0, 600.0);
        prop_assert!(t.to_raster(0.0, y + dy).y < t.to_raster(0.0, y).y);
    }
}

// =============================================================================
// Pixel canvas robustness
// =============================================================================

proptest! {
    #[test]
    fn canvas_never_panics_on_wild_coordinates(
        x0 in -1e6f64..1e6,
        y0 in -1e6f64..1e6,
        x1 in -1e4f64..1e4,
        y1 in -1e4f64..1e4,
        r in -50.0f64..50.0,
    ) {
        let mut canvas = PixelCanvas::new(64, 48).unwrap();
        canvas.stroke_line(
            RasterPoint::new(x0.clamp(-2000.0, 2000.0), y0.clamp(-2000.0, 2000.0)),
            RasterPoint::new(x1.clamp(-2000.0, 2000.0), y1.clamp(-2000.0, 2000.0)),
            &Stroke::new(Color::BLACK).width(3.0).dashed(4.0, 2.0),
        );
        canvas.fill_circle(RasterPoint::new(x1, y1), r, Color::RED);
        canvas.fill_rect(RasterPoint::new(x1, y1), r, r, Color::BLUE);
        canvas.fill_polygon(
            &[RasterPoint::new(x1, y1), RasterPoint::new(x0, y1), RasterPoint::new(x1, y0)],
            Color::GREEN,
        );
        let frame = canvas.encode().unwrap();
        prop_assert_eq!(frame.bytes.len(), b"P6\n64 48\n255\n".len() + 64 * 48 * 3);
    }
}
