//! The stateless render pass: one call draws one complete frame.

use kinematics::{Decoration, Force, ForceKind, Model, Motion, Shape, Vector};
use raster::{Color, CoordinateTransform, Font, RasterPoint, Stroke, Surface};

use crate::clock::Trail;
use crate::config::AnimationConfig;

const GRID_MIN_SPACING: f64 = 20.0;
const LABEL_MIN_SPACING: f64 = 40.0;
const ARROW_HEAD: f64 = 8.0;
const CIRCLE_SEGMENTS: usize = 72;
/// Upper bound on grid lines or axis ticks drawn per axis.
const MAX_LINES: usize = 512;

const VELOCITY_COLOR: Color = Color::BLUE;
const HORIZONTAL_COLOR: Color = Color::rgb(0, 160, 0);
const VERTICAL_COLOR: Color = Color::ORANGE;
const KEY_POINT_COLOR: Color = Color::ORANGE;

/// Everything a frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub model: &'a Model,
    pub transform: &'a CoordinateTransform,
    pub trail: &'a Trail,
    pub config: &'a AnimationConfig,
    /// Whether the run has ended (shows the results panel).
    pub ended: bool,
}

/// Draws a complete frame onto `surface`.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let width = f64::from(surface.width());
    let height = f64::from(surface.height());
    let config = frame.config;

    surface.clear();
    if config.show_grid {
        draw_grid(surface, frame.transform, width, height);
    }
    if config.show_axes {
        draw_axes(
            surface,
            frame.transform,
            width,
            frame.model.kind().is_one_dimensional(),
        );
    }
    if config.show_trail {
        draw_trail(surface, frame);
    }
    if config.show_key_points {
        draw_key_points(surface, frame);
    }
    if let Some(decoration) = frame.model.motion().decoration() {
        draw_decoration(surface, frame.transform, decoration);
    }
    draw_object(surface, frame);
    draw_velocity(surface, frame);
    if config.show_forces {
        draw_forces(surface, frame);
    }
    surface.fill_text(
        &format!("t={:.2}s", frame.model.elapsed()),
        RasterPoint::new(10.0, 20.0),
        &Font::new(14.0, Color::BLACK),
    );
    if frame.ended {
        if let Motion::Projectile(projectile) = frame.model.motion() {
            draw_results_panel(surface, width, projectile);
        }
    }
}

/// Smallest "nice" step in meters (1, 2 or 5 times a power of ten) whose
/// pixel spacing is at least `min_px`. Infinite when no finite step exists.
#[allow(clippy::cast_possible_truncation)]
pub fn tick_step(scale: f64, min_px: f64) -> f64 {
    let raw = min_px / scale;
    if !raw.is_finite() || raw <= 0.0 {
        return f64::INFINITY;
    }
    let exp = raw.log10().floor() as i32;
    for exp in [exp, exp + 1] {
        for factor in [1.0, 2.0, 5.0] {
            let step = decade(factor, exp);
            if step * scale >= min_px {
                return step;
            }
        }
    }
    decade(1.0, exp + 2)
}

/// `factor * 10^exp`, dividing for negative exponents so steps like 0.1
/// come out as the nearest double.
fn decade(factor: f64, exp: i32) -> f64 {
    if exp >= 0 {
        factor * 10f64.powi(exp)
    } else {
        factor / 10f64.powi(-exp)
    }
}

/// Pixel offsets `start, start + spacing, ...` up to `limit`, capped at
/// [`MAX_LINES`]. Empty when the spacing is below a pixel or not finite.
fn line_positions(start: f64, spacing: f64, limit: f64) -> impl Iterator<Item = f64> {
    let usable = spacing.is_finite() && spacing >= 1.0 && start.is_finite();
    let count = if usable { MAX_LINES } else { 0 };
    (0..count)
        .map(move |i| start + i as f64 * spacing)
        .take_while(move |p| *p <= limit)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 {
        return format!("{value:.0}");
    }
    let decimals = (-(step.log10() + 1e-9).floor()).clamp(1.0, 12.0) as usize;
    format!("{value:.decimals$}")
}

fn draw_grid<S: Surface + ?Sized>(
    surface: &mut S,
    transform: &CoordinateTransform,
    width: f64,
    height: f64,
) {
    let spacing = tick_step(transform.scale, GRID_MIN_SPACING) * transform.scale;
    let stroke = Stroke::new(Color::GRID).width(0.5);
    let origin = transform.to_raster(0.0, 0.0);

    for x in line_positions(origin.x.rem_euclid(spacing), spacing, width) {
        surface.stroke_line(RasterPoint::new(x, 0.0), RasterPoint::new(x, height), &stroke);
    }
    for y in line_positions(origin.y.rem_euclid(spacing), spacing, height) {
        surface.stroke_line(RasterPoint::new(0.0, y), RasterPoint::new(width, y), &stroke);
    }
}

fn draw_axes<S: Surface + ?Sized>(
    surface: &mut S,
    transform: &CoordinateTransform,
    width: f64,
    one_dimensional: bool,
) {
    let stroke = Stroke::new(Color::BLACK).width(1.5);
    let font = Font::new(11.0, Color::BLACK);
    let origin = transform.to_raster(0.0, 0.0);
    let step = tick_step(transform.scale, LABEL_MIN_SPACING);
    let spacing = step * transform.scale;

    let x_end = RasterPoint::new(width - 10.0, origin.y);
    surface.stroke_line(origin, x_end, &stroke);
    draw_head(surface, origin, x_end, Color::BLACK);
    surface.fill_text("x (m)", x_end.offset(-30.0, 20.0), &font);

    let x_ticks = line_positions(origin.x + spacing, spacing, width - 30.0);
    for (k, px) in (1_u32..).zip(x_ticks) {
        surface.stroke_line(
            RasterPoint::new(px, origin.y - 4.0),
            RasterPoint::new(px, origin.y + 4.0),
            &stroke,
        );
        let label = format_tick(f64::from(k) * step, step);
        surface.fill_text(&label, RasterPoint::new(px - 6.0, origin.y + 16.0), &font);
    }
    surface.fill_text("0", origin.offset(-12.0, 16.0), &font);

    if one_dimensional {
        return;
    }

    let y_end = RasterPoint::new(origin.x, 10.0);
    surface.stroke_line(origin, y_end, &stroke);
    draw_head(surface, origin, y_end, Color::BLACK);
    surface.fill_text("y (m)", y_end.offset(8.0, 10.0), &font);

    // Measured upward from the origin, so positions are distances above it.
    let y_ticks = line_positions(spacing, spacing, origin.y - 30.0);
    for (k, up) in (1_u32..).zip(y_ticks) {
        let py = origin.y - up;
        surface.stroke_line(
            RasterPoint::new(origin.x - 4.0, py),
            RasterPoint::new(origin.x + 4.0, py),
            &stroke,
        );
        let label = format_tick(f64::from(k) * step, step);
        surface.fill_text(&label, RasterPoint::new(origin.x - 34.0, py + 4.0), &font);
    }
}

fn draw_trail<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    if frame.trail.len() < 2 {
        return;
    }
    let points: Vec<RasterPoint> = frame
        .trail
        .points()
        .map(|p| frame.transform.to_raster(p.x, p.y))
        .collect();
    let stroke = Stroke::new(Color::RED.with_alpha(77)).width(2.0).dashed(5.0, 5.0);
    surface.stroke_path(&points, &stroke);
}

fn draw_key_points<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let font = Font::new(11.0, Color::BLACK);
    for key in frame.model.key_points() {
        let at = frame.transform.to_raster(key.position.x, key.position.y);
        surface.fill_circle(at, 5.0, KEY_POINT_COLOR);
        surface.fill_text(
            &format!("{} h={:.2}m t={:.2}s", key.label, key.data.height, key.data.time),
            at.offset(8.0, -8.0),
            &font,
        );
    }
}

fn draw_decoration<S: Surface + ?Sized>(
    surface: &mut S,
    transform: &CoordinateTransform,
    decoration: Decoration,
) {
    match decoration {
        Decoration::CirclePath { center, radius } => {
            let path: Vec<RasterPoint> = (0..=CIRCLE_SEGMENTS)
                .map(|i| {
                    let theta = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                    transform.to_raster(
                        center.x + radius * theta.cos(),
                        center.y + radius * theta.sin(),
                    )
                })
                .collect();
            surface.stroke_path(&path, &Stroke::new(Color::GRAY).width(1.0).dashed(4.0, 4.0));
            surface.fill_circle(transform.to_raster(center.x, center.y), 5.0, Color::GRAY);
        }
    }
}

fn draw_object<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let object = frame.model.object();
    let at = frame.transform.to_raster(object.position.x, object.position.y);
    match object.shape {
        Shape::Circle { radius } => surface.fill_circle(at, radius, object.color),
        Shape::Rectangle { width, height } => surface.fill_rect(
            at.offset(-width / 2.0, -height / 2.0),
            width,
            height,
            object.color,
        ),
    }
    let (hx, hy) = object.shape.half_extent();
    surface.fill_text(
        &format!("m={}kg", trim_number(object.mass)),
        at.offset(hx + 4.0, -hy - 4.0),
        &Font::new(11.0, Color::BLACK),
    );
}

fn draw_velocity<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let object = frame.model.object();
    let at = frame.transform.to_raster(object.position.x, object.position.y);
    let k = frame.transform.scale * frame.config.vector_scale;
    let v = object.velocity;

    if frame.config.show_velocity {
        draw_arrow(surface, at, v * k, VELOCITY_COLOR, &format!("v={:.2}m/s", v.magnitude()));
    }
    if frame.config.show_components {
        draw_arrow(
            surface,
            at,
            Vector::new(v.x, 0.0) * k,
            HORIZONTAL_COLOR,
            &format!("vx={:.2}m/s", v.x),
        );
        draw_arrow(
            surface,
            at,
            Vector::new(0.0, v.y) * k,
            VERTICAL_COLOR,
            &format!("vy={:.2}m/s", v.y),
        );
    }
}

fn force_color(kind: ForceKind) -> Color {
    match kind {
        ForceKind::Applied => Color::BLUE,
        ForceKind::Friction => Color::RED,
        ForceKind::Normal => Color::GREEN,
        ForceKind::Gravity => Color::ORANGE,
        ForceKind::Centripetal => Color::PURPLE,
    }
}

fn draw_forces<S: Surface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let object = frame.model.object();
    let at = frame.transform.to_raster(object.position.x, object.position.y);
    let k = frame.transform.scale * frame.config.vector_scale;
    for Force { kind, vector } in frame.model.describe_forces() {
        let label = format!("{}={:.2}N", kind.symbol(), vector.magnitude());
        draw_arrow(surface, at, vector * k, force_color(kind), &label);
    }
}

/// Draws an arrow from `from` along a physical-direction vector already
/// scaled to pixels (y up). Arrows shorter than a pixel are skipped.
fn draw_arrow<S: Surface + ?Sized>(
    surface: &mut S,
    from: RasterPoint,
    pixels: Vector,
    color: Color,
    label: &str,
) {
    if pixels.magnitude() < 1.0 || !pixels.is_finite() {
        return;
    }
    let tip = from.offset(pixels.x, -pixels.y);
    surface.stroke_line(from, tip, &Stroke::new(color).width(2.0));
    draw_head(surface, from, tip, color);
    surface.fill_text(label, tip.offset(5.0, -5.0), &Font::new(11.0, color));
}

fn draw_head<S: Surface + ?Sized>(surface: &mut S, from: RasterPoint, tip: RasterPoint, color: Color) {
    let (dx, dy) = (tip.x - from.x, tip.y - from.y);
    let len = dx.hypot(dy);
    if len < f64::EPSILON {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let base = tip.offset(-ux * ARROW_HEAD, -uy * ARROW_HEAD);
    let half = ARROW_HEAD / 2.0;
    surface.fill_polygon(
        &[
            tip,
            base.offset(-uy * half, ux * half),
            base.offset(uy * half, -ux * half),
        ],
        color,
    );
}

fn draw_results_panel<S: Surface + ?Sized>(
    surface: &mut S,
    width: f64,
    projectile: &kinematics::Projectile,
) {
    let s = projectile.summary();
    let origin = RasterPoint::new(width - 220.0, 10.0);
    surface.fill_rect(origin, 210.0, 116.0, Color::WHITE.with_alpha(220));
    let lines = [
        format!("v0={:.2}m/s", s.v0),
        format!("angle={:.1}deg", s.angle),
        format!("h_max={:.2}m", s.h_max),
        format!("t_max={:.2}s", s.t_max),
        format!("t_land={:.2}s", s.t_land),
        format!("range={:.2}m", s.range),
    ];
    let font = Font::new(12.0, Color::BLACK);
    for (i, line) in lines.iter().enumerate() {
        surface.fill_text(line, origin.offset(10.0, 18.0 * (i as f64 + 1.0)), &font);
    }
}

/// Formats with up to two decimals, dropping trailing zeros.
fn trim_number(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
