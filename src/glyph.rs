//! Drawing of a single symbol: letter/digit badges, color swatches, and the
//! eight geometric primitives.
//!
//! `vello_cpu` exposes fills only, so outlines are drawn as a silhouette in
//! the outline color with the fill shape inset inside it.

use std::f64::consts::PI;

use kurbo::{BezPath, Circle, Point, Rect, Shape as _};

use crate::{
    error::SymrowResult,
    surface::Surface,
    text::TextEngine,
    vocab::{Glyph, ShapeKind},
};

/// Outline width for badges and shapes.
const OUTLINE_W: f64 = 3.0;
/// Outline width for color swatches and heart lobes.
const THIN_OUTLINE_W: f64 = 2.0;
/// Badge glyph font size relative to the symbol size.
const BADGE_FONT_SCALE: f64 = 0.5;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const LETTER_FILL: [u8; 3] = [100, 150, 250];
const LETTER_OUTLINE: [u8; 3] = [50, 100, 200];
const DIGIT_FILL: [u8; 3] = [250, 150, 100];
const DIGIT_OUTLINE: [u8; 3] = [200, 100, 50];

/// Draw one symbol with its top-left corner at `(x, y)` in a `size`-pixel
/// square cell.
pub fn draw_glyph(
    surface: &mut Surface,
    text: &mut TextEngine,
    glyph: Glyph,
    x: f64,
    y: f64,
    size: f64,
) -> SymrowResult<()> {
    let cx = x + size / 2.0;
    let cy = y + size / 2.0;
    let radius = size / 2.0;

    match glyph {
        Glyph::Letter(c) => {
            fill_outlined_circle(surface, cx, cy, radius, OUTLINE_W, LETTER_FILL, LETTER_OUTLINE);
            draw_badge_char(surface, text, c, cx, cy, size)?;
        }
        Glyph::Digit(c) => {
            let rect = Rect::new(cx - radius, cy - radius, cx + radius, cy + radius);
            surface.fill_rect(rect, DIGIT_OUTLINE);
            surface.fill_rect(rect.inset(-OUTLINE_W), DIGIT_FILL);
            draw_badge_char(surface, text, c, cx, cy, size)?;
        }
        Glyph::ColorSwatch(rgb) => {
            let rect = Rect::new(x, y, x + size, y + size);
            surface.fill_rect(rect, BLACK);
            surface.fill_rect(rect.inset(-THIN_OUTLINE_W), rgb);
        }
        Glyph::Shape(kind) => draw_shape(surface, kind, cx, cy, radius),
    }
    Ok(())
}

fn draw_badge_char(
    surface: &mut Surface,
    text: &mut TextEngine,
    c: char,
    cx: f64,
    cy: f64,
    size: f64,
) -> SymrowResult<()> {
    let mut buf = [0u8; 4];
    let s = c.encode_utf8(&mut buf);
    text.draw_centered(surface, s, (size * BADGE_FONT_SCALE) as f32, cx, cy, WHITE)
}

fn draw_shape(surface: &mut Surface, kind: ShapeKind, cx: f64, cy: f64, radius: f64) {
    let fill = kind.fill_rgb();
    let outline = kind.outline_rgb();

    match kind {
        ShapeKind::Circle => {
            fill_outlined_circle(surface, cx, cy, radius, OUTLINE_W, fill, outline);
        }
        ShapeKind::Square => {
            let rect = Rect::new(cx - radius, cy - radius, cx + radius, cy + radius);
            surface.fill_rect(rect, outline);
            surface.fill_rect(rect.inset(-OUTLINE_W), fill);
        }
        ShapeKind::Triangle => {
            fill_outlined_polygon(surface, &triangle_points(cx, cy, radius), fill, outline);
        }
        ShapeKind::Diamond => {
            fill_outlined_polygon(surface, &diamond_points(cx, cy, radius), fill, outline);
        }
        ShapeKind::Star => {
            fill_outlined_polygon(surface, &star_points(cx, cy, radius), fill, outline);
        }
        ShapeKind::Pentagon => {
            fill_outlined_polygon(surface, &regular_polygon_points(cx, cy, radius, 5), fill, outline);
        }
        ShapeKind::Hexagon => {
            fill_outlined_polygon(surface, &regular_polygon_points(cx, cy, radius, 6), fill, outline);
        }
        ShapeKind::Heart => draw_heart(surface, cx, cy, radius),
    }
}

fn fill_outlined_circle(
    surface: &mut Surface,
    cx: f64,
    cy: f64,
    radius: f64,
    outline_w: f64,
    fill: [u8; 3],
    outline: [u8; 3],
) {
    let tol = 0.1;
    surface.fill_path(&Circle::new(Point::new(cx, cy), radius).to_path(tol), outline);
    surface.fill_path(
        &Circle::new(Point::new(cx, cy), (radius - outline_w).max(0.0)).to_path(tol),
        fill,
    );
}

/// Fill the polygon in the outline color, then again in the fill color after
/// shrinking every vertex toward the centroid by the outline width.
fn fill_outlined_polygon(surface: &mut Surface, points: &[Point], fill: [u8; 3], outline: [u8; 3]) {
    surface.fill_path(&polygon_path(points), outline);
    surface.fill_path(&polygon_path(&shrink_toward_centroid(points, OUTLINE_W)), fill);
}

fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

fn shrink_toward_centroid(points: &[Point], by: f64) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    points
        .iter()
        .map(|p| {
            let dx = p.x - cx;
            let dy = p.y - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= by {
                Point::new(cx, cy)
            } else {
                let scale = (dist - by) / dist;
                Point::new(cx + dx * scale, cy + dy * scale)
            }
        })
        .collect()
}

fn triangle_points(cx: f64, cy: f64, radius: f64) -> Vec<Point> {
    vec![
        Point::new(cx, cy - radius),
        Point::new(cx - radius, cy + radius),
        Point::new(cx + radius, cy + radius),
    ]
}

fn diamond_points(cx: f64, cy: f64, radius: f64) -> Vec<Point> {
    vec![
        Point::new(cx, cy - radius),
        Point::new(cx + radius, cy),
        Point::new(cx, cy + radius),
        Point::new(cx - radius, cy),
    ]
}

/// Vertices evenly spaced on the circumcircle, starting at the top.
fn regular_polygon_points(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64) / (sides as f64) - PI / 2.0;
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// Five-pointed star: ten vertices 36 degrees apart starting at the top,
/// alternating between the outer radius and 0.4x the outer radius.
fn star_points(cx: f64, cy: f64, radius: f64) -> Vec<Point> {
    (0..10)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64) / 10.0 - PI / 2.0;
            let r = if i % 2 == 0 { radius } else { radius * 0.4 };
            Point::new(cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

/// Heart silhouette: two circular lobes of radius `radius / 2` side by side
/// and a downward triangle spanning the full width.
fn draw_heart(surface: &mut Surface, cx: f64, cy: f64, radius: f64) {
    let fill = ShapeKind::Heart.fill_rgb();
    let outline = ShapeKind::Heart.outline_rgb();
    let lobe_r = radius / 2.0;

    fill_outlined_circle(surface, cx - lobe_r, cy, lobe_r, THIN_OUTLINE_W, fill, outline);
    fill_outlined_circle(surface, cx + lobe_r, cy, lobe_r, THIN_OUTLINE_W, fill, outline);

    let points = [
        Point::new(cx - radius, cy),
        Point::new(cx + radius, cy),
        Point::new(cx, cy + radius),
    ];
    surface.fill_path(&polygon_path(&points), outline);
    surface.fill_path(
        &polygon_path(&shrink_toward_centroid(&points, THIN_OUTLINE_W)),
        fill,
    );
}
