//! Raster drawing primitives over `RgbaImage`.
//!
//! Strokes are anti-aliased by fractional-coverage blending: each pixel
//! near a primitive receives the primitive's color at an alpha
//! proportional to how much of the pixel the stroke covers,
//! approximated from the signed distance to the stroke's centerline.
//! Axis-aligned rectangles stay crisp and skip coverage math entirely.

use image::RgbaImage;
use zoomfig_core::{Color, Rect};

/// Source-over blend of `color` into the canvas at `(x, y)`, scaled by
/// `coverage` in [0, 1]. Out-of-bounds coordinates are ignored.
pub fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f64) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 {
        return;
    }

    let alpha = color.a as f64 / 255.0 * coverage;
    if alpha <= 0.0 {
        return;
    }

    let px = canvas.get_pixel_mut(x as u32, y as u32);
    let inv = 1.0 - alpha;
    px[0] = (color.r as f64 * alpha + px[0] as f64 * inv).round() as u8;
    px[1] = (color.g as f64 * alpha + px[1] as f64 * inv).round() as u8;
    px[2] = (color.b as f64 * alpha + px[2] as f64 * inv).round() as u8;
    px[3] = ((alpha + px[3] as f64 / 255.0 * inv) * 255.0).round() as u8;
}

/// Opaque fill of an axis-aligned rectangle, clipped to the canvas.
pub fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Color) {
    let bounds = canvas_rect(canvas);
    let Some(clipped) = rect.intersect(&bounds) else {
        return;
    };
    for y in clipped.y..clipped.bottom() {
        for x in clipped.x..clipped.right() {
            blend_pixel(canvas, x, y, color, 1.0);
        }
    }
}

/// Rectangular frame of `thickness` drawn outward from `rect`'s edges.
pub fn draw_rect_outline(canvas: &mut RgbaImage, rect: Rect, color: Color, thickness: u32) {
    let outer = rect.inflate(thickness);
    // Top, bottom, left, right strips.
    fill_rect(canvas, Rect::new(outer.x, outer.y, outer.width, thickness), color);
    fill_rect(
        canvas,
        Rect::new(outer.x, rect.bottom(), outer.width, thickness),
        color,
    );
    fill_rect(canvas, Rect::new(outer.x, rect.y, thickness, rect.height), color);
    fill_rect(
        canvas,
        Rect::new(rect.right(), rect.y, thickness, rect.height),
        color,
    );
}

/// Anti-aliased stroke from `p0` to `p1` with the given thickness.
/// Coverage falls off over half a pixel at the stroke's edge.
pub fn draw_line(
    canvas: &mut RgbaImage,
    p0: (f64, f64),
    p1: (f64, f64),
    color: Color,
    thickness: u32,
) {
    let half = thickness as f64 / 2.0;
    let pad = (half + 1.0).ceil() as i64;

    let x_min = (p0.0.min(p1.0).floor() as i64 - pad).max(0);
    let y_min = (p0.1.min(p1.1).floor() as i64 - pad).max(0);
    let x_max = (p0.0.max(p1.0).ceil() as i64 + pad).min(canvas.width() as i64 - 1);
    let y_max = (p0.1.max(p1.1).ceil() as i64 + pad).min(canvas.height() as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let d = dist_to_segment((x as f64 + 0.5, y as f64 + 0.5), p0, p1);
            let coverage = half + 0.5 - d;
            if coverage > 0.0 {
                blend_pixel(canvas, x, y, color, coverage);
            }
        }
    }
}

/// Dashed stroke: fixed on/off runs measured along the segment, phase
/// anchored at `p0` so the pattern is consistent regardless of segment
/// length or angle.
pub fn draw_dashed_line(
    canvas: &mut RgbaImage,
    p0: (f64, f64),
    p1: (f64, f64),
    color: Color,
    thickness: u32,
    dash_len: u32,
    gap_len: u32,
) {
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return;
    }
    let ux = dx / length;
    let uy = dy / length;

    let mut pos = 0.0f64;
    while pos < length {
        let end = (pos + dash_len as f64).min(length);
        draw_line(
            canvas,
            (p0.0 + ux * pos, p0.1 + uy * pos),
            (p0.0 + ux * end, p0.1 + uy * end),
            color,
            thickness,
        );
        pos = end + gap_len as f64;
    }
}

/// Anti-aliased circle outline: coverage from the distance to the
/// annulus of the given radius and stroke thickness.
pub fn draw_circle(
    canvas: &mut RgbaImage,
    center: (f64, f64),
    radius: f64,
    color: Color,
    thickness: u32,
) {
    let half = thickness as f64 / 2.0;
    let reach = radius + half + 1.0;
    let x_min = ((center.0 - reach).floor() as i64).max(0);
    let y_min = ((center.1 - reach).floor() as i64).max(0);
    let x_max = ((center.0 + reach).ceil() as i64).min(canvas.width() as i64 - 1);
    let y_max = ((center.1 + reach).ceil() as i64).min(canvas.height() as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f64 + 0.5 - center.0;
            let dy = y as f64 + 0.5 - center.1;
            let d = (dx * dx + dy * dy).sqrt();
            let coverage = half + 0.5 - (d - radius).abs();
            if coverage > 0.0 {
                blend_pixel(canvas, x, y, color, coverage);
            }
        }
    }
}

/// Anti-aliased filled disc.
pub fn fill_circle(canvas: &mut RgbaImage, center: (f64, f64), radius: f64, color: Color) {
    let reach = radius + 1.0;
    let x_min = ((center.0 - reach).floor() as i64).max(0);
    let y_min = ((center.1 - reach).floor() as i64).max(0);
    let x_max = ((center.0 + reach).ceil() as i64).min(canvas.width() as i64 - 1);
    let y_max = ((center.1 + reach).ceil() as i64).min(canvas.height() as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f64 + 0.5 - center.0;
            let dy = y as f64 + 0.5 - center.1;
            let d = (dx * dx + dy * dy).sqrt();
            let coverage = radius + 0.5 - d;
            if coverage > 0.0 {
                blend_pixel(canvas, x, y, color, coverage);
            }
        }
    }
}

/// Anti-aliased filled polygon (even-odd rule), coverage estimated by a
/// 4x4 sub-pixel grid. Vertices are in canvas coordinates.
pub fn fill_polygon(canvas: &mut RgbaImage, pts: &[(f64, f64)], color: Color) {
    if pts.len() < 3 {
        return;
    }

    let x_min = (pts.iter().map(|p| p.0).fold(f64::INFINITY, f64::min).floor() as i64).max(0);
    let y_min = (pts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).floor() as i64).max(0);
    let x_max = (pts.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max).ceil() as i64)
        .min(canvas.width() as i64 - 1);
    let y_max = (pts.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max).ceil() as i64)
        .min(canvas.height() as i64 - 1);

    const SUB: u32 = 4;
    let step = 1.0 / SUB as f64;

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let mut hits = 0u32;
            for sy in 0..SUB {
                for sx in 0..SUB {
                    let px = x as f64 + (sx as f64 + 0.5) * step;
                    let py = y as f64 + (sy as f64 + 0.5) * step;
                    if point_in_polygon((px, py), pts) {
                        hits += 1;
                    }
                }
            }
            if hits > 0 {
                blend_pixel(canvas, x, y, color, hits as f64 / (SUB * SUB) as f64);
            }
        }
    }
}

/// Polygon outline as anti-aliased edge strokes.
pub fn draw_polygon(canvas: &mut RgbaImage, pts: &[(f64, f64)], color: Color, thickness: u32) {
    for i in 0..pts.len() {
        let next = pts[(i + 1) % pts.len()];
        draw_line(canvas, pts[i], next, color, thickness);
    }
}

/// Copy `src` onto the canvas with its top-left corner at `(x, y)`,
/// clipping to canvas bounds.
pub fn paste(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    for sy in 0..src.height() {
        let cy = y + sy as i64;
        if cy < 0 || cy >= canvas.height() as i64 {
            continue;
        }
        for sx in 0..src.width() {
            let cx = x + sx as i64;
            if cx < 0 || cx >= canvas.width() as i64 {
                continue;
            }
            canvas.put_pixel(cx as u32, cy as u32, *src.get_pixel(sx, sy));
        }
    }
}

pub fn canvas_rect(canvas: &RgbaImage) -> Rect {
    Rect::new(0, 0, canvas.width(), canvas.height())
}

fn dist_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let abx = b.0 - a.0;
    let aby = b.1 - a.1;
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        ((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq
    } else {
        0.0
    }
    .clamp(0.0, 1.0);
    let cx = a.0 + t * abx - p.0;
    let cy = a.1 + t * aby - p.1;
    (cx * cx + cy * cy).sqrt()
}

fn point_in_polygon(p: (f64, f64), pts: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let (xi, yi) = pts[i];
        let (xj, yj) = pts[j];
        if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
