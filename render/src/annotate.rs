//! Annotation rendering: arrows, circles, triangles, stars, and text,
//! dispatched over the closed [`AnnotationShape`] sum.

use image::RgbaImage;
use zoomfig_core::Rect;

use crate::draw::{draw_circle, draw_line, draw_polygon, fill_circle, fill_polygon};
use crate::spec::{AnnotationShape, AnnotationSpec};
use crate::text;

/// Draw one annotation anchored relative to `owner`. Returns the
/// bounding box of everything drawn, for `drawn_boxes`.
pub fn draw_annotation(canvas: &mut RgbaImage, owner: Rect, spec: &AnnotationSpec) -> Rect {
    let ax = (owner.x + spec.at.x) as f64;
    let ay = (owner.y + spec.at.y) as f64;

    match &spec.shape {
        AnnotationShape::Arrow {
            length,
            rotation_deg,
            thickness,
        } => {
            // Rotation 0 points up, degrees clockwise.
            let (dx, dy) = direction(*rotation_deg);
            let tip = (ax + dx * length, ay + dy * length);
            let head_len = length / 3.0;
            let head_half = length / 4.0;
            let (px, py) = (-dy, dx);

            let base = (tip.0 - dx * head_len, tip.1 - dy * head_len);
            draw_line(canvas, (ax, ay), base, spec.color, *thickness);
            fill_polygon(
                canvas,
                &[
                    tip,
                    (base.0 + px * head_half, base.1 + py * head_half),
                    (base.0 - px * head_half, base.1 - py * head_half),
                ],
                spec.color,
            );
            bbox_of(&[(ax, ay), tip], head_half.max(*thickness as f64))
        }
        AnnotationShape::Circle {
            radius,
            thickness,
            fill,
        } => {
            if let Some(fill) = fill {
                fill_circle(canvas, (ax, ay), *radius, *fill);
            }
            draw_circle(canvas, (ax, ay), *radius, spec.color, *thickness);
            let reach = radius + *thickness as f64 / 2.0;
            bbox_of(&[(ax - reach, ay - reach), (ax + reach, ay + reach)], 1.0)
        }
        AnnotationShape::Triangle {
            size,
            rotation_deg,
            thickness,
            fill,
        } => {
            let pts = rotated(
                &[(0.0, -size), (-size, *size), (*size, *size)],
                (ax, ay),
                *rotation_deg,
            );
            if let Some(fill) = fill {
                fill_polygon(canvas, &pts, *fill);
            }
            draw_polygon(canvas, &pts, spec.color, *thickness);
            bbox_of(&pts, *thickness as f64)
        }
        AnnotationShape::Star { size, rotation_deg } => {
            // Five points, inner radius at 0.4 of the outer.
            let inner = size * 0.4;
            let mut pts = Vec::with_capacity(10);
            for i in 0..10 {
                let r = if i % 2 == 0 { *size } else { inner };
                let angle = (i as f64 * 36.0).to_radians();
                pts.push((r * angle.sin(), -r * angle.cos()));
            }
            let pts = rotated(&pts, (ax, ay), *rotation_deg);
            fill_polygon(canvas, &pts, spec.color);
            bbox_of(&pts, 1.0)
        }
        AnnotationShape::Text { text: content, size } => {
            let (w, h) = text::measure(content, *size);
            text::draw_text(canvas, ax as i64, ay as i64, content, *size, spec.color);
            Rect::new(ax as i64, ay as i64, w, h)
        }
    }
}

/// Unit vector for a clockwise rotation in degrees, 0 pointing up.
fn direction(rotation_deg: f64) -> (f64, f64) {
    let rad = rotation_deg.to_radians();
    (rad.sin(), -rad.cos())
}

/// Rotate local points clockwise by `rotation_deg` and translate to
/// `center`.
fn rotated(local: &[(f64, f64)], center: (f64, f64), rotation_deg: f64) -> Vec<(f64, f64)> {
    let rad = rotation_deg.to_radians();
    let (sin, cos) = (rad.sin(), rad.cos());
    local
        .iter()
        .map(|&(x, y)| {
            (
                center.0 + x * cos - y * sin,
                center.1 + x * sin + y * cos,
            )
        })
        .collect()
}

/// Integer bounding box of `pts` padded by `pad` on every side.
fn bbox_of(pts: &[(f64, f64)], pad: f64) -> Rect {
    let x_min = pts.iter().map(|p| p.0).fold(f64::INFINITY, f64::min) - pad;
    let y_min = pts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min) - pad;
    let x_max = pts.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max) + pad;
    let y_max = pts.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max) + pad;
    Rect::new(
        x_min.floor() as i64,
        y_min.floor() as i64,
        (x_max.ceil() - x_min.floor()).max(1.0) as u32,
        (y_max.ceil() - y_min.floor()).max(1.0) as u32,
    )
}
