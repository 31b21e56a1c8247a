//! Scale bar rendering: a horizontal main stroke with optional
//! end-caps and ticks, and a label centered beneath it giving the
//! physical length.

use image::RgbaImage;
use zoomfig_core::Rect;

use crate::draw::fill_rect;
use crate::spec::{BarCorner, BarPlacement, ScaleBarSpec, ScaleBarStyle};
use crate::text;

/// Gap between the bar and its label.
const TEXT_GAP: i64 = 5;
/// Label height in pixels (5x7 face at scale 3).
const LABEL_SIZE: u32 = 21;

/// Draw `spec` positioned relative to `owner` (the rect of the image
/// the bar calibrates). Returns the bounding box of everything drawn.
pub fn draw_scale_bar(canvas: &mut RgbaImage, owner: Rect, spec: &ScaleBarSpec) -> Rect {
    let length = (spec.length_px.round() as i64).max(1);
    let t = spec.thickness as i64;
    // End-caps extend this far above and below the baseline.
    let cap_half = 3 * t;

    let (x, y) = resolve_origin(owner, spec, length);

    let main = Rect::new(x, y - t / 2, length as u32, t as u32);
    fill_rect(canvas, main, spec.color);
    let mut bbox = main;

    match spec.style {
        ScaleBarStyle::Line => {}
        ScaleBarStyle::Ends => {
            for cap_x in [x, x + length - t] {
                let cap = Rect::new(cap_x, y - cap_half, t as u32, (2 * cap_half) as u32);
                fill_rect(canvas, cap, spec.color);
                bbox = bbox.union(&cap);
            }
        }
        ScaleBarStyle::Ticks { count } => {
            for cap_x in [x, x + length - t] {
                let cap = Rect::new(cap_x, y - cap_half, t as u32, (2 * cap_half) as u32);
                fill_rect(canvas, cap, spec.color);
                bbox = bbox.union(&cap);
            }
            let tick_half = cap_half / 2;
            let tick_t = (t / 2).max(1);
            let spacing = length as f64 / (count + 1) as f64;
            for i in 1..=count as i64 {
                let tick_x = x + (i as f64 * spacing).round() as i64 - tick_t / 2;
                let tick = Rect::new(tick_x, y - tick_half, tick_t as u32, (2 * tick_half) as u32);
                fill_rect(canvas, tick, spec.color);
                bbox = bbox.union(&tick);
            }
        }
    }

    let label = spec.label_text();
    let (text_w, text_h) = text::measure(&label, LABEL_SIZE);
    let text_x = x + (length - text_w as i64) / 2;
    let text_y = bbox.bottom() + TEXT_GAP;
    text::draw_text(canvas, text_x, text_y, &label, LABEL_SIZE, spec.color);
    bbox = bbox.union(&Rect::new(text_x, text_y, text_w, text_h));

    bbox
}

fn resolve_origin(owner: Rect, spec: &ScaleBarSpec, length: i64) -> (i64, i64) {
    match spec.placement {
        BarPlacement::Corner {
            corner,
            inset_x,
            inset_y,
        } => {
            let ix = inset_x as i64;
            let iy = inset_y as i64;
            match corner {
                BarCorner::BottomLeft => (owner.x + ix, owner.bottom() - iy),
                BarCorner::BottomRight => (owner.right() - ix - length, owner.bottom() - iy),
                BarCorner::TopLeft => (owner.x + ix, owner.y + iy),
                BarCorner::TopRight => (owner.right() - ix - length, owner.y + iy),
            }
        }
        BarPlacement::Explicit { x, y } => (owner.x + x, owner.y + y),
    }
}
