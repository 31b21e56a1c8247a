//! The compositor: lay out panorama and zoom side by side, then draw
//! decorations in a fixed order. Later steps draw over earlier ones;
//! that ordering is part of the contract, not an accident of the
//! implementation.

use std::collections::BTreeMap;

use image::{DynamicImage, RgbaImage};
use tracing::debug;
use zoomfig_core::{to_rgba, Placement, Point, Rect};

use crate::draw::{draw_dashed_line, draw_line, draw_rect_outline, paste};
use crate::scalebar::draw_scale_bar;
use crate::spec::{
    Anchor, Direction, GuideCorners, GuideLineSpec, LayoutSpec, LineStyle, WatermarkCorner,
};
use crate::text;
use crate::{annotate, RenderError, Result};

/// Distance from the canvas edge to the watermark text.
const WATERMARK_MARGIN: i64 = 20;

/// Everything a render produces: the canvas plus the geometry needed
/// for caller-side hit-testing and undo.
#[derive(Debug, Clone)]
pub struct CompositeResult {
    pub canvas: RgbaImage,
    /// Where the panorama was pasted, in canvas coordinates.
    pub panorama_rect: Rect,
    /// Where the zoom image was pasted, in canvas coordinates.
    pub zoom_rect: Rect,
    /// The clamped placement rectangle, in canvas coordinates.
    pub roi_rect: Rect,
    /// Bounding box of each drawn decoration, keyed by element id.
    pub drawn_boxes: BTreeMap<String, Rect>,
}

/// Composite `panorama` and `zoom` into one annotated figure.
///
/// `placement.scale` is interpreted relative to the zoom image passed
/// here: the ROI rectangle on the panorama is the zoom extent scaled by
/// it. The zoom image itself is pasted at native resolution; display
/// scale is the caller's concern.
///
/// Drawing order: images, frames and ROI box, guide lines, panorama
/// scale bar, zoom scale bar, annotations in list order, watermark.
pub fn compose(
    panorama: &DynamicImage,
    zoom: &DynamicImage,
    placement: &Placement,
    layout: &LayoutSpec,
) -> Result<CompositeResult> {
    layout.validate()?;

    let pano = to_rgba(panorama);
    let zoom_img = to_rgba(zoom);
    if pano.width() == 0 || pano.height() == 0 {
        return Err(RenderError::InvalidGeometry("empty panorama image".into()));
    }
    if zoom_img.width() == 0 || zoom_img.height() == 0 {
        return Err(RenderError::InvalidGeometry("empty zoom image".into()));
    }

    // Clamp the placement rectangle to panorama bounds up front so a
    // degenerate placement fails before any allocation.
    let pano_bounds = Rect::new(0, 0, pano.width(), pano.height());
    let roi_in_pano = placement
        .scaled_rect(zoom_img.width(), zoom_img.height())
        .intersect(&pano_bounds)
        .ok_or_else(|| {
            RenderError::InvalidGeometry("placement rectangle lies outside the panorama".into())
        })?;

    let (canvas_w, canvas_h, pano_rect, zoom_rect) =
        arrange(layout, pano.width(), pano.height(), zoom_img.width(), zoom_img.height());
    debug!(
        canvas_w,
        canvas_h,
        ?pano_rect,
        ?zoom_rect,
        direction = ?layout.direction,
        "canvas arranged"
    );

    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, layout.background.to_pixel());
    paste(&mut canvas, &pano, pano_rect.x, pano_rect.y);
    paste(&mut canvas, &zoom_img, zoom_rect.x, zoom_rect.y);

    let roi_rect = roi_in_pano.translate(pano_rect.x, pano_rect.y);
    let mut drawn_boxes = BTreeMap::new();

    if let Some(border) = &layout.panorama_border {
        draw_rect_outline(&mut canvas, pano_rect, border.color, border.thickness);
        drawn_boxes.insert("panorama_border".to_string(), pano_rect.inflate(border.thickness));
    }
    if let Some(border) = &layout.zoom_border {
        draw_rect_outline(&mut canvas, zoom_rect, border.color, border.thickness);
        drawn_boxes.insert("zoom_border".to_string(), zoom_rect.inflate(border.thickness));
    }
    if let Some(border) = &layout.roi_box {
        draw_rect_outline(&mut canvas, roi_rect, border.color, border.thickness);
        drawn_boxes.insert("roi_box".to_string(), roi_rect.inflate(border.thickness));
    }

    if let Some(guide) = &layout.guide_line {
        let bbox = draw_guide_lines(&mut canvas, guide, layout.direction, roi_rect, zoom_rect);
        drawn_boxes.insert("guide_line".to_string(), bbox);
    }

    if let Some(bar) = &layout.panorama_scale_bar {
        let bbox = draw_scale_bar(&mut canvas, pano_rect, bar);
        drawn_boxes.insert("panorama_scale_bar".to_string(), bbox);
    }
    if let Some(bar) = &layout.zoom_scale_bar {
        let bbox = draw_scale_bar(&mut canvas, zoom_rect, bar);
        drawn_boxes.insert("zoom_scale_bar".to_string(), bbox);
    }

    for ann in &layout.annotations {
        let owner = match ann.attach {
            Anchor::Panorama => pano_rect,
            Anchor::Zoom => zoom_rect,
        };
        let bbox = annotate::draw_annotation(&mut canvas, owner, ann);
        drawn_boxes.insert(ann.id.clone(), bbox);
    }

    if let Some(wm) = &layout.watermark {
        let (w, h) = text::measure(&wm.text, wm.size);
        let (x, y) = watermark_origin(wm.corner, canvas_w, canvas_h, w, h);
        text::draw_text(&mut canvas, x, y, &wm.text, wm.size, wm.color.with_alpha(wm.opacity));
        drawn_boxes.insert("watermark".to_string(), Rect::new(x, y, w, h));
    }

    debug!(elements = drawn_boxes.len(), "composition finished");
    Ok(CompositeResult {
        canvas,
        panorama_rect: pano_rect,
        zoom_rect,
        roi_rect,
        drawn_boxes,
    })
}

/// Canvas dimensions and both image rects for a direction/gap/margin.
/// Along the cross axis the shorter image is centered against the
/// taller.
fn arrange(layout: &LayoutSpec, pw: u32, ph: u32, zw: u32, zh: u32) -> (u32, u32, Rect, Rect) {
    let m = layout.margin as i64;
    let gap = layout.gap as i64;

    match layout.direction {
        Direction::Right | Direction::Left => {
            let max_h = ph.max(zh);
            let canvas_w = 2 * layout.margin + pw + layout.gap + zw;
            let canvas_h = 2 * layout.margin + max_h;
            let pano_y = m + ((max_h - ph) / 2) as i64;
            let zoom_y = m + ((max_h - zh) / 2) as i64;
            let (pano_x, zoom_x) = if layout.direction == Direction::Right {
                (m, m + pw as i64 + gap)
            } else {
                (m + zw as i64 + gap, m)
            };
            (
                canvas_w,
                canvas_h,
                Rect::new(pano_x, pano_y, pw, ph),
                Rect::new(zoom_x, zoom_y, zw, zh),
            )
        }
        Direction::Bottom | Direction::Top => {
            let max_w = pw.max(zw);
            let canvas_w = 2 * layout.margin + max_w;
            let canvas_h = 2 * layout.margin + ph + layout.gap + zh;
            let pano_x = m + ((max_w - pw) / 2) as i64;
            let zoom_x = m + ((max_w - zw) / 2) as i64;
            let (pano_y, zoom_y) = if layout.direction == Direction::Bottom {
                (m, m + ph as i64 + gap)
            } else {
                (m + zh as i64 + gap, m)
            };
            (
                canvas_w,
                canvas_h,
                Rect::new(pano_x, pano_y, pw, ph),
                Rect::new(zoom_x, zoom_y, zw, zh),
            )
        }
    }
}

/// Guide line segments from ROI corners to zoom-rect corners. `Nearest`
/// connects the two ROI corners facing the zoom image; `All` connects
/// all four.
fn draw_guide_lines(
    canvas: &mut RgbaImage,
    guide: &GuideLineSpec,
    direction: Direction,
    roi: Rect,
    zoom: Rect,
) -> Rect {
    let [roi_tl, roi_tr, roi_br, roi_bl] = corner_points(roi);
    let [zoom_tl, zoom_tr, zoom_br, zoom_bl] = corner_points(zoom);

    let segments: Vec<((f64, f64), (f64, f64))> = match guide.corners {
        GuideCorners::Nearest => match direction {
            Direction::Right => vec![(roi_tr, zoom_tl), (roi_br, zoom_bl)],
            Direction::Left => vec![(roi_tl, zoom_tr), (roi_bl, zoom_br)],
            Direction::Bottom => vec![(roi_bl, zoom_tl), (roi_br, zoom_tr)],
            Direction::Top => vec![(roi_tl, zoom_bl), (roi_tr, zoom_br)],
        },
        GuideCorners::All => vec![
            (roi_tl, zoom_tl),
            (roi_tr, zoom_tr),
            (roi_br, zoom_br),
            (roi_bl, zoom_bl),
        ],
    };

    let mut bbox: Option<Rect> = None;
    for (a, b) in segments {
        match guide.style {
            LineStyle::Solid => draw_line(canvas, a, b, guide.color, guide.thickness),
            LineStyle::Dashed { dash_len, gap_len } => {
                draw_dashed_line(canvas, a, b, guide.color, guide.thickness, dash_len, gap_len)
            }
        }
        let seg = Rect::from_corners(
            Point::new(a.0.floor() as i64, a.1.floor() as i64),
            Point::new(b.0.ceil() as i64, b.1.ceil() as i64),
        )
        .inflate(guide.thickness);
        bbox = Some(match bbox {
            Some(acc) => acc.union(&seg),
            None => seg,
        });
    }
    bbox.unwrap_or(roi)
}

fn corner_points(rect: Rect) -> [(f64, f64); 4] {
    let [tl, tr, br, bl] = rect.corners();
    [
        (tl.x as f64, tl.y as f64),
        (tr.x as f64, tr.y as f64),
        (br.x as f64, br.y as f64),
        (bl.x as f64, bl.y as f64),
    ]
}

fn watermark_origin(
    corner: WatermarkCorner,
    canvas_w: u32,
    canvas_h: u32,
    text_w: u32,
    text_h: u32,
) -> (i64, i64) {
    let (cw, ch) = (canvas_w as i64, canvas_h as i64);
    let (tw, th) = (text_w as i64, text_h as i64);
    match corner {
        WatermarkCorner::BottomRight => (cw - tw - WATERMARK_MARGIN, ch - th - WATERMARK_MARGIN),
        WatermarkCorner::BottomLeft => (WATERMARK_MARGIN, ch - th - WATERMARK_MARGIN),
        WatermarkCorner::TopRight => (cw - tw - WATERMARK_MARGIN, WATERMARK_MARGIN),
        WatermarkCorner::TopLeft => (WATERMARK_MARGIN, WATERMARK_MARGIN),
        WatermarkCorner::Center => ((cw - tw) / 2, (ch - th) / 2),
    }
}
