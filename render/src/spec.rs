//! Declarative composition request types.
//!
//! A [`LayoutSpec`] is a pure value object rebuilt per render; every
//! type here is serde-serializable so a shell can persist settings.
//! [`LayoutSpec::validate`] enforces the field invariants before any
//! drawing starts.

use serde::{Deserialize, Serialize};
use zoomfig_core::{Color, Point};

use crate::{RenderError, Result};

/// Which side of the panorama the zoom image lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Top,
    Bottom,
}

/// Rectangular frame drawn just outside an image or region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderSpec {
    pub color: Color,
    pub thickness: u32,
}

impl BorderSpec {
    pub fn new(color: Color, thickness: u32) -> Self {
        Self { color, thickness }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    /// Fixed on/off pixel runs; phase starts at the segment origin.
    Dashed {
        dash_len: u32,
        gap_len: u32,
    },
}

/// Which ROI corners the guide lines start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideCorners {
    /// The two ROI corners facing the zoom image, each connected to the
    /// matching zoom-rect corner.
    Nearest,
    /// All four corners.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLineSpec {
    pub color: Color,
    pub thickness: u32,
    pub style: LineStyle,
    pub corners: GuideCorners,
}

impl Default for GuideLineSpec {
    fn default() -> Self {
        Self {
            color: Color::red(),
            thickness: 2,
            style: LineStyle::Solid,
            corners: GuideCorners::Nearest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScaleBarStyle {
    /// Main stroke only.
    Line,
    /// Main stroke plus perpendicular end-caps.
    Ends,
    /// End-caps plus `count` evenly spaced intermediate ticks.
    Ticks { count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarCorner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

/// Where a scale bar sits, relative to the rect of the image it
/// calibrates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BarPlacement {
    Corner {
        corner: BarCorner,
        inset_x: u32,
        inset_y: u32,
    },
    /// Left end of the main stroke, in owning-rect coordinates.
    Explicit { x: i64, y: i64 },
}

impl Default for BarPlacement {
    fn default() -> Self {
        BarPlacement::Corner {
            corner: BarCorner::BottomLeft,
            inset_x: 30,
            inset_y: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBarSpec {
    /// On-canvas bar length in pixels, independent of the image it
    /// overlays.
    pub length_px: f64,
    pub style: ScaleBarStyle,
    pub color: Color,
    pub thickness: u32,
    pub placement: BarPlacement,
    /// Verbatim label; `None` synthesizes one from the physical length.
    pub label: Option<String>,
    /// Calibration factor converting pixel distances to physical units.
    pub pixels_per_unit: f64,
}

impl ScaleBarSpec {
    pub fn new(length_px: f64, pixels_per_unit: f64) -> Self {
        Self {
            length_px,
            style: ScaleBarStyle::Ends,
            color: Color::black(),
            thickness: 5,
            placement: BarPlacement::default(),
            label: None,
            pixels_per_unit,
        }
    }

    /// The text drawn beneath the bar. Synthesized labels follow the
    /// micrometer convention: values of 1000 units and up render in mm.
    pub fn label_text(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let units = self.length_px / self.pixels_per_unit;
        if units >= 1000.0 {
            format!("{:.1} mm", units / 1000.0)
        } else {
            format!("{units:.0} µm")
        }
    }
}

/// Which rect an annotation's coordinates are relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Panorama,
    Zoom,
}

/// Variant-specific annotation geometry. Rotations are in degrees,
/// clockwise, with 0 pointing up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationShape {
    /// Tail at the anchor point, tip `length` pixels away.
    Arrow {
        length: f64,
        rotation_deg: f64,
        thickness: u32,
    },
    Circle {
        radius: f64,
        thickness: u32,
        fill: Option<Color>,
    },
    Triangle {
        size: f64,
        rotation_deg: f64,
        thickness: u32,
        fill: Option<Color>,
    },
    /// Five-pointed filled star, outer radius `size`.
    Star { size: f64, rotation_deg: f64 },
    Text { text: String, size: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    /// Key for this annotation's entry in `drawn_boxes`.
    pub id: String,
    pub attach: Anchor,
    /// Anchor point in owning-rect coordinates.
    pub at: Point,
    pub color: Color,
    pub shape: AnnotationShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatermarkCorner {
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkSpec {
    pub text: String,
    pub corner: WatermarkCorner,
    /// Blend opacity; 255 is rejected so underlying content stays
    /// legible.
    pub opacity: u8,
    pub size: u32,
    pub color: Color,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            corner: WatermarkCorner::BottomRight,
            opacity: 128,
            size: 24,
            color: Color::gray(),
        }
    }
}

/// Declarative composition request: everything [`compose`](crate::compose)
/// needs beyond the two images and the placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub direction: Direction,
    /// Pixels between the panorama and zoom rects along the
    /// composition axis.
    pub gap: u32,
    /// Uniform outer margin around both rects.
    pub margin: u32,
    pub background: Color,
    pub panorama_border: Option<BorderSpec>,
    pub zoom_border: Option<BorderSpec>,
    /// Outline of the clamped placement rectangle on the panorama.
    pub roi_box: Option<BorderSpec>,
    pub guide_line: Option<GuideLineSpec>,
    pub panorama_scale_bar: Option<ScaleBarSpec>,
    pub zoom_scale_bar: Option<ScaleBarSpec>,
    pub annotations: Vec<AnnotationSpec>,
    pub watermark: Option<WatermarkSpec>,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            gap: 50,
            margin: 8,
            background: Color::white(),
            panorama_border: Some(BorderSpec::new(Color::red(), 3)),
            zoom_border: Some(BorderSpec::new(Color::red(), 3)),
            roi_box: Some(BorderSpec::new(Color::red(), 3)),
            guide_line: Some(GuideLineSpec::default()),
            panorama_scale_bar: None,
            zoom_scale_bar: None,
            annotations: Vec::new(),
            watermark: None,
        }
    }
}

impl LayoutSpec {
    /// Fail-fast invariant check; runs before any drawing.
    pub fn validate(&self) -> Result<()> {
        for (name, border) in [
            ("panorama_border", &self.panorama_border),
            ("zoom_border", &self.zoom_border),
            ("roi_box", &self.roi_box),
        ] {
            if let Some(b) = border {
                if b.thickness == 0 {
                    return Err(malformed(format!("{name} thickness must be at least 1")));
                }
            }
        }

        if let Some(guide) = &self.guide_line {
            if guide.thickness == 0 {
                return Err(malformed("guide line thickness must be at least 1"));
            }
            if let LineStyle::Dashed { dash_len, gap_len } = guide.style {
                if dash_len == 0 || gap_len == 0 {
                    return Err(malformed("dash and gap run lengths must be non-zero"));
                }
            }
        }

        for (name, bar) in [
            ("panorama scale bar", &self.panorama_scale_bar),
            ("zoom scale bar", &self.zoom_scale_bar),
        ] {
            if let Some(bar) = bar {
                if !bar.length_px.is_finite() || bar.length_px <= 0.0 {
                    return Err(malformed(format!("{name} length must be positive and finite")));
                }
                if !bar.pixels_per_unit.is_finite() || bar.pixels_per_unit <= 0.0 {
                    return Err(malformed(format!(
                        "{name} pixels_per_unit must be positive and finite"
                    )));
                }
                if bar.thickness == 0 {
                    return Err(malformed(format!("{name} thickness must be at least 1")));
                }
            }
        }

        for ann in &self.annotations {
            validate_annotation(ann)?;
        }

        if let Some(wm) = &self.watermark {
            if wm.text.is_empty() {
                return Err(malformed("watermark text must not be empty"));
            }
            if wm.opacity == 255 {
                return Err(malformed("watermark must not be fully opaque"));
            }
        }

        Ok(())
    }
}

fn validate_annotation(ann: &AnnotationSpec) -> Result<()> {
    let id = &ann.id;
    match &ann.shape {
        AnnotationShape::Arrow {
            length, thickness, ..
        } => {
            if !length.is_finite() || *length <= 0.0 {
                return Err(malformed(format!("arrow '{id}' length must be positive")));
            }
            if *thickness == 0 {
                return Err(malformed(format!("arrow '{id}' thickness must be at least 1")));
            }
        }
        AnnotationShape::Circle {
            radius, thickness, ..
        } => {
            if !radius.is_finite() || *radius <= 0.0 {
                return Err(malformed(format!("circle '{id}' radius must be positive")));
            }
            if *thickness == 0 {
                return Err(malformed(format!("circle '{id}' thickness must be at least 1")));
            }
        }
        AnnotationShape::Triangle {
            size, thickness, ..
        } => {
            if !size.is_finite() || *size <= 0.0 {
                return Err(malformed(format!("triangle '{id}' size must be positive")));
            }
            if *thickness == 0 {
                return Err(malformed(format!(
                    "triangle '{id}' thickness must be at least 1"
                )));
            }
        }
        AnnotationShape::Star { size, .. } => {
            if !size.is_finite() || *size <= 0.0 {
                return Err(malformed(format!("star '{id}' size must be positive")));
            }
        }
        AnnotationShape::Text { text, size } => {
            if text.is_empty() {
                return Err(malformed(format!("text annotation '{id}' must not be empty")));
            }
            if *size == 0 {
                return Err(malformed(format!("text annotation '{id}' size must be at least 1")));
            }
        }
    }
    Ok(())
}

fn malformed(msg: impl Into<String>) -> RenderError {
    RenderError::MalformedSpec(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_validates() {
        assert!(LayoutSpec::default().validate().is_ok());
    }

    #[test]
    fn zero_thickness_border_rejected() {
        let mut spec = LayoutSpec::default();
        spec.roi_box = Some(BorderSpec::new(Color::red(), 0));
        assert!(matches!(
            spec.validate(),
            Err(RenderError::MalformedSpec(_))
        ));
    }

    #[test]
    fn zero_dash_run_rejected() {
        let mut spec = LayoutSpec::default();
        spec.guide_line = Some(GuideLineSpec {
            style: LineStyle::Dashed {
                dash_len: 0,
                gap_len: 10,
            },
            ..GuideLineSpec::default()
        });
        assert!(spec.validate().is_err());
    }

    #[test]
    fn non_positive_pixels_per_unit_rejected() {
        let mut spec = LayoutSpec::default();
        spec.zoom_scale_bar = Some(ScaleBarSpec::new(100.0, 0.0));
        assert!(spec.validate().is_err());

        spec.zoom_scale_bar = Some(ScaleBarSpec::new(100.0, f64::NAN));
        assert!(spec.validate().is_err());
    }

    #[test]
    fn opaque_watermark_rejected() {
        let mut spec = LayoutSpec::default();
        spec.watermark = Some(WatermarkSpec {
            text: "draft".into(),
            opacity: 255,
            ..WatermarkSpec::default()
        });
        assert!(spec.validate().is_err());
    }

    #[test]
    fn empty_annotation_text_rejected() {
        let mut spec = LayoutSpec::default();
        spec.annotations.push(AnnotationSpec {
            id: "label".into(),
            attach: Anchor::Zoom,
            at: Point::new(10, 10),
            color: Color::red(),
            shape: AnnotationShape::Text {
                text: String::new(),
                size: 16,
            },
        });
        assert!(spec.validate().is_err());
    }

    #[test]
    fn label_synthesis_switches_units_at_1000() {
        let bar = ScaleBarSpec::new(200.0, 2.0);
        assert_eq!(bar.label_text(), "100 µm");

        let bar = ScaleBarSpec::new(3000.0, 2.0);
        assert_eq!(bar.label_text(), "1.5 mm");

        let mut bar = ScaleBarSpec::new(200.0, 2.0);
        bar.label = Some("custom".into());
        assert_eq!(bar.label_text(), "custom");
    }

    #[test]
    fn layout_spec_serde_round_trip() {
        let mut spec = LayoutSpec::default();
        spec.zoom_scale_bar = Some(ScaleBarSpec::new(150.0, 1.5));
        spec.annotations.push(AnnotationSpec {
            id: "a1".into(),
            attach: Anchor::Panorama,
            at: Point::new(5, 7),
            color: Color::blue(),
            shape: AnnotationShape::Star {
                size: 12.0,
                rotation_deg: 0.0,
            },
        });
        let json = serde_json::to_string(&spec).unwrap();
        let back: LayoutSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
