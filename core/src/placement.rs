use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Advisory confidence cut-off shared by shells; the matcher never
/// enforces it.
pub const LOW_CONFIDENCE: f64 = 0.5;

/// Where the zoom crop sits inside the panorama: the crop, scaled by
/// `scale`, has its top-left corner at `(x, y)` in panorama pixel
/// coordinates. Produced by the matcher or hand-edited by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub scale: f64,
    pub confidence: f64,
}

impl Placement {
    pub fn new(x: i64, y: i64, scale: f64, confidence: f64) -> Self {
        Self {
            x,
            y,
            scale,
            confidence,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence < LOW_CONFIDENCE
    }

    /// Panorama-space rectangle covered by a `crop_width` × `crop_height`
    /// crop under this placement. Extents round to nearest and never drop
    /// below one pixel.
    pub fn scaled_rect(&self, crop_width: u32, crop_height: u32) -> Rect {
        let w = (crop_width as f64 * self.scale).round().max(1.0) as u32;
        let h = (crop_height as f64 * self.scale).round().max(1.0) as u32;
        Rect::new(self.x, self.y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_rect_rounds_extent() {
        let p = Placement::new(10, 20, 0.5, 1.0);
        assert_eq!(p.scaled_rect(81, 60), Rect::new(10, 20, 41, 30));
    }

    #[test]
    fn scaled_rect_never_collapses() {
        let p = Placement::new(0, 0, 0.001, 1.0);
        let r = p.scaled_rect(10, 10);
        assert_eq!((r.width, r.height), (1, 1));
    }

    #[test]
    fn low_confidence_threshold() {
        assert!(Placement::new(0, 0, 1.0, 0.49).is_low_confidence());
        assert!(!Placement::new(0, 0, 1.0, 0.5).is_low_confidence());
    }
}
