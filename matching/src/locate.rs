use image::DynamicImage;
use tracing::debug;
use zoomfig_core::{to_gray, Placement};

use crate::ncc::match_zero_mean_ncc;
use crate::resample::resample_gray;
use crate::{MatchError, Result};

/// Search parameters for [`locate`].
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Candidate scale range `(min, max)`, both relative to the crop's
    /// native resolution.
    pub scale_range: (f64, f64),
    /// Number of log-spaced candidate scales across `scale_range`.
    pub steps: u32,
    /// Resampled templates narrower or shorter than this are skipped as
    /// degenerate.
    pub min_template_px: u32,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            scale_range: (0.25, 4.0),
            steps: 13,
            min_template_px: 8,
        }
    }
}

/// Find the most likely placement of `crop` inside `panorama`.
///
/// Sweeps a geometric sequence of candidate scales, resamples the
/// grayscale crop at each, and correlates it over the panorama; the
/// winning scale is the one with the highest normalized
/// cross-correlation peak, ties going to the scale closest to 1.0.
///
/// Low confidence is a valid result, not an error: the caller decides
/// whether to accept it or fall back to manual placement.
pub fn locate(
    panorama: &DynamicImage,
    crop: &DynamicImage,
    opts: &LocateOptions,
) -> Result<Placement> {
    let pano = to_gray(panorama);
    let templ = to_gray(crop);

    if pano.width() == 0 || pano.height() == 0 {
        return Err(MatchError::EmptyImage("panorama"));
    }
    if templ.width() == 0 || templ.height() == 0 {
        return Err(MatchError::EmptyImage("crop"));
    }

    let mut best: Option<Placement> = None;

    for scale in candidate_scales(opts.scale_range, opts.steps) {
        let w = (templ.width() as f64 * scale).round() as u32;
        let h = (templ.height() as f64 * scale).round() as u32;

        if w > pano.width() || h > pano.height() {
            debug!(scale, w, h, "skipping scale: template exceeds panorama");
            continue;
        }
        if w < opts.min_template_px || h < opts.min_template_px {
            debug!(scale, w, h, "skipping scale: template degenerate");
            continue;
        }

        let resampled = resample_gray(&templ, w, h);
        let map = match_zero_mean_ncc(&pano, &resampled);
        let (x, y, score) = map.peak();
        let score = (score as f64).clamp(0.0, 1.0);
        debug!(scale, x, y, score, "scale candidate scored");

        let better = match &best {
            None => true,
            Some(p) => {
                score > p.confidence
                    || (score == p.confidence && scale.ln().abs() < p.scale.ln().abs())
            }
        };
        if better {
            best = Some(Placement::new(x as i64, y as i64, scale, score));
        }
    }

    match best {
        Some(placement) => {
            debug!(
                x = placement.x,
                y = placement.y,
                scale = placement.scale,
                confidence = placement.confidence,
                "placement located"
            );
            Ok(placement)
        }
        None => Err(MatchError::NoViableScale {
            crop_width: templ.width(),
            crop_height: templ.height(),
            panorama_width: pano.width(),
            panorama_height: pano.height(),
            min_scale: opts.scale_range.0,
            max_scale: opts.scale_range.1,
        }),
    }
}

/// [`locate`], then a second pass over a narrow range of one coarse
/// grid step around the winning scale. Returns the refined placement
/// unless the coarse one scored strictly higher.
pub fn locate_refined(
    panorama: &DynamicImage,
    crop: &DynamicImage,
    opts: &LocateOptions,
    refine_steps: u32,
) -> Result<Placement> {
    let coarse = locate(panorama, crop, opts)?;

    let (min, max) = opts.scale_range;
    let ratio = grid_ratio(min, max, opts.steps);
    let narrow = LocateOptions {
        scale_range: (
            (coarse.scale / ratio).max(min),
            (coarse.scale * ratio).min(max),
        ),
        steps: refine_steps,
        min_template_px: opts.min_template_px,
    };

    let refined = locate(panorama, crop, &narrow)?;
    if refined.confidence >= coarse.confidence {
        Ok(refined)
    } else {
        Ok(coarse)
    }
}

/// Log-spaced candidates from `min` to `max` inclusive: uniform
/// coverage in ratio space, so a 2x error costs the same number of
/// steps everywhere in the range.
fn candidate_scales((min, max): (f64, f64), steps: u32) -> Vec<f64> {
    if steps <= 1 {
        return vec![(min * max).sqrt()];
    }
    let ratio = grid_ratio(min, max, steps);
    (0..steps).map(|i| min * ratio.powi(i as i32)).collect()
}

fn grid_ratio(min: f64, max: f64, steps: u32) -> f64 {
    (max / min).powf(1.0 / (steps.saturating_sub(1)).max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_scales_are_log_spaced() {
        let scales = candidate_scales((0.25, 4.0), 5);
        assert_eq!(scales.len(), 5);
        assert!((scales[0] - 0.25).abs() < 1e-12);
        assert!((scales[4] - 4.0).abs() < 1e-9);
        for pair in scales.windows(2) {
            assert!((pair[1] / pair[0] - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn single_step_uses_geometric_midpoint() {
        let scales = candidate_scales((0.5, 2.0), 1);
        assert_eq!(scales.len(), 1);
        assert!((scales[0] - 1.0).abs() < 1e-12);
    }
}
