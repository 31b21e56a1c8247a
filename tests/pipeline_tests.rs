//! End-to-end pipeline: locate a rescaled, noisy crop in a synthetic
//! panorama, then composite the pair and check the resulting geometry.

use image::{DynamicImage, GrayImage, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zoomfig::matching::resample_gray;
use zoomfig::render::{Direction, LayoutSpec};
use zoomfig::{compose, locate, LocateOptions};

/// Smooth low-frequency texture; structure survives a 1.5x resample.
fn panorama_texture(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let xf = x as f64;
        let yf = y as f64;
        let v = 128.0
            + 50.0 * (xf / 19.0).sin() * (yf / 23.0).cos()
            + 45.0 * ((xf + yf) / 31.0).sin()
            + 25.0 * ((2.0 * xf - yf) / 41.0).cos();
        Luma([v.clamp(0.0, 255.0) as u8])
    })
}

/// Approximately Gaussian noise from twelve summed uniforms.
fn gaussian_noise(rng: &mut StdRng, sigma: f64) -> f64 {
    let sum: f64 = (0..12).map(|_| rng.gen_range(0.0..1.0)).sum();
    (sum - 6.0) * sigma
}

#[test]
fn locate_then_compose_full_scenario() {
    let pano = panorama_texture(1000, 800);

    // Crop the region at (300, 400), 80x100, enlarge it 1.5x, and add
    // noise; the matcher should undo the enlargement (scale ~0.667).
    let crop = GrayImage::from_fn(80, 100, |x, y| *pano.get_pixel(300 + x, 400 + y));
    let enlarged = resample_gray(&crop, 120, 150);
    let mut rng = StdRng::seed_from_u64(7);
    let noisy = GrayImage::from_fn(120, 150, |x, y| {
        let v = enlarged.get_pixel(x, y)[0] as f64 + gaussian_noise(&mut rng, 2.0);
        Luma([v.round().clamp(0.0, 255.0) as u8])
    });

    let pano_img = DynamicImage::ImageLuma8(pano);
    let zoom_img = DynamicImage::ImageLuma8(noisy);

    let placement = locate(&pano_img, &zoom_img, &LocateOptions::default()).unwrap();
    assert!(
        (placement.x - 300).abs() <= 10,
        "x = {} (expected ~300)",
        placement.x
    );
    assert!(
        (placement.y - 400).abs() <= 10,
        "y = {} (expected ~400)",
        placement.y
    );
    assert!(
        (placement.scale.ln() - (2.0f64 / 3.0).ln()).abs() <= 16.0f64.powf(1.0 / 12.0).ln() + 1e-9,
        "scale = {} (expected ~0.667 within one grid step)",
        placement.scale
    );
    assert!(
        placement.confidence >= 0.85,
        "confidence = {}",
        placement.confidence
    );
    assert!(!placement.is_low_confidence());

    let layout = LayoutSpec {
        direction: Direction::Right,
        gap: 20,
        margin: 0,
        ..LayoutSpec::default()
    };
    let result = compose(&pano_img, &zoom_img, &placement, &layout).unwrap();
    assert_eq!(result.canvas.width(), 1000 + 20 + 120);
    assert_eq!(result.canvas.height(), 800);
    assert!(result.drawn_boxes.contains_key("roi_box"));
    assert!(result.drawn_boxes.contains_key("guide_line"));

    // Same arguments, byte-identical canvas.
    let again = compose(&pano_img, &zoom_img, &placement, &layout).unwrap();
    assert_eq!(result.canvas.as_raw(), again.canvas.as_raw());
}

#[test]
fn manual_placement_override_is_accepted() {
    let pano = panorama_texture(400, 300);
    let crop = GrayImage::from_fn(60, 40, |x, y| *pano.get_pixel(100 + x, 80 + y));

    let pano_img = DynamicImage::ImageLuma8(pano);
    let zoom_img = DynamicImage::ImageLuma8(crop);

    // A hand-edited placement never goes through the matcher; the
    // compositor takes it as-is.
    let manual = zoomfig::Placement::new(180, 120, 1.0, 0.0);
    let layout = LayoutSpec {
        direction: Direction::Bottom,
        gap: 15,
        margin: 5,
        ..LayoutSpec::default()
    };
    let result = compose(&pano_img, &zoom_img, &manual, &layout).unwrap();
    assert_eq!(result.roi_rect, zoomfig::Rect::new(185, 125, 60, 40));
}
