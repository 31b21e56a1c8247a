//! Benchmarks for the two pipeline operations: multi-scale ROI
//! localization and figure compositing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, GrayImage, Luma};
use std::time::Duration;
use zoomfig::render::{Direction, LayoutSpec, ScaleBarSpec};
use zoomfig::{compose, locate, LocateOptions, Placement};

/// Synthetic panorama with smooth structure for stable correlation.
fn textured(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let xf = x as f64;
        let yf = y as f64;
        let v = 128.0
            + 52.0 * (xf / 13.0).sin() * (yf / 17.0).cos()
            + 40.0 * ((xf + 2.0 * yf) / 29.0).sin();
        Luma([v.clamp(0.0, 255.0) as u8])
    })
}

fn crop_of(img: &GrayImage, x: u32, y: u32, w: u32, h: u32) -> GrayImage {
    GrayImage::from_fn(w, h, |cx, cy| *img.get_pixel(x + cx, y + cy))
}

fn benchmark_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for size in [256u32, 512] {
        let pano = textured(size, size * 3 / 4);
        let crop = crop_of(&pano, size / 4, size / 8, size / 8, size / 8);
        let pano_img = DynamicImage::ImageLuma8(pano);
        let crop_img = DynamicImage::ImageLuma8(crop);
        let opts = LocateOptions {
            scale_range: (0.5, 2.0),
            steps: 7,
            ..LocateOptions::default()
        };

        group.bench_with_input(
            BenchmarkId::new("multi_scale", format!("{size}px")),
            &(pano_img, crop_img),
            |b, (pano, crop)| {
                b.iter(|| locate(black_box(pano), black_box(crop), &opts).unwrap());
            },
        );
    }

    group.finish();
}

fn benchmark_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(30);

    for size in [512u32, 1024] {
        let pano = DynamicImage::ImageLuma8(textured(size, size * 3 / 4));
        let zoom = DynamicImage::ImageLuma8(textured(size / 3, size / 4));
        let placement = Placement::new(size as i64 / 4, size as i64 / 8, 0.8, 0.95);
        let mut layout = LayoutSpec {
            direction: Direction::Right,
            ..LayoutSpec::default()
        };
        layout.zoom_scale_bar = Some(ScaleBarSpec::new(size as f64 / 8.0, 1.5));

        group.bench_with_input(
            BenchmarkId::new("decorated", format!("{size}px")),
            &(pano, zoom),
            |b, (pano, zoom)| {
                b.iter(|| compose(black_box(pano), black_box(zoom), &placement, &layout).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_locate, benchmark_compose);
criterion_main!(benches);
