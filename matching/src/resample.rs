use image::GrayImage;
use rayon::prelude::*;

/// Resample to `width` × `height`: area-averaging when both extents
/// shrink (each destination pixel averages its source footprint, the
/// right filter for decimation), bilinear otherwise.
pub fn resample_gray(src: &GrayImage, width: u32, height: u32) -> GrayImage {
    if width == 0 || height == 0 {
        return GrayImage::new(0, 0);
    }
    if width == src.width() && height == src.height() {
        return src.clone();
    }
    if width <= src.width() && height <= src.height() {
        resample_area(src, width, height)
    } else {
        resample_bilinear(src, width, height)
    }
}

fn resample_area(src: &GrayImage, width: u32, height: u32) -> GrayImage {
    let mut dst = GrayImage::new(width, height);
    let sx = src.width() as f64 / width as f64;
    let sy = src.height() as f64 / height as f64;
    let src_raw = src.as_raw();
    let src_w = src.width() as usize;

    dst.as_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y0 = y as f64 * sy;
            let y1 = (y as f64 + 1.0) * sy;
            for (x, out) in row.iter_mut().enumerate() {
                let x0 = x as f64 * sx;
                let x1 = (x as f64 + 1.0) * sx;

                let mut acc = 0.0f64;
                let mut weight = 0.0f64;
                let mut iy = y0.floor() as usize;
                while (iy as f64) < y1 && iy < src.height() as usize {
                    let wy = (y1.min(iy as f64 + 1.0) - y0.max(iy as f64)).max(0.0);
                    let mut ix = x0.floor() as usize;
                    while (ix as f64) < x1 && ix < src_w {
                        let wx = (x1.min(ix as f64 + 1.0) - x0.max(ix as f64)).max(0.0);
                        acc += src_raw[iy * src_w + ix] as f64 * wx * wy;
                        weight += wx * wy;
                        ix += 1;
                    }
                    iy += 1;
                }

                *out = if weight > 0.0 {
                    (acc / weight).round().clamp(0.0, 255.0) as u8
                } else {
                    0
                };
            }
        });

    dst
}

fn resample_bilinear(src: &GrayImage, width: u32, height: u32) -> GrayImage {
    let mut dst = GrayImage::new(width, height);
    let src_w_span = (src.width() - 1) as f64;
    let src_h_span = (src.height() - 1) as f64;
    let dst_w_span = (width - 1).max(1) as f64;
    let dst_h_span = (height - 1).max(1) as f64;

    dst.as_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let fy = y as f64 / dst_h_span * src_h_span;
            let y0 = fy as u32;
            let y1 = (y0 + 1).min(src.height() - 1);
            let dy = fy - y0 as f64;
            for (x, out) in row.iter_mut().enumerate() {
                let fx = x as f64 / dst_w_span * src_w_span;
                let x0 = fx as u32;
                let x1 = (x0 + 1).min(src.width() - 1);
                let dx = fx - x0 as f64;

                let v00 = src.get_pixel(x0, y0)[0] as f64;
                let v10 = src.get_pixel(x1, y0)[0] as f64;
                let v01 = src.get_pixel(x0, y1)[0] as f64;
                let v11 = src.get_pixel(x1, y1)[0] as f64;

                let v0 = v00 * (1.0 - dx) + v10 * dx;
                let v1 = v01 * (1.0 - dx) + v11 * dx;
                let v = v0 * (1.0 - dy) + v1 * dy;

                *out = v.round().clamp(0.0, 255.0) as u8;
            }
        });

    dst
}
