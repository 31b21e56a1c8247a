use image::{DynamicImage, GrayImage, RgbaImage};

/// Grayscale view of any supported input (1/3/4 channel, 8-bit).
pub fn to_gray(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// RGBA view of any supported input. Gray inputs expand to opaque gray.
pub fn to_rgba(img: &DynamicImage) -> RgbaImage {
    img.to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    #[test]
    fn gray_round_trip_preserves_dimensions() {
        let mut rgba = RgbaImage::new(4, 3);
        rgba.put_pixel(1, 1, Rgba([200, 200, 200, 255]));
        let gray = to_gray(&DynamicImage::ImageRgba8(rgba));
        assert_eq!((gray.width(), gray.height()), (4, 3));
        assert!(gray.get_pixel(1, 1)[0] > 150);
    }

    #[test]
    fn gray_expands_to_opaque_rgba() {
        let mut gray = GrayImage::new(2, 2);
        gray.put_pixel(0, 0, Luma([77]));
        let rgba = to_rgba(&DynamicImage::ImageLuma8(gray));
        assert_eq!(*rgba.get_pixel(0, 0), Rgba([77, 77, 77, 255]));
    }
}
