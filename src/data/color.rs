use image::{imageops, DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Luma of an RGB image
pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    imageops::grayscale(image)
}

/// Replicate a gray channel into three channels
pub fn gray_to_rgb(image: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Luma([value]) = *image.get_pixel(x, y);
        Rgb([value, value, value])
    })
}

/// Colour image with its colour removed but still three channels
pub fn grayscaled_rgb(image: &RgbImage) -> RgbImage {
    gray_to_rgb(&rgb_to_gray(image))
}

/// Three-channel gray canvas for any decoded image, so overlays stand out.
pub fn to_display_rgb(image: &DynamicImage) -> RgbImage {
    if image.color().has_color() {
        grayscaled_rgb(&image.to_rgb8())
    } else {
        gray_to_rgb(&image.to_luma8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_to_rgb_replicates_channel() {
        let gray = GrayImage::from_fn(3, 2, |x, y| Luma([(x * 10 + y) as u8]));
        let rgb = gray_to_rgb(&gray);
        assert_eq!(*rgb.get_pixel(2, 1), Rgb([21, 21, 21]));
    }

    #[test]
    fn test_grayscaled_rgb_has_equal_channels() {
        let rgb = RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 60) as u8, (y * 60) as u8, 30]));
        let result = grayscaled_rgb(&rgb);
        assert!(result.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn test_display_rgb_keeps_gray_values() {
        let gray = GrayImage::from_pixel(2, 2, Luma([77]));
        let result = to_display_rgb(&DynamicImage::ImageLuma8(gray));
        assert!(result.pixels().all(|p| *p == Rgb([77, 77, 77])));
    }
}
