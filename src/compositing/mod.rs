//! Side-by-side and blended views of an image pair.

use image::{imageops, Rgb, RgbImage};

use crate::Result;

/// Concatenate two images horizontally.
///
/// The result is `width0 + width1` wide and as tall as the taller input; the
/// uncovered area under the shorter image stays black. Points of the second
/// image must be shifted by `img0.width()` when drawn onto the result.
pub fn align(img0: &RgbImage, img1: &RgbImage) -> RgbImage {
    let width = img0.width() + img1.width();
    let height = img0.height().max(img1.height());

    let mut result = RgbImage::new(width, height);
    imageops::replace(&mut result, img0, 0, 0);
    imageops::replace(&mut result, img1, img0.width() as i64, 0);
    result
}

/// Blend two equally sized images as `alpha * img0 + (1 - alpha) * img1`.
pub fn merge(img0: &RgbImage, img1: &RgbImage, alpha: f64) -> Result<RgbImage> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&alpha),
        "Blend factor must be within [0, 1], got {}",
        alpha
    );
    anyhow::ensure!(
        img0.dimensions() == img1.dimensions(),
        "Cannot merge images of different sizes: {}x{} and {}x{}",
        img0.width(),
        img0.height(),
        img1.width(),
        img1.height()
    );

    Ok(RgbImage::from_fn(img0.width(), img0.height(), |x, y| {
        let a = img0.get_pixel(x, y);
        let b = img1.get_pixel(x, y);
        Rgb([
            blend_channel(a[0], b[0], alpha),
            blend_channel(a[1], b[1], alpha),
            blend_channel(a[2], b[2], alpha),
        ])
    }))
}

fn blend_channel(a: u8, b: u8, alpha: f64) -> u8 {
    (alpha * a as f64 + (1.0 - alpha) * b as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}
