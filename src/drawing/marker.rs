use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;
use serde::{Deserialize, Serialize};

use super::thick_line::draw_segment;

/// Shape drawn at each endpoint of a correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Cross,
}

pub fn draw_marker(
    image: &mut RgbImage,
    center: (i32, i32),
    shape: MarkerShape,
    radius: i32,
    color: Rgb<u8>,
) {
    let (x, y) = center;
    match shape {
        MarkerShape::Circle => draw_hollow_circle_mut(image, center, radius, color),
        MarkerShape::Cross => {
            draw_segment(image, (x - radius, y), (x + radius, y), color, 1.0);
            draw_segment(image, (x, y - radius), (x, y + radius), color, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_marker_arms() {
        let mut image = RgbImage::new(9, 9);
        draw_marker(&mut image, (4, 4), MarkerShape::Cross, 2, Rgb([255, 0, 0]));
        for (x, y) in [(2, 4), (6, 4), (4, 2), (4, 6), (4, 4)] {
            assert_eq!(*image.get_pixel(x, y), Rgb([255, 0, 0]));
        }
        assert_eq!(*image.get_pixel(3, 3), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_circle_marker_leaves_center_empty() {
        let mut image = RgbImage::new(16, 16);
        draw_marker(&mut image, (8, 8), MarkerShape::Circle, 4, Rgb([0, 255, 0]));
        assert_eq!(*image.get_pixel(8, 8), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(12, 8), Rgb([0, 255, 0]));
    }
}
