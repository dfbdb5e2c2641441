use image::{Rgb, RgbImage};
use imageproc::drawing::BresenhamLineIter;

use crate::model::Point2;

/// Blend `color` into `pixel` with the given opacity.
///
/// An opacity of `1.0` (or more) overwrites the pixel; anything lower mixes
/// each channel as `opacity * color + (1 - opacity) * pixel`, rounded.
pub fn blend_pixel(pixel: &mut Rgb<u8>, color: Rgb<u8>, opacity: f32) {
    if opacity >= 1.0 {
        *pixel = color;
        return;
    }
    for c in 0..3 {
        let mixed = opacity * color[c] as f32 + (1.0 - opacity) * pixel[c] as f32;
        pixel[c] = mixed.round().clamp(0.0, 255.0) as u8;
    }
}

/// Draw a one pixel wide segment between two integer endpoints.
///
/// Pixels falling outside the canvas are clipped.
pub fn draw_segment(
    image: &mut RgbImage,
    start: (i32, i32),
    end: (i32, i32),
    color: Rgb<u8>,
    opacity: f32,
) {
    let (width, height) = image.dimensions();
    let line = BresenhamLineIter::new(
        (start.0 as f32, start.1 as f32),
        (end.0 as f32, end.1 as f32),
    );

    for (x, y) in line {
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            continue;
        }
        blend_pixel(image.get_pixel_mut(x as u32, y as u32), color, opacity);
    }
}

/// Octant offsets `(x, y)` of a midpoint circle of the given radius, `x <= y`.
///
/// The axis points `(0, radius)` are not part of the result; the diagonal
/// point `(x, x)` appears at most once.
pub fn perimeter_offsets(radius: i32) -> Vec<(i32, i32)> {
    let mut offsets = Vec::new();
    let mut f = 1 - radius;
    let mut dd_fx = 0;
    let mut dd_fy = -2 * radius;
    let mut x = 0;
    let mut y = radius;

    while x < y {
        if f >= 0 {
            dd_fy += 2;
            f += dd_fy;
            y -= 1;
        }
        x += 1;
        dd_fx += 2;
        f += dd_fx + 1;
        if x != y + 1 {
            offsets.push((x, y));
        }
    }

    offsets
}

/// Draw a thick line as a sweep of parallel segments around the ideal one.
///
/// The centre segment and the four axis-offset segments are opaque; the
/// segments generated from the circle perimeter are blended with `opacity`.
/// The covered area approximates a capsule of the given radius.
///
/// # Panics
///
/// Panics if `radius` is negative or `opacity` is outside `[0, 1]`.
pub fn draw_thick_line(
    image: &mut RgbImage,
    start: (i32, i32),
    end: (i32, i32),
    color: Rgb<u8>,
    radius: i32,
    opacity: f32,
) {
    assert!(radius >= 0, "line radius must be non-negative, got {}", radius);
    assert!(
        (0.0..=1.0).contains(&opacity),
        "line opacity must be within [0, 1], got {}",
        opacity
    );

    let (x0, y0) = start;
    let (x1, y1) = end;
    draw_segment(image, start, end, color, 1.0);
    if radius == 0 {
        return;
    }

    for (dx, dy) in [(-radius, 0), (radius, 0), (0, -radius), (0, radius)] {
        draw_segment(image, (x0 + dx, y0 + dy), (x1 + dx, y1 + dy), color, 1.0);
    }

    for (x, y) in perimeter_offsets(radius) {
        let mut offsets = vec![(-y, -x), (-y, x), (y, -x), (y, x)];
        if x != y {
            offsets.extend([(-x, -y), (x, y), (x, -y), (-x, y)]);
        }
        for (dx, dy) in offsets {
            draw_segment(image, (x0 + dx, y0 + dy), (x1 + dx, y1 + dy), color, opacity);
        }
    }
}

/// [`draw_thick_line`] taking the endpoints as points.
pub fn draw_thick_line_between(
    image: &mut RgbImage,
    from: Point2,
    to: Point2,
    color: Rgb<u8>,
    radius: i32,
    opacity: f32,
) {
    draw_thick_line(image, from.into(), to.into(), color, radius, opacity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perimeter_offsets_small_radii() {
        assert!(perimeter_offsets(1).is_empty());
        assert_eq!(perimeter_offsets(2), vec![(1, 2)]);
        assert_eq!(perimeter_offsets(3), vec![(1, 3), (2, 2)]);
        assert_eq!(perimeter_offsets(4), vec![(1, 4), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_blend_pixel_half_opacity() {
        let mut pixel = Rgb([0, 100, 255]);
        blend_pixel(&mut pixel, Rgb([200, 100, 55]), 0.5);
        assert_eq!(pixel, Rgb([100, 100, 155]));
    }

    #[test]
    fn test_segment_is_clipped() {
        let mut image = RgbImage::new(4, 4);
        draw_segment(&mut image, (-5, 1), (10, 1), Rgb([9, 9, 9]), 1.0);
        for x in 0..4 {
            assert_eq!(*image.get_pixel(x, 1), Rgb([9, 9, 9]));
        }
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
    }
}
