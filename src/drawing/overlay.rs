use ab_glyph::{FontVec, PxScale};
use anyhow::Context;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::Path;

use crate::Result;

/// Overlay string for a cursor over `energy`.
///
/// `cursor` is the index of the last revealed correspondence; anything
/// outside `energy` (including `-1`, "nothing revealed") shows `0.0`.
pub fn overlay_text(cursor: i64, energy: &[f64]) -> String {
    let total = energy.len();
    let value = usize::try_from(cursor)
        .ok()
        .and_then(|index| energy.get(index));
    match value {
        Some(value) => format!("{}/{} points: Energy = {}", cursor + 1, total, value),
        None => format!("{}/{} points: Energy = 0.0", cursor + 1, total),
    }
}

/// Text drawn in the top-left corner of a frame.
///
/// Without a font the overlay is a no-op on the pixels; callers still get the
/// text through [`overlay_text`] for the window title and the log.
pub struct TextOverlay {
    font: Option<FontVec>,
    scale: PxScale,
    foreground: Rgb<u8>,
    background: Rgb<u8>,
}

impl TextOverlay {
    pub fn new(
        font_path: Option<&Path>,
        height: f32,
        foreground: Rgb<u8>,
        background: Rgb<u8>,
    ) -> Result<Self> {
        let font = match font_path {
            Some(path) => Some(load_font(path)?),
            None => None,
        };
        Ok(Self {
            font,
            scale: PxScale::from(height),
            foreground,
            background,
        })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn draw(&self, image: &mut RgbImage, text: &str) {
        let Some(font) = &self.font else {
            return;
        };
        let (width, height) = text_size(self.scale, font, text);
        draw_filled_rect_mut(
            image,
            Rect::at(0, 0).of_size(width.max(1), height.max(1)),
            self.background,
        );
        draw_text_mut(image, self.foreground, 0, 0, self.scale, font, text);
    }
}

fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read font file: {}", path.display()))?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| anyhow::anyhow!("Invalid font file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_text_revealed() {
        assert_eq!(overlay_text(1, &[0.1, 0.2, 0.3]), "2/3 points: Energy = 0.2");
    }

    #[test]
    fn test_overlay_text_nothing_revealed() {
        assert_eq!(overlay_text(-1, &[0.1, 0.2]), "0/2 points: Energy = 0.0");
        assert_eq!(overlay_text(0, &[]), "1/0 points: Energy = 0.0");
    }

    #[test]
    fn test_overlay_without_font_leaves_pixels() {
        let overlay = TextOverlay::new(None, 25.0, Rgb([0, 0, 0]), Rgb([255, 255, 255])).unwrap();
        let mut image = RgbImage::new(8, 8);
        overlay.draw(&mut image, "1/1 points: Energy = 0.5");
        assert!(!overlay.has_font());
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_missing_font_is_an_error() {
        let result = TextOverlay::new(
            Some(Path::new("/nonexistent/font.ttf")),
            25.0,
            Rgb([0, 0, 0]),
            Rgb([255, 255, 255]),
        );
        assert!(result.is_err());
    }
}
