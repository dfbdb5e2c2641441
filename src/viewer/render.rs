use image::{Rgb, RgbImage};

use super::state::CursorConvention;
use crate::config::DrawingConfig;
use crate::drawing::{draw_marker, draw_thick_line_between, overlay_text, MarkerShape, TextOverlay};
use crate::model::{LayerName, MatchingModel};
use crate::Result;

/// A rendered view of the model for one cursor value.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
    /// Overlay text, also meant for the window title.
    pub caption: String,
    /// Correspondences that were actually drawn, per layer.
    pub drawn: Vec<(LayerName, usize)>,
}

/// Draws revealed correspondences over the aligned view.
pub struct FrameRenderer {
    radius: i32,
    opacity: f32,
    marker_shape: MarkerShape,
    marker_radius: i32,
    point0_color: Rgb<u8>,
    point1_color: Rgb<u8>,
    line_color: Rgb<u8>,
    proposed_line_color: Rgb<u8>,
    fused_line_color: Rgb<u8>,
    overlay: TextOverlay,
    lowest_cursor: i64,
}

impl FrameRenderer {
    pub fn new(style: &DrawingConfig) -> Result<Self> {
        anyhow::ensure!(style.line_radius >= 0, "Line radius must be non-negative");
        anyhow::ensure!(
            (0.0..=1.0).contains(&style.line_opacity),
            "Line opacity must be within [0, 1]"
        );

        let overlay = TextOverlay::new(
            style.font_path.as_deref(),
            style.font_height,
            Rgb(style.text_foreground),
            Rgb(style.text_background),
        )?;

        Ok(Self {
            radius: style.line_radius,
            opacity: style.line_opacity,
            marker_shape: style.marker_shape,
            marker_radius: style.marker_radius,
            point0_color: Rgb(style.point0_color),
            point1_color: Rgb(style.point1_color),
            line_color: Rgb(style.line_color),
            proposed_line_color: Rgb(style.proposed_line_color),
            fused_line_color: Rgb(style.fused_line_color),
            overlay,
            lowest_cursor: CursorConvention::default().lower_bound(),
        })
    }

    /// Accept only cursors reachable under `convention`.
    pub fn with_cursor_convention(mut self, convention: CursorConvention) -> Self {
        self.lowest_cursor = convention.lower_bound();
        self
    }

    fn line_color_for(&self, layer: LayerName) -> Rgb<u8> {
        match layer {
            LayerName::Primary | LayerName::Current => self.line_color,
            LayerName::Proposed => self.proposed_line_color,
            LayerName::Fused => self.fused_line_color,
        }
    }

    /// Draw correspondences `0..=cursor` of every layer onto a copy of the aligned view.
    ///
    /// `cursor` must lie between the convention's lower bound and the last
    /// correspondence (or equal the lower bound for an empty list).
    ///
    /// Entries whose endpoints fall outside their point sets (including
    /// unmatched ones) are skipped.
    pub fn render(&self, model: &MatchingModel, cursor: i64) -> Result<Frame> {
        let lower = self.lowest_cursor;
        let upper = (model.number_of_correspondences() as i64 - 1).max(lower);
        anyhow::ensure!(
            (lower..=upper).contains(&cursor),
            "Cursor {} outside [{}, {}]",
            cursor,
            lower,
            upper
        );
        let mut image = model
            .align_image()
            .ok_or_else(|| anyhow::anyhow!("Both images must be set before rendering"))?
            .clone();

        let points0 = model.points(0)?;
        let points1 = model.points(1)?;
        let offset = model.align_offset() as i32;
        let mut drawn = Vec::new();

        for (name, layer) in model.layers() {
            let color = self.line_color_for(name);
            let revealed = layer
                .correspondences()
                .iter()
                .take(usize::try_from(cursor + 1).unwrap_or(0));

            for (index, correspondence) in revealed.enumerate() {
                let Some((p, q)) = correspondence.resolve(points0, points1) else {
                    tracing::trace!(layer = %name, index, ?correspondence, "Skipping unmatched correspondence");
                    continue;
                };
                let q = q.shifted_x(offset);
                draw_thick_line_between(&mut image, p, q, color, self.radius, self.opacity);
                draw_marker(&mut image, p.into(), self.marker_shape, self.marker_radius, self.point0_color);
                draw_marker(&mut image, q.into(), self.marker_shape, self.marker_radius, self.point1_color);
                drawn.push((name, index));
            }
        }

        let caption = overlay_text(cursor, model.energy());
        self.overlay.draw(&mut image, &caption);

        Ok(Frame {
            image,
            caption,
            drawn,
        })
    }
}
