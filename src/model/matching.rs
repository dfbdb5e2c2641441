use image::RgbImage;
use std::collections::BTreeMap;

use super::types::{Correspondence, CorrespondenceLayer, LayerMode, LayerName, Point2, PointSet};
use crate::compositing;
use crate::Result;

#[derive(Debug, Clone)]
struct Composites {
    align: RgbImage,
    merge: Option<RgbImage>,
}

/// Two images, their point sets and the correspondences between them.
///
/// The aligned and merged views are derived from the images and `alpha`;
/// every setter touching those inputs rebuilds both views before returning.
#[derive(Debug, Clone)]
pub struct MatchingModel {
    images: [Option<RgbImage>; 2],
    points: [PointSet; 2],
    mode: LayerMode,
    layers: BTreeMap<LayerName, CorrespondenceLayer>,
    alpha: f64,
    composites: Option<Composites>,
}

impl Default for MatchingModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingModel {
    pub fn new() -> Self {
        Self::with_mode(LayerMode::Single)
    }

    pub fn with_mode(mode: LayerMode) -> Self {
        Self {
            images: [None, None],
            points: [Vec::new(), Vec::new()],
            mode,
            layers: empty_layers(mode),
            alpha: 1.0,
            composites: None,
        }
    }

    // images

    pub fn image(&self, n: usize) -> Result<&RgbImage> {
        check_index(n)?;
        self.images[n]
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Image {} has not been set", n))
    }

    pub fn set_image(&mut self, n: usize, image: RgbImage) -> Result<()> {
        check_index(n)?;
        self.images[n] = Some(image);
        self.refresh_composites();
        Ok(())
    }

    pub fn set_images(&mut self, image0: RgbImage, image1: RgbImage) {
        self.images = [Some(image0), Some(image1)];
        self.refresh_composites();
    }

    pub fn width(&self, n: usize) -> Result<u32> {
        Ok(self.image(n)?.width())
    }

    pub fn height(&self, n: usize) -> Result<u32> {
        Ok(self.image(n)?.height())
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&alpha),
            "Blend factor must be within [0, 1], got {}",
            alpha
        );
        self.alpha = alpha;
        self.refresh_composites();
        Ok(())
    }

    /// Side-by-side view; present once both images are set.
    pub fn align_image(&self) -> Option<&RgbImage> {
        self.composites.as_ref().map(|c| &c.align)
    }

    /// Blended view; absent while the images differ in size.
    pub fn merge_image(&self) -> Option<&RgbImage> {
        self.composites.as_ref().and_then(|c| c.merge.as_ref())
    }

    /// X shift applied to points of the second image on the aligned view.
    pub fn align_offset(&self) -> u32 {
        self.images[0].as_ref().map_or(0, |image| image.width())
    }

    fn refresh_composites(&mut self) {
        let [Some(image0), Some(image1)] = &self.images else {
            self.composites = None;
            return;
        };

        let align = compositing::align(image0, image1);
        let merge = match compositing::merge(image0, image1, self.alpha) {
            Ok(merged) => Some(merged),
            Err(e) => {
                tracing::warn!(error = %e, "Merged view unavailable");
                None
            }
        };
        tracing::debug!(
            align_width = align.width(),
            align_height = align.height(),
            merged = merge.is_some(),
            alpha = self.alpha,
            "Composite views rebuilt"
        );
        self.composites = Some(Composites { align, merge });
    }

    // points

    pub fn points(&self, n: usize) -> Result<&[Point2]> {
        check_index(n)?;
        Ok(&self.points[n])
    }

    pub fn set_points(&mut self, n: usize, points: PointSet) -> Result<()> {
        check_index(n)?;
        self.points[n] = points;
        Ok(())
    }

    pub fn set_point_sets(&mut self, points0: PointSet, points1: PointSet) {
        self.points = [points0, points1];
    }

    pub fn number_of_points(&self, n: usize) -> Result<usize> {
        Ok(self.points(n)?.len())
    }

    // correspondences

    pub fn mode(&self) -> LayerMode {
        self.mode
    }

    /// Switch layer mode; all layers start out empty.
    pub fn set_mode(&mut self, mode: LayerMode) {
        self.mode = mode;
        self.layers = empty_layers(mode);
    }

    pub fn layer(&self, name: LayerName) -> Result<&CorrespondenceLayer> {
        self.layers
            .get(&name)
            .ok_or_else(|| anyhow::anyhow!("Layer '{}' is not part of {:?} mode", name, self.mode))
    }

    pub fn set_layer(&mut self, name: LayerName, layer: CorrespondenceLayer) -> Result<()> {
        anyhow::ensure!(
            self.mode.contains(name),
            "Layer '{}' is not part of {:?} mode",
            name,
            self.mode
        );
        self.layers.insert(name, layer);
        Ok(())
    }

    /// Layers in draw order, driving layer first.
    pub fn layers(&self) -> impl Iterator<Item = (LayerName, &CorrespondenceLayer)> + '_ {
        self.mode
            .layer_names()
            .iter()
            .filter_map(move |name| self.layers.get(name).map(|layer| (*name, layer)))
    }

    fn driving(&self) -> &CorrespondenceLayer {
        &self.layers[&self.mode.driving_layer()]
    }

    fn driving_mut(&mut self) -> &mut CorrespondenceLayer {
        let name = self.mode.driving_layer();
        self.layers.entry(name).or_default()
    }

    pub fn correspondences(&self) -> &[Correspondence] {
        self.driving().correspondences()
    }

    pub fn energy(&self) -> &[f64] {
        self.driving().energy()
    }

    pub fn number_of_correspondences(&self) -> usize {
        self.driving().len()
    }

    /// Replace correspondences and energy of the driving layer together.
    pub fn set_matching(&mut self, correspondences: Vec<Correspondence>, energy: Vec<f64>) -> Result<()> {
        let layer = CorrespondenceLayer::new(correspondences, energy)?;
        *self.driving_mut() = layer;
        Ok(())
    }

    /// Must keep the current length; use [`Self::set_matching`] to resize.
    pub fn set_correspondences(&mut self, correspondences: Vec<Correspondence>) -> Result<()> {
        self.driving_mut().set_correspondences(correspondences)
    }

    /// Must keep the current length; use [`Self::set_matching`] to resize.
    pub fn set_energy(&mut self, energy: Vec<f64>) -> Result<()> {
        self.driving_mut().set_energy(energy)
    }
}

fn empty_layers(mode: LayerMode) -> BTreeMap<LayerName, CorrespondenceLayer> {
    mode.layer_names()
        .iter()
        .map(|name| (*name, CorrespondenceLayer::default()))
        .collect()
}

fn check_index(n: usize) -> Result<()> {
    anyhow::ensure!(n < 2, "Image index must be 0 or 1, got {}", n);
    Ok(())
}
