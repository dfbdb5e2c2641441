use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::color::to_display_rgb;
use crate::model::{Correspondence, CorrespondenceLayer, LayerMode, LayerName, MatchingModel, Point2};

/// Load an image as a grayscaled three-channel canvas.
pub fn load_image<P: AsRef<Path>>(path: P) -> crate::Result<RgbImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Image file does not exist: {}",
            path.display()
        ));
    }

    let img = image::open(path)?;
    let rgb = to_display_rgb(&img);
    validate_image_size(&rgb, 1)?;
    Ok(rgb)
}

pub fn validate_image_size(img: &RgbImage, min_size: u32) -> crate::Result<()> {
    if img.width() < min_size || img.height() < min_size {
        return Err(anyhow::anyhow!("Image too small: {}x{}, minimum: {}x{}",
                          img.width(), img.height(), min_size, min_size));
    }
    Ok(())
}

/// Correspondences and energy of one extra layer in a matching file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub correspondences: Vec<Correspondence>,
    pub energy: Vec<f64>,
}

/// On-disk matching result.
///
/// The top-level correspondences drive the viewer; extra `layers` (proposed
/// and fused) switch the model to three-way mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingFile {
    pub points0: Vec<Point2>,
    pub points1: Vec<Point2>,
    pub correspondences: Vec<Correspondence>,
    pub energy: Vec<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub layers: BTreeMap<LayerName, LayerRecord>,
}

impl MatchingFile {
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let file: MatchingFile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid matching file {}: {}", path.display(), e))?;
        tracing::info!(
            path = %path.display(),
            points0 = file.points0.len(),
            points1 = file.points1.len(),
            correspondences = file.correspondences.len(),
            "Matching file loaded"
        );
        Ok(file)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn mode(&self) -> LayerMode {
        if self.layers.is_empty() {
            LayerMode::Single
        } else {
            LayerMode::ThreeWay
        }
    }

    /// Move points and layers into `model`, switching its layer mode as needed.
    pub fn apply_to(self, model: &mut MatchingModel) -> crate::Result<()> {
        let mode = self.mode();
        for name in self.layers.keys() {
            anyhow::ensure!(
                mode.contains(*name) && *name != mode.driving_layer(),
                "Layer '{}' cannot be given as an extra layer",
                name
            );
        }

        if model.mode() != mode {
            model.set_mode(mode);
        }
        model.set_point_sets(self.points0, self.points1);
        model.set_matching(self.correspondences, self.energy)?;
        for (name, record) in self.layers {
            model.set_layer(name, CorrespondenceLayer::new(record.correspondences, record.energy)?)?;
        }
        Ok(())
    }
}
