use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Integer pixel coordinate, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The same point shifted along x, e.g. onto the right half of an aligned view.
    pub fn shifted_x(self, dx: i32) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

impl From<[i32; 2]> for Point2 {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for [i32; 2] {
    fn from(point: Point2) -> Self {
        [point.x, point.y]
    }
}

impl From<Point2> for (i32, i32) {
    fn from(point: Point2) -> Self {
        (point.x, point.y)
    }
}

/// Ordered points of one image; the index is the point's identity.
pub type PointSet = Vec<Point2>;

/// Pairing of a point in set 0 with a point in set 1, serialized as `[i0, i1]`.
///
/// `target == -1` marks an unmatched source point. Indices are kept as given;
/// [`Correspondence::resolve`] decides whether they can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Correspondence {
    pub source: i64,
    pub target: i64,
}

impl Correspondence {
    pub const UNMATCHED: i64 = -1;

    pub fn new(source: i64, target: i64) -> Self {
        Self { source, target }
    }

    pub fn unmatched(source: i64) -> Self {
        Self::new(source, Self::UNMATCHED)
    }

    pub fn is_matched(&self) -> bool {
        self.target != Self::UNMATCHED
    }

    /// Look up both endpoints; `None` if either index is outside its point set.
    pub fn resolve(&self, points0: &[Point2], points1: &[Point2]) -> Option<(Point2, Point2)> {
        let source = usize::try_from(self.source).ok()?;
        let target = usize::try_from(self.target).ok()?;
        Some((*points0.get(source)?, *points1.get(target)?))
    }
}

impl From<[i64; 2]> for Correspondence {
    fn from([source, target]: [i64; 2]) -> Self {
        Self { source, target }
    }
}

impl From<Correspondence> for [i64; 2] {
    fn from(c: Correspondence) -> Self {
        [c.source, c.target]
    }
}

/// Correspondences with one energy value each, kept at equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrespondenceLayer {
    correspondences: Vec<Correspondence>,
    energy: Vec<f64>,
}

impl CorrespondenceLayer {
    pub fn new(correspondences: Vec<Correspondence>, energy: Vec<f64>) -> Result<Self> {
        ensure_same_length(correspondences.len(), energy.len())?;
        Ok(Self {
            correspondences,
            energy,
        })
    }

    pub fn correspondences(&self) -> &[Correspondence] {
        &self.correspondences
    }

    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn len(&self) -> usize {
        self.correspondences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correspondences.is_empty()
    }

    pub fn set_correspondences(&mut self, correspondences: Vec<Correspondence>) -> Result<()> {
        ensure_same_length(correspondences.len(), self.energy.len())?;
        self.correspondences = correspondences;
        Ok(())
    }

    pub fn set_energy(&mut self, energy: Vec<f64>) -> Result<()> {
        ensure_same_length(self.correspondences.len(), energy.len())?;
        self.energy = energy;
        Ok(())
    }
}

fn ensure_same_length(correspondences: usize, energy: usize) -> Result<()> {
    anyhow::ensure!(
        correspondences == energy,
        "Energy length {} does not match correspondence count {}",
        energy,
        correspondences
    );
    Ok(())
}

/// Logical name of a correspondence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerName {
    Primary,
    Current,
    Proposed,
    Fused,
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerName::Primary => "primary",
            LayerName::Current => "current",
            LayerName::Proposed => "proposed",
            LayerName::Fused => "fused",
        };
        f.write_str(name)
    }
}

/// Which layers a model carries.
///
/// `Single` shows one matching result; `ThreeWay` shows the current, proposed
/// and fused correspondences of a move-making optimizer side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerMode {
    #[default]
    Single,
    ThreeWay,
}

impl LayerMode {
    /// Layers in draw order; the first one drives the cursor and the overlay.
    pub fn layer_names(&self) -> &'static [LayerName] {
        match self {
            LayerMode::Single => &[LayerName::Primary],
            LayerMode::ThreeWay => &[LayerName::Current, LayerName::Proposed, LayerName::Fused],
        }
    }

    pub fn driving_layer(&self) -> LayerName {
        self.layer_names()[0]
    }

    pub fn contains(&self, name: LayerName) -> bool {
        self.layer_names().contains(&name)
    }
}
