pub mod path;
pub mod unit;

use crate::{
    config::options::OptionMap,
    coord::{CellLabel, Labeler},
    geometry::{DrawingFrame, GeometryModel},
    render::path::BoundaryPath,
    GridConfig, GridError,
};
use log::info;
use serde::Serialize;

/// Everything a renderer needs to draw a grid: the config it came from (for
/// styling), the resolved geometry, the path program and the labels. A plan
/// is built in one shot and never changes afterwards.
///
/// ## Serialization
/// Plans serialize to a static set of snake-cased fields, so they can be
/// handed to renderers written in anything. Path and center offsets are in
/// hex units relative to [DrawingFrame::origin]; label anchors are absolute
/// positions in the drawing frame.
#[derive(Clone, Debug, Serialize)]
pub struct HexGrid {
    config: GridConfig,
    geometry: GeometryModel,
    frame: DrawingFrame,
    path: BoundaryPath,
    labels: Vec<CellLabel>,
}

impl HexGrid {
    /// Resolve a config and build the path program and labels for it.
    /// Returns an error if the config is invalid or underconstrained.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let geometry = GeometryModel::resolve(&config)?;
        let frame = geometry.drawing_frame();
        let path = BoundaryPath::build(&geometry);
        let labels = Labeler::new(&config.coord, &geometry).labels(&geometry);
        info!(
            "Built grid plan with {} subpaths and {} labels",
            path.subpaths().len(),
            labels.len()
        );
        Ok(Self {
            config,
            geometry,
            frame,
            path,
            labels,
        })
    }

    /// Shorthand for parsing string options and then building a plan
    pub fn from_options(options: &OptionMap) -> Result<Self, GridError> {
        Self::new(GridConfig::from_options(options)?)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GeometryModel {
        &self.geometry
    }

    /// The frame that the path, centers and labels are laid out in
    pub fn frame(&self) -> &DrawingFrame {
        &self.frame
    }

    pub fn path(&self) -> &BoundaryPath {
        &self.path
    }

    /// Every label in the grid, row by row. Empty if coordinates are
    /// suppressed.
    pub fn labels(&self) -> &[CellLabel] {
        &self.labels
    }

    /// Get a labeler, to look up the label of a single cell
    pub fn labeler(&self) -> Labeler {
        Labeler::new(&self.config.coord, &self.geometry)
    }

    /// Serialize this plan into JSON. This is one-way: plans are built from
    /// configs, never loaded.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
