//! Hexgrid computes the complete layout of a hexagonal grid from a partial
//! set of parameters, and describes it in a way that any raster or vector
//! renderer can draw. Drawing itself happens elsewhere.
//!
//! ```
//! use hexgrid::{GridConfig, HexGrid};
//!
//! let mut config = GridConfig::default();
//! config.hex_side = Some(20.0);
//! config.columns = Some(8);
//! config.rows = Some(6);
//! let grid = HexGrid::new(config).unwrap();
//! println!("{}x{}", grid.geometry().image_width(), grid.geometry().image_height());
//! // From here, walk grid.path() and grid.labels() with your renderer
//! ```
//!
//! Configs can also be built from string options with units attached, see
//! [GridConfig::from_options]. The resolution rules are described on
//! [GeometryModel].

pub mod config;
pub mod coord;
mod error;
pub mod geometry;
pub mod render;
mod util;

pub use crate::{
    config::{
        options::OptionMap, BackgroundConfig, CenterConfig, CenterStyle,
        CoordConfig, GridConfig,
    },
    coord::{CellLabel, LabelFormat, Labeler},
    error::{ErrorKind, GridError, Quantity},
    geometry::{
        CoordOrigin, CoordPlacement, DrawingFrame, GeometryModel, Grain,
        Margins,
    },
    render::{
        path::{BoundaryPath, PathCommand, Subpath, SubpathKind},
        unit::{Color3, HexOffset, Point2},
        HexGrid,
    },
    util::{
        range::NumRange,
        unit::{parse_length, LengthKind, OutputFormat},
    },
};
