//! The resolved geometry of a hex grid. A [GeometryModel] can only be created
//! by resolving a [GridConfig], and is immutable after that.
//!
//! ## Frames
//!
//! All grid math happens in the *drawing frame*, where hex columns always run
//! top to bottom and the first column sits at the left edge. A vertical grain
//! grid is drawn in that frame directly. A horizontal grain grid is drawn in
//! it and then turned a quarter turn clockwise onto the image, so the left
//! edge of the drawing frame ends up on the top edge of the image. Image
//! dimensions and margins in the model always describe the final image;
//! [GeometryModel::drawing_frame] gives the turned version.

mod resolve;
mod table;

pub use table::{
    angle_convention, horizontal_origin, horizontal_turn, AngleConvention,
    GrainTurn, WaveFlip,
};

use crate::{GridConfig, GridError, HexOffset, OutputFormat, Point2};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Sine of 60°, the ratio of a hex's height to its width
pub const SIN_60: f64 = 0.866_025_403_784_438_6; // sqrt(3)/2

/// Most rows or columns a grid can have, whether given or derived
pub const MAX_COUNT: u32 = 65_535;

/// Which way the hex columns run.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Grain {
    /// Columns run top to bottom, and each hex has flat top and bottom sides
    Vertical,
    /// Columns run left to right. Handled as a transposed vertical grid.
    Horizontal,
}

impl Default for Grain {
    fn default() -> Self {
        Self::Vertical
    }
}

/// Which image corner holds the first numbered cell.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CoordOrigin {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl CoordOrigin {
    /// Does numbering start from the right edge?
    pub fn is_right(self) -> bool {
        matches!(self, Self::UpperRight | Self::LowerRight)
    }

    /// Does numbering start from the top edge?
    pub fn is_top(self) -> bool {
        matches!(self, Self::UpperLeft | Self::UpperRight)
    }
}

impl Default for CoordOrigin {
    fn default() -> Self {
        Self::UpperLeft
    }
}

/// Space between the image edges and the grid.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate,
)]
pub struct Margins {
    #[validate(range(min = 0.0))]
    pub top: f64,
    #[validate(range(min = 0.0))]
    pub right: f64,
    #[validate(range(min = 0.0))]
    pub bottom: f64,
    #[validate(range(min = 0.0))]
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same margin on all four sides
    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Sum of the left and right margins
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom margins
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Rotate image margins into a frame that will be turned a quarter turn
    /// clockwise to become the image. Each side shifts by one position.
    pub fn quarter_turn(self) -> Self {
        Self::new(self.right, self.bottom, self.left, self.top)
    }

    /// Inverse of [Self::quarter_turn]
    pub fn unturn(self) -> Self {
        Self::new(self.left, self.top, self.right, self.bottom)
    }
}

/// Where coordinate labels go relative to their hex center, with angles
/// already converted to the output format's conventions.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CoordPlacement {
    /// The corner that numbering starts from, as seen in the drawing frame
    pub origin: CoordOrigin,
    /// Direction from the hex center to the label, in degrees
    pub bearing: f64,
    /// Rotation of the label text, in degrees
    pub tilt: f64,
    /// Distance from the hex center to the label
    pub distance: f64,
}

/// The logical frame that paths, centers and labels are laid out in. See the
/// module docs for how it relates to the final image.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DrawingFrame {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Top-left corner of the grid. Lines are centered on their path, so
    /// this is inset by half the line thickness.
    pub origin: Point2,
    /// Number of clockwise quarter turns from this frame to the image
    pub quarter_turns: u8,
}

/// A fully determined hex grid layout. Lengths are in the native unit of
/// the output format.
///
/// The hex dimensions and the row and column counts are in the drawing
/// frame, while the image size and margins are in the image frame. The two
/// only differ for horizontal grain, where [Self::columns] counts what the
/// user calls rows and [Self::hex_width] runs along the image's height.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeometryModel {
    output: OutputFormat,
    grain: Grain,
    hex_side: f64,
    hex_width: f64,
    hex_height: f64,
    image_width: f64,
    image_height: f64,
    rows: u32,
    columns: u32,
    margins: Margins,
    grid_thickness: f64,
    low_first_column: bool,
    centered: bool,
    coord: CoordPlacement,
}

impl GeometryModel {
    /// Resolve a config into a complete layout, deriving every quantity that
    /// wasn't given. Fails if the config is invalid, or doesn't pin down
    /// enough quantities to determine the rest.
    pub fn resolve(config: &GridConfig) -> Result<Self, GridError> {
        resolve::resolve(config)
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    pub fn grain(&self) -> Grain {
        self.grain
    }

    /// Length of one side of a hex, which is also its circumradius
    pub fn hex_side(&self) -> f64 {
        self.hex_side
    }

    /// Distance between opposite vertices, across the columns. Drawing frame.
    pub fn hex_width(&self) -> f64 {
        self.hex_width
    }

    /// Distance between opposite sides, along the columns. Drawing frame.
    pub fn hex_height(&self) -> f64 {
        self.hex_height
    }

    /// Width of the final image
    pub fn image_width(&self) -> f64 {
        self.image_width
    }

    /// Height of the final image
    pub fn image_height(&self) -> f64 {
        self.image_height
    }

    /// Number of hexes in each drawn column. For horizontal grain this is
    /// the number of image columns.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of drawn columns. For horizontal grain this is the number of
    /// image rows.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Margins of the final image, not turned into the drawing frame
    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn grid_thickness(&self) -> f64 {
        self.grid_thickness
    }

    /// Does the first column sit half a hex lower than the second?
    pub fn low_first_column(&self) -> bool {
        self.low_first_column
    }

    pub fn centered(&self) -> bool {
        self.centered
    }

    pub fn coord(&self) -> CoordPlacement {
        self.coord
    }

    /// Width and height that the grid itself occupies, lines included, in
    /// the drawing frame
    pub fn grid_extent(&self) -> (f64, f64) {
        grid_extent(
            self.hex_width,
            self.hex_height,
            self.columns,
            self.rows,
            self.grid_thickness,
        )
    }

    /// Offset of a cell's center from the grid origin, in hex units. Columns
    /// alternate between high and low, depending on the wave.
    pub fn center_offset(&self, row: u32, column: u32) -> HexOffset {
        let low = u32::from(self.low_first_column);
        HexOffset::new(
            0.75 * column as f64 + 0.5,
            0.5 * (1 + (column + low) % 2) as f64 + row as f64,
        )
    }

    /// Position of a cell's center in the drawing frame
    pub fn cell_center(&self, row: u32, column: u32) -> Point2 {
        self.drawing_frame().origin
            + self
                .center_offset(row, column)
                .scale(self.hex_width, self.hex_height)
    }

    /// Get the frame that the grid is drawn in. For vertical grain this is
    /// just the image.
    pub fn drawing_frame(&self) -> DrawingFrame {
        let (width, height, margins, quarter_turns) = match self.grain {
            Grain::Vertical => {
                (self.image_width, self.image_height, self.margins, 0)
            }
            Grain::Horizontal => (
                self.image_height,
                self.image_width,
                self.margins.quarter_turn(),
                1,
            ),
        };
        let inset = self.grid_thickness / 2.0;
        DrawingFrame {
            width,
            height,
            margins,
            origin: Point2::new(margins.left + inset, margins.top + inset),
            quarter_turns,
        }
    }
}

/// Extra height the grid needs when neighboring columns are offset by half a
/// hex. A single column has no offset.
pub(crate) fn brick_offset(columns: u32) -> f64 {
    if columns > 1 {
        0.5
    } else {
        0.0
    }
}

/// Occupied width and height of a grid, lines included
pub(crate) fn grid_extent(
    hex_width: f64,
    hex_height: f64,
    columns: u32,
    rows: u32,
    thickness: f64,
) -> (f64, f64) {
    (
        (0.25 + 0.75 * columns as f64) * hex_width + thickness,
        (brick_offset(columns) + rows as f64) * hex_height + thickness,
    )
}
