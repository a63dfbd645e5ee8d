//! Fixed-point resolution of the grid layout. Seven quantities describe the
//! layout (hex side/width/height, image width/height, rows, columns) and
//! they're linked by a handful of equations. The user supplies some subset,
//! and each pass derives whatever the known values allow until everything is
//! known or nothing changes.
//!
//! The solver always works in the drawing frame (see the parent module), so
//! a horizontal grid is transposed on the way in and back on the way out.

use crate::{
    error::Quantity,
    geometry::{
        brick_offset, grid_extent,
        table::{orient, Placement},
        GeometryModel, Grain, Margins, MAX_COUNT, SIN_60,
    },
    timed,
    util::floor_tolerant,
    GridConfig, GridError,
};
use log::{debug, info, warn};

/// Every productive pass learns at least one of the seven quantities, so the
/// loop can't legitimately run longer than this
const MAX_PASSES: usize = 8;

/// Relative tolerance when comparing supplied values with derived ones
const TOLERANCE: f64 = 1e-6;

/// Quantities in the order they're reported when undetermined
const REPORT_ORDER: [Quantity; 7] = [
    Quantity::HexSide,
    Quantity::HexWidth,
    Quantity::HexHeight,
    Quantity::ImageWidth,
    Quantity::ImageHeight,
    Quantity::Rows,
    Quantity::Columns,
];

/// Partially known layout, in the drawing frame
#[derive(Clone, Debug)]
struct Solver {
    grain: Grain,
    hex_side: Option<f64>,
    hex_width: Option<f64>,
    hex_height: Option<f64>,
    image_width: Option<f64>,
    image_height: Option<f64>,
    rows: Option<u32>,
    columns: Option<u32>,
    margins: Margins,
    thickness: f64,
}

/// A fully known layout, in the drawing frame
#[derive(Copy, Clone, Debug)]
struct Solution {
    hex_side: f64,
    hex_width: f64,
    hex_height: f64,
    image_width: f64,
    image_height: f64,
    rows: u32,
    columns: u32,
}

impl Solver {
    fn new(config: &GridConfig) -> Self {
        let solver = Self {
            grain: config.grain,
            hex_side: config.hex_side,
            hex_width: config.hex_width,
            hex_height: config.hex_height,
            image_width: config.image_width,
            image_height: config.image_height,
            rows: config.rows,
            columns: config.columns,
            margins: config.margins,
            thickness: config.grid_thickness,
        };
        match config.grain {
            Grain::Vertical => solver,
            Grain::Horizontal => Self {
                hex_width: solver.hex_height,
                hex_height: solver.hex_width,
                image_width: solver.image_height,
                image_height: solver.image_width,
                rows: solver.columns,
                columns: solver.rows,
                margins: solver.margins.quarter_turn(),
                ..solver
            },
        }
    }

    /// Map a drawing frame quantity to what the user calls it. This is its
    /// own inverse.
    fn physical(&self, quantity: Quantity) -> Quantity {
        if self.grain == Grain::Vertical {
            return quantity;
        }
        match quantity {
            Quantity::HexSide => Quantity::HexSide,
            Quantity::HexWidth => Quantity::HexHeight,
            Quantity::HexHeight => Quantity::HexWidth,
            Quantity::ImageWidth => Quantity::ImageHeight,
            Quantity::ImageHeight => Quantity::ImageWidth,
            Quantity::Rows => Quantity::Columns,
            Quantity::Columns => Quantity::Rows,
        }
    }

    fn is_known(&self, quantity: Quantity) -> bool {
        match quantity {
            Quantity::HexSide => self.hex_side.is_some(),
            Quantity::HexWidth => self.hex_width.is_some(),
            Quantity::HexHeight => self.hex_height.is_some(),
            Quantity::ImageWidth => self.image_width.is_some(),
            Quantity::ImageHeight => self.image_height.is_some(),
            Quantity::Rows => self.rows.is_some(),
            Quantity::Columns => self.columns.is_some(),
        }
    }

    /// The first quantity that's still unknown, by its user-facing name
    fn missing(&self) -> Option<Quantity> {
        REPORT_ORDER
            .iter()
            .copied()
            .find(|quantity| !self.is_known(self.physical(*quantity)))
    }

    /// Fail if a derived length isn't a positive finite number
    fn ensure_positive(
        &self,
        quantity: Quantity,
        value: f64,
    ) -> Result<f64, GridError> {
        if !value.is_finite() {
            Err(GridError::range(
                self.physical(quantity).option(),
                "would not be a finite number",
            ))
        } else if value > 0.0 {
            Ok(value)
        } else {
            Err(GridError::range(
                self.physical(quantity).option(),
                format!("would be {}, which is not positive", value),
            ))
        }
    }

    /// Floor a derived count, failing if there's no room for even one or
    /// the count is more than [MAX_COUNT]
    fn ensure_count(
        &self,
        quantity: Quantity,
        value: f64,
    ) -> Result<u32, GridError> {
        let count = floor_tolerant(value);
        let option = self.physical(quantity).option();
        if count > f64::from(MAX_COUNT) {
            Err(GridError::range(
                option,
                format!(
                    "would be {}, which is more than {}",
                    count, MAX_COUNT
                ),
            ))
        } else if count >= 1.0 {
            Ok(count as u32)
        } else {
            // Also catches NaN
            Err(GridError::range(
                option,
                "is not positive: the image is too small for one hex",
            ))
        }
    }

    /// Derive everything the current values allow. Returns whether anything
    /// new was learned.
    fn pass(&mut self) -> Result<bool, GridError> {
        let mut progressed = false;

        // Hex dimensions
        if self.hex_side.is_none() {
            if let Some(width) = self.hex_width {
                self.hex_side = Some(width / 2.0);
                progressed = true;
            } else if let Some(height) = self.hex_height {
                self.hex_side = Some(height / (2.0 * SIN_60));
                progressed = true;
            }
        }
        if let Some(side) = self.hex_side {
            if self.hex_width.is_none() {
                self.hex_width = Some(2.0 * side);
                progressed = true;
            }
            if self.hex_height.is_none() {
                self.hex_height = Some(2.0 * side * SIN_60);
                progressed = true;
            }
        }

        // Width group: the margins, lines and columns fill the image width
        let fixed_width = self.margins.horizontal() + self.thickness;
        match (self.hex_width, self.columns, self.image_width) {
            (Some(hex_width), Some(columns), None) => {
                let image_width =
                    (0.25 + 0.75 * columns as f64) * hex_width + fixed_width;
                self.image_width = Some(
                    self.ensure_positive(Quantity::ImageWidth, image_width)?,
                );
                progressed = true;
            }
            (Some(hex_width), None, Some(image_width)) => {
                let columns =
                    ((image_width - fixed_width) / hex_width - 0.25) / 0.75;
                self.columns =
                    Some(self.ensure_count(Quantity::Columns, columns)?);
                progressed = true;
            }
            (None, Some(columns), Some(image_width)) => {
                let hex_width =
                    (image_width - fixed_width) / (0.25 + 0.75 * columns as f64);
                self.hex_width =
                    Some(self.ensure_positive(Quantity::HexWidth, hex_width)?);
                progressed = true;
            }
            _ => {}
        }

        // Height group. Needs the column count, because a single column
        // isn't offset by the wave.
        let fixed_height = self.margins.vertical() + self.thickness;
        if let Some(columns) = self.columns {
            let offset = brick_offset(columns);
            match (self.hex_height, self.rows, self.image_height) {
                (Some(hex_height), Some(rows), None) => {
                    let image_height =
                        (offset + rows as f64) * hex_height + fixed_height;
                    self.image_height = Some(self.ensure_positive(
                        Quantity::ImageHeight,
                        image_height,
                    )?);
                    progressed = true;
                }
                (Some(hex_height), None, Some(image_height)) => {
                    let rows = (image_height - fixed_height) / hex_height - offset;
                    self.rows = Some(self.ensure_count(Quantity::Rows, rows)?);
                    progressed = true;
                }
                (None, Some(rows), Some(image_height)) => {
                    let hex_height =
                        (image_height - fixed_height) / (offset + rows as f64);
                    self.hex_height = Some(
                        self.ensure_positive(Quantity::HexHeight, hex_height)?,
                    );
                    progressed = true;
                }
                _ => {}
            }
        }

        Ok(progressed)
    }

    /// Run passes until everything is known or nothing changes
    fn solve(&mut self) -> Result<Solution, GridError> {
        let mut stalled = false;
        for pass in 1..=MAX_PASSES {
            if self.missing().is_none() {
                break;
            }
            let progressed = self.pass()?;
            debug!("Resolution pass {}: {:?}", pass, self);
            if !progressed {
                stalled = true;
                break;
            }
        }

        match self.missing() {
            Some(quantity) if stalled => {
                Err(GridError::Underconstrained(quantity))
            }
            Some(_) => Err(GridError::Unsettled { passes: MAX_PASSES }),
            None => self.solution(),
        }
    }

    fn solution(&self) -> Result<Solution, GridError> {
        match (
            self.hex_side,
            self.hex_width,
            self.hex_height,
            self.image_width,
            self.image_height,
            self.rows,
            self.columns,
        ) {
            (
                Some(hex_side),
                Some(hex_width),
                Some(hex_height),
                Some(image_width),
                Some(image_height),
                Some(rows),
                Some(columns),
            ) => Ok(Solution {
                hex_side,
                hex_width,
                hex_height,
                image_width,
                image_height,
                rows,
                columns,
            }),
            _ => Err(GridError::Unsettled { passes: MAX_PASSES }),
        }
    }

    /// Over-specified input can disagree with itself. The first derivation
    /// wins, but let the user know. Hexes end up stretched when the width
    /// and height groups each derive their own hex size.
    fn warn_inconsistent(&self, solution: &Solution) {
        fn differs(a: f64, b: f64) -> bool {
            (a - b).abs() > TOLERANCE * a.abs().max(b.abs()).max(1.0)
        }

        let regular = [
            (Quantity::HexWidth, 2.0 * solution.hex_side, solution.hex_width),
            (
                Quantity::HexHeight,
                2.0 * SIN_60 * solution.hex_side,
                solution.hex_height,
            ),
        ];
        for (quantity, expected, actual) in regular.iter() {
            if differs(*expected, *actual) {
                warn!(
                    "{} {} doesn't match the hex side {} (expected {}); \
                     hexes will be stretched",
                    self.physical(*quantity),
                    actual,
                    solution.hex_side,
                    expected
                );
            }
        }

        let (needed_width, needed_height) = grid_extent(
            solution.hex_width,
            solution.hex_height,
            solution.columns,
            solution.rows,
            0.0,
        );
        let needed = [
            (
                Quantity::ImageWidth,
                needed_width + self.margins.horizontal() + self.thickness,
                solution.image_width,
            ),
            (
                Quantity::ImageHeight,
                needed_height + self.margins.vertical() + self.thickness,
                solution.image_height,
            ),
        ];
        for (quantity, needed, actual) in needed.iter() {
            if *actual < *needed && differs(*actual, *needed) {
                warn!(
                    "{} {} is too small for the grid, which needs {}",
                    self.physical(*quantity),
                    actual,
                    needed
                );
            }
        }
    }
}

/// Spread the space left over around the grid evenly between opposite
/// margins. Leftover space can be negative, which shrinks the margins.
fn center(margins: Margins, solution: &Solution, thickness: f64) -> Margins {
    let (grid_width, grid_height) = grid_extent(
        solution.hex_width,
        solution.hex_height,
        solution.columns,
        solution.rows,
        thickness,
    );
    let horizontal =
        (solution.image_width - margins.horizontal() - grid_width) / 2.0;
    let vertical =
        (solution.image_height - margins.vertical() - grid_height) / 2.0;
    let centered = Margins::new(
        margins.top + vertical,
        margins.right + horizontal,
        margins.bottom + vertical,
        margins.left + horizontal,
    );
    // Only possible when the image size was given and the grid overflows it
    let sides = [centered.top, centered.right, centered.bottom, centered.left];
    if sides.iter().any(|side| *side < 0.0) {
        warn!(
            "Grid is larger than the image, centering leaves margins of {:?}",
            centered
        );
    }
    centered
}

pub(super) fn resolve(config: &GridConfig) -> Result<GeometryModel, GridError> {
    config.check()?;

    let geometry = timed!("Grid resolution", {
        let mut solver = Solver::new(config);
        let solution = solver.solve()?;
        solver.warn_inconsistent(&solution);

        let mut margins = solver.margins;
        if config.centered {
            margins = center(margins, &solution, config.grid_thickness);
        }

        let (coord, low_first_column) = orient(
            config.output,
            config.grain,
            Placement {
                origin: config.coord.origin,
                bearing: config.coord.bearing,
                tilt: config.coord.tilt,
                distance: config.coord.distance,
            },
            solution.columns,
            config.low_first_column,
        );

        // Back to the image frame
        let (image_width, image_height, margins) = match config.grain {
            Grain::Vertical => {
                (solution.image_width, solution.image_height, margins)
            }
            Grain::Horizontal => (
                solution.image_height,
                solution.image_width,
                margins.unturn(),
            ),
        };

        GeometryModel {
            output: config.output,
            grain: config.grain,
            hex_side: solution.hex_side,
            hex_width: solution.hex_width,
            hex_height: solution.hex_height,
            image_width,
            image_height,
            rows: solution.rows,
            columns: solution.columns,
            margins,
            grid_thickness: config.grid_thickness,
            low_first_column,
            centered: config.centered,
            coord,
        }
    });

    info!(
        "Resolved {}x{} grid of {}-wide hexes on a {}x{} image",
        geometry.columns,
        geometry.rows,
        geometry.hex_width,
        geometry.image_width,
        geometry.image_height
    );
    Ok(geometry)
}
