use crate::{
    config::CoordConfig,
    geometry::{CoordOrigin, GeometryModel},
    LabelFormat, Point2,
};
use serde::Serialize;

fn letter(digit: u32) -> char {
    if digit == 0 {
        'Z'
    } else {
        char::from(b'A' + (digit - 1) as u8)
    }
}

/// Bijective base 26: `1 -> A`, `26 -> Z`, `27 -> AA`, `28 -> AB`. There is no
/// zero digit, so 0 comes out as `Z`.
pub fn alpha(number: u32) -> String {
    let mut letters = Vec::new();
    let mut remaining = number;
    while remaining > 26 {
        letters.push(letter(remaining % 26));
        remaining = (remaining - 1) / 26;
    }
    letters.push(letter(remaining));
    letters.iter().rev().collect()
}

/// A run of one repeated letter: `1 -> A`, `26 -> Z`, `27 -> AA`,
/// `52 -> ZZ`, `53 -> AAA`. 0 comes out empty.
pub fn alpha_tally(number: u32) -> String {
    if number == 0 {
        return String::new();
    }
    let count = ((number - 1) / 26 + 1) as usize;
    letter((number - 1) % 26 + 1).to_string().repeat(count)
}

/// A label for a single cell, positioned in the drawing frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellLabel {
    pub row: u32,
    pub column: u32,
    pub text: String,
    /// Where the label goes: the cell center, pushed out along the bearing
    pub anchor: Point2,
    /// Text rotation in degrees, in the output format's convention
    pub tilt: f64,
}

/// Generates coordinate labels for the cells of a resolved grid.
#[derive(Clone, Debug)]
pub struct Labeler {
    format: LabelFormat,
    origin: CoordOrigin,
    rows: u32,
    columns: u32,
    column_start: u32,
    row_start: u32,
    column_skip: u32,
    row_skip: u32,
}

impl Labeler {
    /// Numbering rules come from the config, but the origin corner and grid
    /// size come from the geometry, since the grain can change both.
    pub fn new(config: &CoordConfig, geometry: &GeometryModel) -> Self {
        Self {
            format: config.format.clone(),
            origin: geometry.coord().origin,
            rows: geometry.rows(),
            columns: geometry.columns(),
            column_start: config.column_start,
            row_start: config.row_start,
            // Validation keeps these positive, but a zero would panic below
            column_skip: config.column_skip.max(1),
            row_skip: config.row_skip.max(1),
        }
    }

    pub fn format(&self) -> &LabelFormat {
        &self.format
    }

    /// Get the displayed `(column, row)` numbers for a cell, or `None` if the
    /// cell is outside the grid or skipped. Skipping is decided on the raw
    /// index, before the origin corner is applied. A number that doesn't fit
    /// in a `u32` also gives `None`.
    pub fn numbers(&self, row: u32, column: u32) -> Option<(u32, u32)> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        let raw_row = row.checked_add(self.row_start)?;
        let raw_column = column.checked_add(self.column_start)?;
        if raw_row % self.row_skip != 0 || raw_column % self.column_skip != 0 {
            return None;
        }

        let column_number = if self.origin.is_right() {
            (self.columns - column - 1).checked_add(self.column_start)?
        } else {
            raw_column
        };
        let row_number = if self.origin.is_top() {
            raw_row
        } else {
            (self.rows - row - 1).checked_add(self.row_start)?
        };
        Some((column_number, row_number))
    }

    /// Get the label text for a cell. `None` if coordinates are turned off or
    /// the cell doesn't get a label.
    pub fn label(&self, row: u32, column: u32) -> Option<String> {
        if self.format.is_suppressed() {
            return None;
        }
        let (column_number, row_number) = self.numbers(row, column)?;
        Some(self.format.render(column_number, row_number))
    }

    /// Get every label in the grid, row by row, with anchors
    pub fn labels(&self, geometry: &GeometryModel) -> Vec<CellLabel> {
        let placement = geometry.coord();
        let bearing = placement.bearing.to_radians();
        let push = Point2::new(
            placement.distance * bearing.cos(),
            placement.distance * bearing.sin(),
        );

        let mut labels = Vec::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                if let Some(text) = self.label(row, column) {
                    labels.push(CellLabel {
                        row,
                        column,
                        text,
                        anchor: geometry.cell_center(row, column) + push,
                        tilt: placement.tilt,
                    });
                }
            }
        }
        labels
    }
}
