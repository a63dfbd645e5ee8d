//! The boundary path program: a renderer-independent list of pen moves that
//! draws every grid line exactly once.
//!
//! Each hex column is a zig-zag. Walking along the top of the grid, the pen
//! alternates between a diagonal up or down (a quarter hex wide) and a flat
//! side (half a hex wide), so step `n` of a walk is picked by `n % 4`. The
//! wave (whether the first column is low) and the parity of the column count
//! decide which step each walk starts and stops on.
//!
//! All offsets are in hex units (see [HexOffset]) relative to the grid
//! origin of the drawing frame.

use crate::{geometry::GeometryModel, timed, HexOffset};
use serde::Serialize;
use std::ops::RangeInclusive;

/// A single relative pen movement
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathCommand {
    /// Move with the pen up
    MoveBy(HexOffset),
    /// Draw a line
    LineBy(HexOffset),
}

impl PathCommand {
    pub fn offset(self) -> HexOffset {
        match self {
            Self::MoveBy(offset) | Self::LineBy(offset) => offset,
        }
    }
}

/// What part of the grid a subpath draws
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubpathKind {
    /// The closed outline around the whole grid
    Outline,
    /// Bottom halves of one row of hexes. Only the diagonals are drawn,
    /// the flat bottoms come from the tops of the row below or the outline.
    Bottoms,
    /// The flat tops and diagonals between one row and the next
    Tops,
}

/// A connected run of commands from a starting point
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Subpath {
    pub kind: SubpathKind,
    /// The row this subpath belongs to, for interior lines
    pub row: Option<u32>,
    pub start: HexOffset,
    /// Where the pen ends up after the last command
    pub end: HexOffset,
    pub commands: Vec<PathCommand>,
}

impl Subpath {
    /// Does this subpath end where it started?
    pub fn is_closed(&self) -> bool {
        let gap = self.end - self.start;
        gap.x.abs() < 1e-9 && gap.y.abs() < 1e-9
    }

    /// Every drawn line as a pair of absolute `(from, to)` offsets
    pub fn lines(&self) -> Vec<(HexOffset, HexOffset)> {
        let mut cursor = self.start;
        let mut lines = Vec::new();
        for command in &self.commands {
            let next = cursor + command.offset();
            if let PathCommand::LineBy(_) = command {
                lines.push((cursor, next));
            }
            cursor = next;
        }
        lines
    }
}

/// The kinds of step a walk can take. Each maps a step index to an offset.
#[derive(Copy, Clone, Debug)]
enum Step {
    /// Along a row, left to right
    Side,
    /// Along a row, right to left
    SideReverse,
    /// Like [Step::Side], but the flat sides are skipped over
    SideSkip,
    /// Down the left or right edge
    Edge,
    /// Up the left or right edge
    EdgeReverse,
}

impl Step {
    fn offset(self, n: i64) -> HexOffset {
        match self {
            Self::Side | Self::SideSkip => match n.rem_euclid(4) {
                0 => HexOffset::new(0.25, 0.5),
                2 => HexOffset::new(0.25, -0.5),
                _ => HexOffset::new(0.5, 0.0),
            },
            Self::SideReverse => Self::Side.offset(n).mirror_x(),
            Self::Edge => HexOffset::new(Self::edge_x(n), 0.5),
            Self::EdgeReverse => HexOffset::new(Self::edge_x(n), -0.5),
        }
    }

    fn edge_x(n: i64) -> f64 {
        if n.rem_euclid(2) == 1 {
            0.25
        } else {
            -0.25
        }
    }

    fn command(self, n: i64) -> PathCommand {
        let offset = self.offset(n);
        match self {
            Self::SideSkip if n.rem_euclid(2) == 1 => PathCommand::MoveBy(offset),
            _ => PathCommand::LineBy(offset),
        }
    }
}

/// Builds one subpath, threading the pen position through each step
struct Walk {
    kind: SubpathKind,
    row: Option<u32>,
    start: HexOffset,
    cursor: HexOffset,
    commands: Vec<PathCommand>,
}

impl Walk {
    fn new(kind: SubpathKind, row: Option<u32>, start: HexOffset) -> Self {
        Self {
            kind,
            row,
            start,
            cursor: start,
            commands: Vec::new(),
        }
    }

    fn steps(mut self, step: Step, indexes: RangeInclusive<i64>) -> Self {
        for n in indexes {
            let command = step.command(n);
            self.cursor += command.offset();
            self.commands.push(command);
        }
        self
    }

    /// Finish the walk. Trailing pen-up moves are dropped, and a walk that
    /// draws nothing gives `None`.
    fn end(mut self) -> Option<Subpath> {
        while let Some(PathCommand::MoveBy(offset)) = self.commands.last() {
            self.cursor = self.cursor - *offset;
            self.commands.pop();
        }
        if self.commands.is_empty() {
            return None;
        }
        Some(Subpath {
            kind: self.kind,
            row: self.row,
            start: self.start,
            end: self.cursor,
            commands: self.commands,
        })
    }
}

/// Step ranges for the four sides of the outline
struct OutlineTable {
    start: HexOffset,
    top: RangeInclusive<i64>,
    right: RangeInclusive<i64>,
    bottom: RangeInclusive<i64>,
    left: RangeInclusive<i64>,
}

/// Step ranges and starting points for the lines inside the outline
struct InteriorTable {
    bottoms_start: HexOffset,
    bottoms: RangeInclusive<i64>,
    tops_start: HexOffset,
    tops: RangeInclusive<i64>,
}

fn outline_table(low_first_column: bool, columns: i64, rows: i64) -> OutlineTable {
    let odd = columns % 2;
    if low_first_column {
        OutlineTable {
            start: HexOffset::new(0.25, 0.5),
            top: 1..=2 * columns - odd,
            right: odd..=2 * rows - 2 + odd,
            bottom: 3 + odd..=2 * columns + 1 + 2 * odd,
            left: 0..=2 * rows - 1,
        }
    } else {
        OutlineTable {
            start: HexOffset::new(0.0, 0.5),
            top: 2..=2 * columns + 2 - (columns + 1) % 2,
            right: 1 - odd..=2 * rows - 1 - odd,
            bottom: 3 * odd..=2 * columns - 1 + 2 * odd,
            left: 0..=2 * rows - 2,
        }
    }
}

fn interior_table(low_first_column: bool, columns: i64) -> InteriorTable {
    if low_first_column {
        InteriorTable {
            bottoms_start: HexOffset::new(0.75, 0.5),
            bottoms: 0..=2 * columns - 3,
            tops_start: HexOffset::new(0.25, 1.5),
            tops: 1..=2 * columns - 1,
        }
    } else {
        InteriorTable {
            bottoms_start: HexOffset::new(0.75, 1.0),
            bottoms: 2..=2 * columns - 1,
            tops_start: HexOffset::new(0.25, 1.0),
            tops: 3..=2 * columns + 1,
        }
    }
}

/// The complete path program for a grid, plus the center of every cell.
/// The first subpath is always the outline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoundaryPath {
    subpaths: Vec<Subpath>,
    /// Cell centers, row by row
    centers: Vec<HexOffset>,
}

impl BoundaryPath {
    /// Build the path program for a resolved grid. This can't fail: any
    /// resolved geometry has at least one row and column.
    pub fn build(geometry: &GeometryModel) -> Self {
        timed!("Path building", {
            let low = geometry.low_first_column();
            let columns = i64::from(geometry.columns());
            let rows = geometry.rows();

            let outline = outline_table(low, columns, i64::from(rows));
            let mut subpaths: Vec<Subpath> =
                Walk::new(SubpathKind::Outline, None, outline.start)
                    .steps(Step::Side, outline.top)
                    .steps(Step::Edge, outline.right)
                    .steps(Step::SideReverse, outline.bottom)
                    .steps(Step::EdgeReverse, outline.left)
                    .end()
                    .into_iter()
                    .collect();

            let interior = interior_table(low, columns);
            for row in 0..rows {
                let down = HexOffset::new(0.0, row as f64);
                subpaths.extend(
                    Walk::new(
                        SubpathKind::Bottoms,
                        Some(row),
                        interior.bottoms_start + down,
                    )
                    .steps(Step::SideSkip, interior.bottoms.clone())
                    .end(),
                );
                // The last row's tops are part of the outline
                if row + 1 < rows {
                    subpaths.extend(
                        Walk::new(
                            SubpathKind::Tops,
                            Some(row),
                            interior.tops_start + down,
                        )
                        .steps(Step::Side, interior.tops.clone())
                        .end(),
                    );
                }
            }

            let centers = (0..rows)
                .flat_map(|row| {
                    (0..geometry.columns())
                        .map(move |column| geometry.center_offset(row, column))
                })
                .collect();

            Self { subpaths, centers }
        })
    }

    /// All subpaths, in drawing order. The outline comes first.
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn outline(&self) -> Option<&Subpath> {
        self.subpaths
            .first()
            .filter(|subpath| subpath.kind == SubpathKind::Outline)
    }

    /// Every subpath other than the outline
    pub fn interior(&self) -> &[Subpath] {
        match self.outline() {
            Some(_) => &self.subpaths[1..],
            None => &self.subpaths,
        }
    }

    pub fn centers(&self) -> &[HexOffset] {
        &self.centers
    }
}
