//! Lookup tables for the parts of orientation that depend on the output
//! format and the grain. Each output format measures angles in its own way,
//! and a horizontal grid has to be drawn as a turned vertical one, so the
//! user-facing coordinate placement is translated here before rendering.

use crate::{
    geometry::{CoordOrigin, CoordPlacement, Grain},
    util, OutputFormat,
};

/// How a format measures coordinate angles, relative to the counterclockwise
/// degrees (0° = east) that users give them in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AngleConvention {
    pub bearing_sign: f64,
    pub bearing_offset: f64,
    pub tilt_sign: f64,
}

impl AngleConvention {
    /// Convert a user-facing `(bearing, tilt)` pair to this convention
    pub fn apply(&self, bearing: f64, tilt: f64) -> (f64, f64) {
        (
            self.bearing_sign * bearing + self.bearing_offset,
            self.tilt_sign * tilt,
        )
    }
}

pub const fn angle_convention(output: OutputFormat) -> AngleConvention {
    match output {
        // y points down, but text rotation is still counterclockwise
        OutputFormat::Png => AngleConvention {
            bearing_sign: -1.0,
            bearing_offset: 0.0,
            tilt_sign: 1.0,
        },
        // Bearings are measured from north
        OutputFormat::Ps => AngleConvention {
            bearing_sign: 1.0,
            bearing_offset: -90.0,
            tilt_sign: 1.0,
        },
        // y points down, and so do rotations
        OutputFormat::Svg => AngleConvention {
            bearing_sign: -1.0,
            bearing_offset: 0.0,
            tilt_sign: -1.0,
        },
    }
}

/// Degrees added to the converted bearing and tilt when the grid is drawn
/// turned, so that labels still sit where the user asked relative to the
/// final image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GrainTurn {
    pub bearing: f64,
    pub tilt: f64,
}

pub const fn horizontal_turn(output: OutputFormat) -> GrainTurn {
    match output {
        OutputFormat::Ps => GrainTurn {
            bearing: 90.0,
            tilt: 90.0,
        },
        OutputFormat::Png => GrainTurn {
            bearing: -90.0,
            tilt: 90.0,
        },
        OutputFormat::Svg => GrainTurn {
            bearing: -90.0,
            tilt: -90.0,
        },
    }
}

/// When moving the coordinate origin into the turned frame also moves the
/// first numbered column to the other end of the wave.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WaveFlip {
    Never,
    Always,
    OddColumns,
}

impl WaveFlip {
    pub fn applies(self, columns: u32) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::OddColumns => columns % 2 == 1,
        }
    }
}

/// Map an image corner to the drawing frame corner it lands on for a
/// horizontal grid. The image's top edge is the frame's left edge.
pub const fn horizontal_origin(origin: CoordOrigin) -> (CoordOrigin, WaveFlip) {
    match origin {
        CoordOrigin::UpperLeft => (CoordOrigin::LowerLeft, WaveFlip::Always),
        CoordOrigin::LowerLeft => {
            (CoordOrigin::LowerRight, WaveFlip::OddColumns)
        }
        CoordOrigin::UpperRight => (CoordOrigin::UpperLeft, WaveFlip::Never),
        CoordOrigin::LowerRight => (CoordOrigin::UpperRight, WaveFlip::Never),
    }
}

/// User-facing label placement, before any format or grain adjustment
#[derive(Copy, Clone, Debug)]
pub(crate) struct Placement {
    pub origin: CoordOrigin,
    pub bearing: f64,
    pub tilt: f64,
    pub distance: f64,
}

/// Translate label placement and the column wave into the drawing frame.
/// `columns` is counted in the drawing frame. Returns the adjusted placement
/// and whether the leftmost drawn column is low.
pub(crate) fn orient(
    output: OutputFormat,
    grain: Grain,
    placement: Placement,
    columns: u32,
    mut low_first_column: bool,
) -> (CoordPlacement, bool) {
    let (mut bearing, mut tilt) =
        angle_convention(output).apply(placement.bearing, placement.tilt);
    let mut origin = placement.origin;

    if grain == Grain::Horizontal {
        let turn = horizontal_turn(output);
        bearing += turn.bearing;
        tilt += turn.tilt;

        let (turned, flip) = horizontal_origin(origin);
        origin = turned;
        if flip.applies(columns) {
            low_first_column = !low_first_column;
        }
    }

    // The first *numbered* column is the one that's low. Numbering from the
    // right across an even number of columns puts it opposite the leftmost.
    if origin.is_right() && columns % 2 == 0 {
        low_first_column = !low_first_column;
    }
    if columns == 1 {
        low_first_column = false;
    }

    if output.is_raster() {
        bearing = util::normalize_degrees(bearing);
        tilt = util::normalize_degrees(tilt);
    }

    (
        CoordPlacement {
            origin,
            bearing,
            tilt,
            distance: placement.distance,
        },
        low_first_column,
    )
}
