pub mod options;
pub mod style;

use crate::{
    config::style::{check_opacity, opaque},
    geometry::{CoordOrigin, Grain, Margins},
    Color3, GridError, LabelFormat, OutputFormat,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Configuration that defines a hex grid. Lengths are in the native unit of
/// [GridConfig::output] (pixels for raster and vector markup, points for
/// PostScript). Use [GridConfig::from_options](GridConfig::from_options) to
/// build one from string options with units attached.
///
/// Of the seven layout quantities (hex side/width/height, image
/// width/height, rows, columns), leave the ones you want derived as `None`.
/// Resolution fails if what's left isn't enough to determine the rest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// The format that the grid will be rendered to. Determines the native
    /// length unit and which values are valid for colors and opacities.
    pub output: OutputFormat,

    pub grain: Grain,

    /// Should the first numbered column sit half a hex lower than the
    /// second? This is the `i` ("in") start; the default is `o` ("out").
    pub low_first_column: bool,

    /// Width of the grid lines. Must be an integer for raster output.
    #[validate(range(min = 0.0))]
    pub grid_thickness: f64,
    pub grid_color: Color3,
    pub grid_opacity: f64,

    pub hex_side: Option<f64>,
    pub hex_width: Option<f64>,
    pub hex_height: Option<f64>,
    /// At most [MAX_COUNT](crate::geometry::MAX_COUNT)
    #[validate(range(min = 1, max = 65535))]
    pub columns: Option<u32>,
    /// At most [MAX_COUNT](crate::geometry::MAX_COUNT)
    #[validate(range(min = 1, max = 65535))]
    pub rows: Option<u32>,
    pub image_width: Option<f64>,
    pub image_height: Option<f64>,

    /// Space between the image edges and the grid lines
    #[validate]
    pub margins: Margins,

    /// Center the grid in the image by spreading any leftover space evenly
    /// between opposite margins
    pub centered: bool,

    /// Smooth the grid lines. Only meaningful for raster output.
    pub antialias: bool,

    #[validate]
    pub coord: CoordConfig,

    #[validate]
    pub center: CenterConfig,

    pub background: BackgroundConfig,
}

/// Config for coordinate labels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CoordConfig {
    /// Label template, see [LabelFormat]. A suppressed format turns labels
    /// off.
    pub format: LabelFormat,
    pub font: String,
    /// Font size. Points for raster output, native units otherwise.
    pub size: f64,
    pub color: Color3,
    pub opacity: f64,

    /// Direction from the hex center to the label, in counterclockwise
    /// degrees with 0 pointing right
    pub bearing: f64,
    /// Counterclockwise rotation of the label text, in degrees
    pub tilt: f64,
    /// Distance from the hex center to the label
    pub distance: f64,

    /// Image corner where numbering starts
    pub origin: CoordOrigin,
    /// Label only every nth column
    #[validate(range(min = 1))]
    pub column_skip: u32,
    /// Label only every nth row
    #[validate(range(min = 1))]
    pub row_skip: u32,
    /// Number of the first column. Bounded so that no label number can
    /// overflow.
    #[validate(range(max = 1000000000))]
    pub column_start: u32,
    /// Number of the first row
    #[validate(range(max = 1000000000))]
    pub row_start: u32,
}

/// Marker drawn on the center of each hex
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
pub enum CenterStyle {
    None,
    Dot,
    Cross,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CenterConfig {
    pub style: CenterStyle,
    /// Must be an integer for raster output
    #[validate(range(min = 0.0))]
    pub size: f64,
    pub color: Color3,
    pub opacity: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// `None` leaves the background transparent (or unpainted, for
    /// PostScript)
    pub color: Option<Color3>,
    pub opacity: f64,
    /// Make the background transparent in the margins only
    pub matte: bool,
}

impl GridConfig {
    /// Get a config with the defaults for an output format. None of the
    /// layout quantities are set, so this won't resolve as-is.
    pub fn new(output: OutputFormat) -> Self {
        let opacity = opaque(output);
        Self {
            output,
            grain: Grain::Vertical,
            low_first_column: false,
            grid_thickness: 1.0,
            grid_color: Color3::GRAY,
            grid_opacity: opacity,
            hex_side: None,
            hex_width: None,
            hex_height: None,
            columns: None,
            rows: None,
            image_width: None,
            image_height: None,
            margins: Margins::default(),
            centered: false,
            antialias: false,
            coord: CoordConfig {
                format: LabelFormat::default(),
                font: "sans".into(),
                size: 8.0,
                color: Color3::GRAY,
                opacity,
                bearing: 90.0,
                tilt: 0.0,
                distance: 0.0,
                origin: CoordOrigin::UpperLeft,
                column_skip: 1,
                row_skip: 1,
                column_start: 1,
                row_start: 1,
            },
            center: CenterConfig {
                style: CenterStyle::None,
                size: 3.0,
                color: Color3::GRAY,
                opacity,
            },
            background: BackgroundConfig {
                color: if output.is_raster() {
                    Some(Color3::WHITE)
                } else {
                    None
                },
                opacity,
                matte: false,
            },
        }
    }

    /// Check everything about the config that doesn't depend on resolution.
    /// This covers the declarative range checks, plus the rules that depend
    /// on the output format.
    pub fn check(&self) -> Result<(), GridError> {
        self.validate()?;

        for (option, value) in [
            ("grid-thickness", self.grid_thickness),
            ("image-margin", self.margins.top),
            ("image-margin", self.margins.right),
            ("image-margin", self.margins.bottom),
            ("image-margin", self.margins.left),
            ("coord-bearing", self.coord.bearing),
            ("coord-tilt", self.coord.tilt),
            ("coord-distance", self.coord.distance),
            ("center-size", self.center.size),
        ] {
            ensure_finite(option, value)?;
        }
        for (option, value) in [
            ("hex-side", self.hex_side),
            ("hex-width", self.hex_width),
            ("hex-height", self.hex_height),
            ("image-width", self.image_width),
            ("image-height", self.image_height),
            ("coord-size", Some(self.coord.size)),
        ] {
            if let Some(value) = value {
                ensure_finite(option, value)?;
                if value <= 0.0 {
                    return Err(GridError::range(option, "is not positive"));
                }
            }
        }

        if self.output.is_raster() {
            if self.grid_thickness.fract() != 0.0 {
                return Err(GridError::validation(
                    "grid-thickness",
                    "is not an integer",
                ));
            }
            if self.center.size.fract() != 0.0 {
                return Err(GridError::validation(
                    "center-size",
                    "is not an integer",
                ));
            }
        }

        check_opacity("grid-opacity", self.grid_opacity, self.output)?;
        check_opacity("coord-opacity", self.coord.opacity, self.output)?;
        check_opacity("center-opacity", self.center.opacity, self.output)?;
        check_opacity("bg-opacity", self.background.opacity, self.output)?;
        Ok(())
    }
}

/// Float parsing happily accepts `inf`, `NaN` and overflowing literals like
/// `1e400`
fn ensure_finite(option: &str, value: f64) -> Result<(), GridError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GridError::range(option, "is not a finite number"))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

impl Default for CoordConfig {
    fn default() -> Self {
        GridConfig::default().coord
    }
}

impl Default for CenterConfig {
    fn default() -> Self {
        GridConfig::default().center
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        GridConfig::default().background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_format_defaults() {
        let png = GridConfig::new(OutputFormat::Png);
        assert_eq!(png.background.color, Some(Color3::WHITE));
        assert_eq!(png.grid_opacity, 0.0);
        png.check().unwrap();

        let svg = GridConfig::new(OutputFormat::Svg);
        assert_eq!(svg.background.color, None);
        assert_eq!(svg.coord.opacity, 1.0);
        svg.check().unwrap();
    }

    #[test]
    fn test_raster_integers() {
        let mut config = GridConfig::new(OutputFormat::Png);
        config.grid_thickness = 1.5;
        assert_eq!(
            config.check().unwrap_err().to_string(),
            "grid-thickness is not an integer"
        );

        // Fine for vector output
        config.output = OutputFormat::Svg;
        config.grid_opacity = 1.0;
        config.coord.opacity = 1.0;
        config.center.opacity = 1.0;
        config.background.opacity = 1.0;
        config.check().unwrap();
    }

    #[test]
    fn test_declarative_ranges() {
        let mut config = GridConfig::default();
        config.columns = Some(0);
        config.coord.row_skip = 0;
        let err = config.check().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        match err {
            GridError::InvalidConfig(errors) => {
                let mut fields =
                    errors.errors().keys().copied().collect::<Vec<&str>>();
                fields.sort_unstable();
                assert_eq!(fields, vec!["columns", "coord"]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_finite_values() {
        let mut config = GridConfig::default();
        config.image_width = Some(f64::INFINITY);
        assert_eq!(
            config.check().unwrap_err().to_string(),
            "image-width is not a finite number"
        );

        let mut config = GridConfig::default();
        config.margins.left = f64::INFINITY;
        assert_eq!(
            config.check().unwrap_err().to_string(),
            "image-margin is not a finite number"
        );

        let mut config = GridConfig::default();
        config.coord.bearing = f64::NAN;
        assert_eq!(config.check().unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_large_start() {
        let mut config = GridConfig::default();
        config.coord.row_start = u32::MAX;
        assert!(matches!(
            config.check().unwrap_err(),
            GridError::InvalidConfig(_)
        ));
        config.coord.row_start = 1_000_000_000;
        config.check().unwrap();
    }

    #[test]
    fn test_positive_dimensions() {
        let mut config = GridConfig::default();
        config.hex_width = Some(0.0);
        assert_eq!(
            config.check().unwrap_err().to_string(),
            "hex-width is not positive"
        );
    }
}
