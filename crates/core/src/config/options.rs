//! Building a [GridConfig] from a flat map of string options, the way a
//! command line or spec file supplies them. Every value is parsed relative to
//! the output format, so `output` is read first.

use crate::{
    config::style::{parse_color, parse_opacity},
    geometry::{CoordOrigin, Grain, Margins},
    util::unit::{parse_length, LengthKind},
    CenterStyle, Color3, GridConfig, GridError, OutputFormat,
};
use indexmap::IndexMap;
use log::{debug, warn};
use std::str::FromStr;

/// Option name to raw value. Ordered, so that warnings come out in the order
/// the options were given.
pub type OptionMap = IndexMap<String, String>;

/// Every option that [GridConfig::from_options] understands
pub const OPTION_NAMES: &[&str] = &[
    "output",
    "antialias",
    "grid-grain",
    "grid-start",
    "grid-thickness",
    "grid-color",
    "grid-opacity",
    "coord-font",
    "coord-bearing",
    "coord-tilt",
    "coord-distance",
    "coord-size",
    "coord-origin",
    "coord-column-skip",
    "coord-row-skip",
    "coord-column-start",
    "coord-row-start",
    "coord-format",
    "coord-color",
    "coord-opacity",
    "center-style",
    "center-size",
    "center-color",
    "center-opacity",
    "bg-color",
    "bg-opacity",
    "matte",
    "image-margin",
    "hex-width",
    "hex-height",
    "hex-side",
    "columns",
    "rows",
    "image-width",
    "image-height",
    "centered",
];

/// Options that belong to whatever tool is driving the library. They're
/// allowed in the map, but not used here.
const TOOL_OPTIONS: &[&str] = &["infile", "outfile"];

/// Typed accessors over the raw map. Each one returns `None` when the option
/// is absent, so defaults stay wherever they already are.
struct OptionReader<'a> {
    options: &'a OptionMap,
    output: OutputFormat,
}

impl<'a> OptionReader<'a> {
    fn get(&self, option: &str) -> Option<&'a str> {
        self.options.get(option).map(String::as_str)
    }

    fn choice<T: Copy>(
        &self,
        option: &str,
        choices: &[(&str, T)],
    ) -> Result<Option<T>, GridError> {
        self.get(option)
            .map(|value| {
                choices
                    .iter()
                    .find(|(name, _)| *name == value.trim())
                    .map(|(_, choice)| *choice)
                    .ok_or_else(|| {
                        GridError::validation(
                            option,
                            format!("has unrecognized value `{}'", value),
                        )
                    })
            })
            .transpose()
    }

    fn length(
        &self,
        option: &str,
        kind: LengthKind,
    ) -> Result<Option<f64>, GridError> {
        self.get(option)
            .map(|value| parse_length(option, value, self.output, kind))
            .transpose()
    }

    /// A plain finite number with no unit, e.g. an angle
    fn number(&self, option: &str) -> Result<Option<f64>, GridError> {
        self.get(option)
            .map(|value| {
                let number: f64 = value.trim().parse().map_err(|_| {
                    GridError::validation(option, "is not a number")
                })?;
                if number.is_finite() {
                    Ok(number)
                } else {
                    Err(GridError::range(option, "is not a finite number"))
                }
            })
            .transpose()
    }

    fn integer(&self, option: &str) -> Result<Option<u32>, GridError> {
        self.get(option)
            .map(|value| {
                value.trim().parse().map_err(|_| {
                    GridError::validation(
                        option,
                        "is not a nonnegative integer",
                    )
                })
            })
            .transpose()
    }

    /// An integer that has to be at least 1
    fn count(&self, option: &str) -> Result<Option<u32>, GridError> {
        match self.integer(option)? {
            Some(0) => Err(GridError::range(option, "is not positive")),
            count => Ok(count),
        }
    }

    fn color(&self, option: &str) -> Result<Option<Color3>, GridError> {
        self.get(option)
            .map(|value| parse_color(option, value, self.output))
            .transpose()
    }

    fn opacity(&self, option: &str) -> Result<Option<f64>, GridError> {
        match self.get(option) {
            Some(value) => parse_opacity(option, value, self.output),
            None => Ok(None),
        }
    }

    /// Flags are set just by being present. `false` turns one back off,
    /// since spec files can't unset a key.
    fn flag(&self, option: &str) -> bool {
        self.get(option)
            .map_or(false, |value| value.trim() != "false")
    }

    fn margins(&self, option: &str) -> Result<Option<Margins>, GridError> {
        let value = match self.get(option) {
            Some(value) => value,
            None => return Ok(None),
        };
        let lengths = value
            .split(',')
            .map(|length| {
                parse_length(option, length, self.output, LengthKind::Distance)
            })
            .collect::<Result<Vec<f64>, _>>()?;
        if lengths.iter().any(|length| *length < 0.0) {
            return Err(GridError::range(option, "is negative"));
        }
        match lengths.as_slice() {
            [margin] => Ok(Some(Margins::uniform(*margin))),
            [top, right, bottom, left] => {
                Ok(Some(Margins::new(*top, *right, *bottom, *left)))
            }
            _ => Err(GridError::validation(
                option,
                "must be given as a single value or as four (t,r,b,l)",
            )),
        }
    }
}

/// Overwrite `$target` with an option value, if the option is present
macro_rules! set {
    ($target:expr, $value:expr) => {
        if let Some(value) = $value {
            $target = value;
        }
    };
}

impl GridConfig {
    /// Build a config from string options. Options that are absent get the
    /// defaults for the output format (see [GridConfig::new]). Unknown
    /// options are ignored with a warning. The returned config has already
    /// passed [GridConfig::check].
    pub fn from_options(options: &OptionMap) -> Result<Self, GridError> {
        let output = match options.get("output") {
            None => OutputFormat::default(),
            Some(value) => OutputFormat::from_str(value.trim()).map_err(|_| {
                GridError::validation(
                    "output",
                    format!("has unrecognized value `{}'", value),
                )
            })?,
        };
        for key in options.keys() {
            if !OPTION_NAMES.contains(&key.as_str())
                && !TOOL_OPTIONS.contains(&key.as_str())
            {
                warn!("ignoring unrecognized option `{}'", key);
            }
        }

        let reader = OptionReader { options, output };
        let mut config = Self::new(output);

        config.antialias = reader.flag("antialias");
        if config.antialias && !output.is_raster() {
            warn!("{} output is always antialiased", output);
        }

        // Grid
        set!(
            config.grain,
            reader.choice(
                "grid-grain",
                &[("v", Grain::Vertical), ("h", Grain::Horizontal)],
            )?
        );
        set!(
            config.low_first_column,
            reader.choice("grid-start", &[("i", true), ("o", false)])?
        );
        set!(
            config.grid_thickness,
            reader.length("grid-thickness", LengthKind::Distance)?
        );
        if config.grid_thickness < 0.0 {
            return Err(GridError::range("grid-thickness", "is negative"));
        }
        set!(config.grid_color, reader.color("grid-color")?);
        set!(config.grid_opacity, reader.opacity("grid-opacity")?);

        // Coordinates
        if let Some(font) = reader.get("coord-font") {
            config.coord.font = font.to_owned();
        }
        set!(config.coord.bearing, reader.number("coord-bearing")?);
        set!(config.coord.tilt, reader.number("coord-tilt")?);
        set!(
            config.coord.distance,
            reader.length("coord-distance", LengthKind::Distance)?
        );
        set!(
            config.coord.size,
            reader.length("coord-size", LengthKind::FontSize)?
        );
        set!(
            config.coord.origin,
            reader.choice(
                "coord-origin",
                &[
                    ("ul", CoordOrigin::UpperLeft),
                    ("ur", CoordOrigin::UpperRight),
                    ("ll", CoordOrigin::LowerLeft),
                    ("lr", CoordOrigin::LowerRight),
                ],
            )?
        );
        set!(config.coord.column_skip, reader.count("coord-column-skip")?);
        set!(config.coord.row_skip, reader.count("coord-row-skip")?);
        set!(
            config.coord.column_start,
            reader.integer("coord-column-start")?
        );
        set!(config.coord.row_start, reader.integer("coord-row-start")?);
        if let Some(format) = reader.get("coord-format") {
            config.coord.format = format.parse()?;
        }
        set!(config.coord.color, reader.color("coord-color")?);
        set!(config.coord.opacity, reader.opacity("coord-opacity")?);

        // Centers
        set!(
            config.center.style,
            reader.choice(
                "center-style",
                &[
                    ("n", CenterStyle::None),
                    ("d", CenterStyle::Dot),
                    ("c", CenterStyle::Cross),
                ],
            )?
        );
        set!(
            config.center.size,
            reader.length("center-size", LengthKind::Distance)?
        );
        if config.center.size < 0.0 {
            return Err(GridError::range("center-size", "is negative"));
        }
        set!(config.center.color, reader.color("center-color")?);
        set!(config.center.opacity, reader.opacity("center-opacity")?);

        // Background
        if let Some(color) = reader.color("bg-color")? {
            config.background.color = Some(color);
        }
        set!(config.background.opacity, reader.opacity("bg-opacity")?);
        config.background.matte = reader.flag("matte");
        if config.background.matte && config.background.color.is_none() {
            warn!("matte is useless without a background color");
        }

        // Size
        set!(config.margins, reader.margins("image-margin")?);
        config.hex_width = reader.length("hex-width", LengthKind::Distance)?;
        config.hex_height = reader.length("hex-height", LengthKind::Distance)?;
        config.hex_side = reader.length("hex-side", LengthKind::Distance)?;
        config.columns = reader.count("columns")?;
        config.rows = reader.count("rows")?;
        config.image_width =
            reader.length("image-width", LengthKind::Distance)?;
        config.image_height =
            reader.length("image-height", LengthKind::Distance)?;
        config.centered = reader.flag("centered");

        debug!("Parsed options into {:#?}", config);
        config.check()?;
        Ok(config)
    }
}
