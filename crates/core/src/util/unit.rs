use crate::GridError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

/// The output formats that a grid can be resolved for. Every format has its
/// own native length unit, color syntax and opacity scale, so options are
/// always interpreted relative to one of these.
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
pub enum OutputFormat {
    /// Raster output. Native unit is the pixel, and anything that lands on
    /// the pixel grid (line thickness, center size) must be integral.
    Png,
    /// PostScript page description. Native unit is the point.
    Ps,
    /// Vector markup. Native unit is the pixel.
    Svg,
}

impl OutputFormat {
    /// Does this format draw onto a pixel grid? If so, some lengths have to
    /// be whole numbers.
    pub fn is_raster(self) -> bool {
        matches!(self, Self::Png)
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

/// A unit that can trail a length option value, e.g. the `mm` in `12mm`.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum LengthUnit {
    Pt,
    Px,
    Cm,
    Mm,
    In,
}

impl LengthUnit {
    /// Number of PostScript points in one of this unit. Pixels are only ever
    /// accepted by the pixel-based formats, where they are the native unit.
    fn points(self) -> f64 {
        match self {
            Self::Pt | Self::Px => 1.0,
            Self::Cm => 72.0 / 2.54,
            Self::Mm => 72.0 / 25.4,
            Self::In => 72.0,
        }
    }
}

/// What a length measures. The raster format sizes text in points but
/// everything else in pixels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LengthKind {
    Distance,
    FontSize,
}

/// Parse a length option (`"12"`, `"12px"`, `"1.5 in"`) into a scalar in the
/// native unit of the output format. A bare number is already native.
pub fn parse_length(
    option: &str,
    value: &str,
    output: OutputFormat,
    kind: LengthKind,
) -> Result<f64, GridError> {
    let value = value.trim();
    // Units never contain an 'e', so anything before the first other letter
    // is the number (including exponents)
    let split = value
        .find(|c: char| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f64 = number
        .trim()
        .parse()
        .map_err(|_| GridError::validation(option, "is not a number"))?;
    if !number.is_finite() {
        return Err(GridError::range(option, "is not a finite number"));
    }

    let unit = unit.trim();
    if unit.is_empty() {
        return Ok(number);
    }
    let unit = LengthUnit::from_str(unit).map_err(|_| {
        GridError::validation(
            option,
            format!("has unrecognized unit `{}'", unit),
        )
    })?;

    match (output, kind, unit) {
        (OutputFormat::Png, LengthKind::FontSize, LengthUnit::Pt)
        | (OutputFormat::Png, LengthKind::Distance, LengthUnit::Px)
        | (OutputFormat::Svg, _, LengthUnit::Px) => Ok(number),
        (OutputFormat::Png, LengthKind::FontSize, _) => {
            Err(GridError::validation(option, "is not in pt"))
        }
        (OutputFormat::Png, LengthKind::Distance, _)
        | (OutputFormat::Svg, _, _) => {
            Err(GridError::validation(option, "is not in px"))
        }
        (OutputFormat::Ps, _, LengthUnit::Px) => Err(GridError::validation(
            option,
            format!("has unrecognized unit `{}'", unit),
        )),
        (OutputFormat::Ps, _, unit) => Ok(number * unit.points()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use assert_approx_eq::assert_approx_eq;

    fn distance(value: &str, output: OutputFormat) -> Result<f64, GridError> {
        parse_length("hex width", value, output, LengthKind::Distance)
    }

    #[test]
    fn test_bare_number() {
        assert_approx_eq!(distance("12.5", OutputFormat::Png).unwrap(), 12.5);
        assert_approx_eq!(distance(" 3 ", OutputFormat::Svg).unwrap(), 3.0);
        assert_approx_eq!(distance("1e2", OutputFormat::Ps).unwrap(), 100.0);
    }

    #[test]
    fn test_postscript_units() {
        assert_approx_eq!(distance("1in", OutputFormat::Ps).unwrap(), 72.0);
        assert_approx_eq!(distance("2.54 cm", OutputFormat::Ps).unwrap(), 72.0);
        assert_approx_eq!(distance("25.4mm", OutputFormat::Ps).unwrap(), 72.0);
        assert_approx_eq!(distance("10pt", OutputFormat::Ps).unwrap(), 10.0);
        assert!(distance("10px", OutputFormat::Ps).is_err());
    }

    #[test]
    fn test_pixel_units() {
        assert_approx_eq!(distance("40px", OutputFormat::Png).unwrap(), 40.0);
        assert_approx_eq!(distance("40 px", OutputFormat::Svg).unwrap(), 40.0);
        assert_eq!(
            distance("1in", OutputFormat::Svg).unwrap_err().to_string(),
            "hex width is not in px"
        );
        assert!(distance("4pt", OutputFormat::Png).is_err());
    }

    #[test]
    fn test_raster_font_size() {
        let size = parse_length(
            "coordinate size",
            "8pt",
            OutputFormat::Png,
            LengthKind::FontSize,
        );
        assert_approx_eq!(size.unwrap(), 8.0);
        let err = parse_length(
            "coordinate size",
            "8px",
            OutputFormat::Png,
            LengthKind::FontSize,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "coordinate size is not in pt");
    }

    #[test]
    fn test_garbage() {
        let err = distance("wide", OutputFormat::Png).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "hex width is not a number");
        assert_eq!(
            distance("3furlongs", OutputFormat::Ps)
                .unwrap_err()
                .to_string(),
            "hex width has unrecognized unit `furlongs'"
        );
    }

    #[test]
    fn test_overflowing_number() {
        let err = distance("1e400", OutputFormat::Svg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.to_string(), "hex width is not a finite number");
        assert!(distance("-1e400 in", OutputFormat::Ps).is_err());
    }
}
