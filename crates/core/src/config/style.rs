//! Parsing and validation for the styling options: colors and opacities.
//! Both are output-format specific, so every parser here takes the format
//! that the value will be rendered to.

use crate::{util::range::NumRange, Color3, GridError, OutputFormat};

/// Parse a color option. PostScript takes three comma-separated components
/// in `[0,1]` (`0.5,0.5,0.5`); the pixel-based formats take a hex value up to
/// `FFFFFF`, without any prefix.
pub fn parse_color(
    option: &str,
    value: &str,
    output: OutputFormat,
) -> Result<Color3, GridError> {
    let malformed =
        || GridError::validation(option, "has an invalid color format");
    let value = value.trim();

    match output {
        OutputFormat::Ps => {
            let components = value
                .split(',')
                .map(|component| component.trim().parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|_| malformed())?;
            let [red, green, blue] = match components.as_slice() {
                [red, green, blue] => [*red, *green, *blue],
                _ => return Err(malformed()),
            };
            for (name, component) in
                [("red", red), ("green", green), ("blue", blue)]
            {
                Color3::COMPONENT_RANGE.ensure_contains(
                    &format!("{} value for {}", name, option),
                    component,
                    "",
                )?;
            }
            Ok(Color3::new(red, green, blue))
        }
        OutputFormat::Png | OutputFormat::Svg => {
            if value.is_empty()
                || !value.chars().all(|c| c.is_ascii_hexdigit())
            {
                return Err(malformed());
            }
            // Anything too long to fit in a u32 is out of range anyway
            let rgb = u32::from_str_radix(value, 16).unwrap_or(u32::MAX);
            Color3::HEX_RANGE.ensure_contains(option, rgb, "")?;
            Ok(Color3::from_packed(rgb))
        }
    }
}

/// The range of valid opacities for a format, if the format supports
/// opacity at all. Note that the scales point in different directions: 0 is
/// opaque for raster output but transparent for vector markup.
pub fn opacity_range(output: OutputFormat) -> Option<NumRange<f64>> {
    match output {
        OutputFormat::Png => Some(NumRange::new(0.0, 127.0)),
        OutputFormat::Svg => Some(NumRange::new(0.0, 1.0)),
        OutputFormat::Ps => None,
    }
}

/// The fully opaque value on a format's opacity scale. PostScript ignores
/// opacity, so it gets the raster value (0).
pub fn opaque(output: OutputFormat) -> f64 {
    match output {
        OutputFormat::Svg => 1.0,
        OutputFormat::Png | OutputFormat::Ps => 0.0,
    }
}

/// Parse an opacity option. Returns `None` when the format ignores opacity,
/// in which case the value isn't even looked at.
pub fn parse_opacity(
    option: &str,
    value: &str,
    output: OutputFormat,
) -> Result<Option<f64>, GridError> {
    if opacity_range(output).is_none() {
        log::warn!("{} ignored for {} output", option, output);
        return Ok(None);
    }
    let opacity: f64 = value
        .trim()
        .parse()
        .map_err(|_| GridError::validation(option, "is not a number"))?;
    check_opacity(option, opacity, output)?;
    Ok(Some(opacity))
}

/// Check that an opacity is on the scale of the output format
pub fn check_opacity(
    option: &str,
    opacity: f64,
    output: OutputFormat,
) -> Result<(), GridError> {
    if let Some(range) = opacity_range(output) {
        range.ensure_contains(
            option,
            opacity,
            &format!(" for {} output", output),
        )?;
        if output.is_raster() && opacity.fract() != 0.0 {
            return Err(GridError::validation(option, "is not an integer"));
        }
    }
    Ok(())
}
