use hexgrid::{
    ErrorKind, GeometryModel, GridConfig, GridError, Margins, OutputFormat,
};

fn valid() -> GridConfig {
    let mut config = GridConfig::new(OutputFormat::Svg);
    config.hex_side = Some(10.0);
    config.columns = Some(4);
    config.rows = Some(4);
    config
}

#[test]
fn test_config_validation() {
    let mut config = valid();
    config.grid_thickness = -1.0; // invalid
    config.columns = Some(0); // invalid
    config.rows = Some(1); // valid
    config.margins = Margins::new(0.0, -2.0, 0.0, 0.0); // invalid
    config.coord.column_skip = 0; // invalid
    config.coord.row_start = 0; // valid
    config.center.size = -3.0; // invalid

    let validation_errors = match config.check() {
        Err(GridError::InvalidConfig(errors)) => errors,
        other => panic!("expected validation errors, got {:?}", other),
    };
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    assert_eq!(
        error_fields,
        vec!["center", "columns", "coord", "grid_thickness", "margins"],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}

#[test]
fn test_nonpositive_dimensions() {
    for &value in &[0.0, -5.0, f64::NAN, f64::INFINITY] {
        let mut config = valid();
        config.hex_side = Some(value);
        let err = config.check().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        if value.is_finite() {
            assert_eq!(err.to_string(), "hex-side is not positive");
        } else {
            assert_eq!(err.to_string(), "hex-side is not a finite number");
        }

        let mut config = valid();
        config.coord.size = value;
        assert_eq!(config.check().unwrap_err().kind(), ErrorKind::Range);
    }
}

#[test]
fn test_opacity_per_format() {
    let mut config = valid();
    config.grid_opacity = 0.5;
    config.check().unwrap();
    config.grid_opacity = 1.5;
    assert_eq!(config.check().unwrap_err().kind(), ErrorKind::Range);

    // Raster opacity is an integer alpha, 0 for opaque
    let mut config = valid();
    config.output = OutputFormat::Png;
    config.grid_opacity = 127.0;
    config.check().unwrap();
    config.grid_opacity = 128.0;
    assert_eq!(config.check().unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn test_raster_integers() {
    let mut config = valid();
    config.output = OutputFormat::Png;
    config.grid_opacity = 0.0;
    config.coord.opacity = 0.0;
    config.center.opacity = 0.0;
    config.background.opacity = 0.0;
    config.center.size = 2.5;
    let err = config.check().unwrap_err();
    assert_eq!(err.to_string(), "center-size is not an integer");

    // Fractional sizes are fine for vector output
    config.output = OutputFormat::Svg;
    config.center.opacity = 1.0;
    config.grid_opacity = 1.0;
    config.coord.opacity = 1.0;
    config.background.opacity = 1.0;
    config.check().unwrap();
}

#[test]
fn test_resolution_checks_first() {
    let mut config = valid();
    config.hex_width = Some(-20.0);
    // The bad value is reported before anything is resolved
    let err = GeometryModel::resolve(&config).unwrap_err();
    assert_eq!(err.to_string(), "hex-width is not positive");
}
