use assert_approx_eq::assert_approx_eq;
use hexgrid::{
    CoordOrigin, ErrorKind, GeometryModel, Grain, GridConfig, GridError,
    Margins, OutputFormat, Quantity,
};

const SIN_60: f64 = 0.866_025_403_784_438_6;

/// A config with no lines or margins in the way, so the numbers come out
/// round
fn bare() -> GridConfig {
    let mut config = GridConfig::new(OutputFormat::Svg);
    config.grid_thickness = 0.0;
    config
}

fn resolve(config: &GridConfig) -> GeometryModel {
    GeometryModel::resolve(config).unwrap()
}

#[test]
fn test_hex_dimensions_from_side() {
    for &side in &[1.0, 7.5, 20.0, 123.4] {
        let mut config = bare();
        config.hex_side = Some(side);
        config.columns = Some(3);
        config.rows = Some(3);
        let geometry = resolve(&config);
        assert_approx_eq!(geometry.hex_width(), 2.0 * side);
        assert_approx_eq!(geometry.hex_height(), 2.0 * side * SIN_60);
    }
}

#[test]
fn test_hex_dimensions_from_height() {
    let mut config = bare();
    config.hex_height = Some(2.0 * SIN_60 * 10.0);
    config.columns = Some(3);
    config.rows = Some(3);
    let geometry = resolve(&config);
    assert_approx_eq!(geometry.hex_side(), 10.0);
    assert_approx_eq!(geometry.hex_width(), 20.0);
}

#[test]
fn test_image_width_from_columns() {
    let mut config = bare();
    config.hex_width = Some(20.0);
    config.columns = Some(5);
    config.rows = Some(2);
    let geometry = resolve(&config);
    assert_approx_eq!(geometry.image_width(), 80.0);
    // Two rows plus the half-hex wave
    assert_approx_eq!(geometry.image_height(), 2.5 * geometry.hex_height());
}

#[test]
fn test_columns_from_image_width() {
    for &(image_width, columns) in &[(80.0, 5), (85.0, 5), (94.9, 5), (95.0, 6)] {
        let mut config = bare();
        config.hex_width = Some(20.0);
        config.image_width = Some(image_width);
        config.rows = Some(2);
        let geometry = resolve(&config);
        assert_eq!(geometry.columns(), columns, "image width {}", image_width);
        // The supplied width is kept, even if there's slack
        assert_approx_eq!(geometry.image_width(), image_width);
    }
}

#[test]
fn test_margins_and_thickness() {
    let mut config = bare();
    config.grid_thickness = 2.0;
    config.margins = Margins::new(1.0, 2.0, 3.0, 4.0);
    config.hex_width = Some(20.0);
    config.columns = Some(5);
    config.rows = Some(2);
    let geometry = resolve(&config);
    assert_approx_eq!(geometry.image_width(), 80.0 + 2.0 + 2.0 + 4.0);
    assert_approx_eq!(
        geometry.image_height(),
        2.5 * geometry.hex_height() + 2.0 + 1.0 + 3.0
    );

    let frame = geometry.drawing_frame();
    assert_eq!(frame.quarter_turns, 0);
    assert_approx_eq!(frame.origin.x, 5.0);
    assert_approx_eq!(frame.origin.y, 2.0);
}

#[test]
fn test_hex_size_from_image() {
    let mut config = bare();
    config.image_width = Some(100.0);
    config.image_height = Some(100.0);
    config.columns = Some(3);
    config.rows = Some(4);
    let geometry = resolve(&config);
    assert_approx_eq!(geometry.hex_width(), 100.0 / 2.5);
    assert_approx_eq!(geometry.hex_side(), 20.0);
    // Both groups size the hexes on their own, so they get stretched to fill
    // the image
    assert_approx_eq!(geometry.hex_height(), 100.0 / 4.5);
}

#[test]
fn test_single_column_height() {
    let mut config = bare();
    config.hex_side = Some(10.0);
    config.columns = Some(1);
    config.rows = Some(3);
    let geometry = resolve(&config);
    // No wave, so no extra half hex
    assert_approx_eq!(geometry.image_height(), 3.0 * geometry.hex_height());

    config.rows = None;
    config.image_height = Some(3.0 * geometry.hex_height());
    assert_eq!(resolve(&config).rows(), 3);
}

#[test]
fn test_single_column_never_low() {
    let mut config = bare();
    config.hex_side = Some(10.0);
    config.columns = Some(1);
    config.rows = Some(3);
    config.low_first_column = true;
    assert!(!resolve(&config).low_first_column());
}

#[test]
fn test_right_origin_flips_wave() {
    let mut config = bare();
    config.hex_side = Some(10.0);
    config.rows = Some(3);
    config.coord.origin = CoordOrigin::UpperRight;

    config.columns = Some(5);
    let odd = resolve(&config).low_first_column();
    config.columns = Some(4);
    let even = resolve(&config).low_first_column();
    assert!(!odd);
    assert!(even);
}

#[test]
fn test_centered_single_column() {
    let mut config = bare();
    config.hex_side = Some(10.0);
    config.columns = Some(1);
    config.rows = Some(2);
    config.image_width = Some(100.0);
    config.image_height = Some(100.0);
    config.centered = true;
    let geometry = resolve(&config);

    let (width, height) = geometry.grid_extent();
    assert_approx_eq!(width, 20.0);
    assert_approx_eq!(height, 2.0 * geometry.hex_height());
    let margins = geometry.margins();
    assert_approx_eq!(margins.left, 40.0);
    assert_approx_eq!(margins.right, 40.0);
    assert_approx_eq!(margins.top, (100.0 - height) / 2.0);
    assert_approx_eq!(margins.top, margins.bottom);
}

#[test]
fn test_centered_keeps_existing_margins() {
    let mut config = bare();
    config.hex_width = Some(20.0);
    config.columns = Some(5);
    config.rows = Some(2);
    config.image_width = Some(100.0);
    config.image_height = Some(100.0);
    config.margins = Margins::new(0.0, 0.0, 0.0, 10.0);
    config.centered = true;
    let margins = resolve(&config).margins();
    // 100 - 10 - 80 = 10 left over, split across both sides
    assert_approx_eq!(margins.left, 15.0);
    assert_approx_eq!(margins.right, 5.0);
}

#[test]
fn test_horizontal_grain() {
    let mut config = bare();
    config.grain = Grain::Horizontal;
    config.hex_width = Some(20.0);
    config.columns = Some(3);
    config.rows = Some(2);
    config.margins = Margins::new(1.0, 2.0, 3.0, 4.0);
    let geometry = resolve(&config);

    // Counts and hex sizes stay in the drawing frame
    assert_eq!(geometry.columns(), 2);
    assert_eq!(geometry.rows(), 3);
    assert_approx_eq!(geometry.hex_height(), 20.0);
    // Image sizes and margins are back in the image frame
    assert_approx_eq!(geometry.image_width(), 3.5 * 20.0 + 2.0 + 4.0);
    assert_approx_eq!(
        geometry.image_height(),
        1.75 * geometry.hex_width() + 1.0 + 3.0
    );
    assert_eq!(geometry.margins(), config.margins);

    let frame = geometry.drawing_frame();
    assert_eq!(frame.quarter_turns, 1);
    assert_approx_eq!(frame.width, geometry.image_height());
    assert_approx_eq!(frame.height, geometry.image_width());
    assert_approx_eq!(frame.margins.left, 1.0);
}

#[test]
fn test_horizontal_image_size_stays_physical() {
    let mut config = bare();
    config.grain = Grain::Horizontal;
    config.hex_width = Some(20.0);
    config.image_width = Some(70.0);
    config.image_height = Some(50.0);
    let geometry = resolve(&config);
    // 3.5 hex widths across means 3 of the user's columns
    assert_eq!(geometry.rows(), 3);
    assert_approx_eq!(geometry.image_width(), 70.0);
    assert_approx_eq!(geometry.image_height(), 50.0);
}

#[test]
fn test_raster_angles_normalized() {
    let mut config = GridConfig::new(OutputFormat::Png);
    config.hex_side = Some(10.0);
    config.columns = Some(3);
    config.rows = Some(3);
    config.coord.bearing = 45.0;
    config.coord.tilt = -30.0;
    let coord = resolve(&config).coord();
    assert_approx_eq!(coord.bearing, 315.0);
    assert_approx_eq!(coord.tilt, 330.0);

    config.output = OutputFormat::Ps;
    let coord = resolve(&config).coord();
    assert_approx_eq!(coord.bearing, -45.0);
    assert_approx_eq!(coord.tilt, -30.0);
}

#[test]
fn test_underconstrained() {
    let cases: &[(&dyn Fn(&mut GridConfig), Quantity)] = &[
        (&|_: &mut GridConfig| {}, Quantity::HexSide),
        // Only one of each pair
        (
            &|config: &mut GridConfig| {
                config.hex_side = Some(10.0);
                config.rows = Some(2);
                config.image_height = Some(100.0);
            },
            Quantity::ImageWidth,
        ),
        (
            &|config: &mut GridConfig| {
                config.columns = Some(2);
                config.rows = Some(2);
            },
            Quantity::HexSide,
        ),
        (
            &|config: &mut GridConfig| {
                config.hex_width = Some(20.0);
                config.columns = Some(2);
            },
            Quantity::ImageHeight,
        ),
    ];

    for (setup, quantity) in cases {
        let mut config = bare();
        setup(&mut config);
        match GeometryModel::resolve(&config) {
            Err(GridError::Underconstrained(missing)) => {
                assert_eq!(missing, *quantity)
            }
            other => panic!("expected {} to be missing, got {:?}", quantity, other),
        }
    }
}

#[test]
fn test_too_small_for_one_hex() {
    let mut config = bare();
    config.hex_width = Some(20.0);
    config.image_width = Some(10.0);
    config.rows = Some(2);
    let err = GeometryModel::resolve(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(
        err.to_string(),
        "columns is not positive: the image is too small for one hex"
    );

    let mut config = bare();
    config.margins = Margins::uniform(60.0);
    config.image_width = Some(100.0);
    config.image_height = Some(500.0);
    config.columns = Some(2);
    config.rows = Some(2);
    let err = GeometryModel::resolve(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert!(err.to_string().starts_with("hex-width would be -"));
}

#[test]
fn test_too_many_hexes() {
    let mut config = bare();
    config.hex_width = Some(1.0);
    config.image_width = Some(1e12);
    config.rows = Some(1);
    let err = GeometryModel::resolve(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert!(
        err.to_string().starts_with("columns would be 1333333333333"),
        "{}",
        err
    );

    // Horizontal grain reports the user's name for the count
    let mut config = bare();
    config.grain = Grain::Horizontal;
    config.hex_width = Some(1.0);
    config.columns = Some(1);
    config.image_height = Some(1e300);
    let err = GeometryModel::resolve(&config).unwrap_err();
    assert!(err.to_string().starts_with("rows would be "), "{}", err);

    // Right at the cap is fine
    let mut config = bare();
    config.hex_side = Some(1.0);
    config.columns = Some(65_535);
    config.rows = Some(1);
    assert_eq!(resolve(&config).columns(), 65_535);
    config.columns = Some(65_536);
    assert_eq!(
        GeometryModel::resolve(&config).unwrap_err().kind(),
        ErrorKind::Range
    );
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = bare();
    config.hex_side = Some(10.0);
    config.columns = Some(0);
    config.rows = Some(2);
    let err = GeometryModel::resolve(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let mut config = GridConfig::new(OutputFormat::Png);
    config.hex_side = Some(10.0);
    config.columns = Some(2);
    config.rows = Some(2);
    config.grid_thickness = 0.5;
    let err = GeometryModel::resolve(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
