use crate::util::range::NumRange;
use derive_more::{
    Add, AddAssign, Display, Div, From, Into, Mul, Neg, Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};

/// A 2D point in drawing space, i.e. in the native length unit of the output
/// format, with y pointing down.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An offset measured in hexes rather than in a length unit: `x` is a
/// multiple of the hex width and `y` a multiple of the hex height. Path
/// programs are built in these units so that they don't depend on the
/// resolved hex size. Use [HexOffset::scale] to get a real distance.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Neg,
    Add,
    Sub,
    AddAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}w, {}h)", "self.x", "self.y")]
pub struct HexOffset {
    pub x: f64,
    pub y: f64,
}

impl HexOffset {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirror this offset horizontally
    pub fn mirror_x(self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Convert to drawing space for a hex of the given width and height
    pub fn scale(self, hex_width: f64, hex_height: f64) -> Point2 {
        Point2::new(self.x * hex_width, self.y * hex_height)
    }
}

/// An RGB color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    /// The valid range of values for each component in RGB
    pub const COMPONENT_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);
    /// The largest color that can be written as `RRGGBB`
    pub const HEX_RANGE: NumRange<u32> = NumRange::new(0x000000, 0xffffff);

    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a new RGB color from components in the range [0.0, 1.0]. The
    /// caller is responsible for checking the range.
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Create a new RGB color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Create a color from a packed `0xRRGGBB` value. Bits above the low 24
    /// are ignored.
    pub const fn from_packed(rgb: u32) -> Self {
        Self::new_int(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    /// Convert this color to a set of 3 bytes: `(red, green, blue)`
    pub fn to_ints(self) -> (u8, u8, u8) {
        fn component(value: f32) -> u8 {
            (value * 255.0).round() as u8
        }
        (component(self.red), component(self.green), component(self.blue))
    }

    /// Convert this color to the hex form used by raster and vector markup
    /// output: `rrggbb`
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_ints();
        format!("{r:02x}{g:02x}{b:02x}")
    }

    /// Convert this color to PostScript `setrgbcolor` operands: `r g b`
    pub fn to_postscript(self) -> String {
        format!("{} {} {}", self.red, self.green, self.blue)
    }
}
