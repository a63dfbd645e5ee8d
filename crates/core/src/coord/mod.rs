//! Coordinate labels. A label format is a small template language:
//!
//! ```text
//! <prefix>%[0][width][t]{c|C|r|R}<inter>%[0][width][t]{c|C|r|R}<suffix>
//! ```
//!
//! Lowercase `c`/`r` print the column/row number, optionally right-aligned to
//! `width` and zero-filled. Uppercase `C`/`R` print letters instead
//! (`A..Z, AA, AB..`), or a tally of repeated letters (`A..Z, AA, BB..`) with
//! the `t` flag. `%%` is a literal percent sign. Both a column and a row field
//! are required, in either order.

mod label;

pub use label::{alpha, alpha_tally, CellLabel, Labeler};

use crate::GridError;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};
use strum::Display;

/// How one coordinate field is written out
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CoordStyle {
    Suppressed,
    Numeric,
    Alphabetic,
    AlphabeticTally,
}

/// Which coordinate is written first
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CoordOrder {
    ColumnsFirst,
    RowsFirst,
}

/// One field of a label format
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    pub style: CoordStyle,
    /// Minimum width, only meaningful for numeric fields. 0 means no padding.
    pub width: usize,
    pub zero_fill: bool,
}

impl FieldSpec {
    pub const SUPPRESSED: Self = Self {
        style: CoordStyle::Suppressed,
        width: 0,
        zero_fill: false,
    };

    pub const fn numeric(width: usize, zero_fill: bool) -> Self {
        Self {
            style: CoordStyle::Numeric,
            width,
            zero_fill,
        }
    }

    /// Write a displayed coordinate number in this field's style
    pub fn render(&self, number: u32) -> String {
        match self.style {
            CoordStyle::Suppressed => String::new(),
            CoordStyle::Numeric if self.zero_fill => {
                format!("{:0>width$}", number, width = self.width)
            }
            CoordStyle::Numeric => {
                format!("{:>width$}", number, width = self.width)
            }
            CoordStyle::Alphabetic => alpha(number),
            CoordStyle::AlphabeticTally => alpha_tally(number),
        }
    }
}

/// A parsed label format. Use [FromStr] to parse one; the empty string
/// parses to [LabelFormat::suppressed], which turns labels off entirely.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelFormat {
    pub prefix: String,
    pub first: FieldSpec,
    pub inter: String,
    pub second: FieldSpec,
    pub suffix: String,
    pub order: CoordOrder,
}

impl LabelFormat {
    /// A format that displays no coordinates at all
    pub fn suppressed() -> Self {
        Self {
            prefix: String::new(),
            first: FieldSpec::SUPPRESSED,
            inter: String::new(),
            second: FieldSpec::SUPPRESSED,
            suffix: String::new(),
            order: CoordOrder::ColumnsFirst,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.first.style == CoordStyle::Suppressed
            && self.second.style == CoordStyle::Suppressed
    }

    /// Write the label for a pair of displayed coordinate numbers. Returns an
    /// empty string if the format is suppressed.
    pub fn render(&self, column: u32, row: u32) -> String {
        if self.is_suppressed() {
            return String::new();
        }
        let (first, second) = match self.order {
            CoordOrder::ColumnsFirst => (column, row),
            CoordOrder::RowsFirst => (row, column),
        };
        format!(
            "{}{}{}{}{}",
            self.prefix,
            self.first.render(first),
            self.inter,
            self.second.render(second),
            self.suffix
        )
    }
}

impl Default for LabelFormat {
    /// Two-digit zero-filled column then row, e.g. `0402`
    fn default() -> Self {
        Self {
            prefix: String::new(),
            first: FieldSpec::numeric(2, true),
            inter: String::new(),
            second: FieldSpec::numeric(2, true),
            suffix: String::new(),
            order: CoordOrder::ColumnsFirst,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Axis {
    Column,
    Row,
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Literal(String),
    Field(Axis, FieldSpec),
}

fn malformed() -> GridError {
    GridError::validation("coord-format", "is a bad coordinate format string")
}

/// Split a format string into literal text and fields
fn tokenize(format: &str) -> Result<Vec<Token>, GridError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            literal.push('%');
            continue;
        }

        let zero_fill = chars.next_if_eq(&'0').is_some();
        let mut digits = String::new();
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            digits.push(digit);
        }
        let width = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| malformed())?
        };
        let tally = chars.next_if_eq(&'t').is_some();

        let (axis, alphabetic) = match chars.next() {
            Some('c') => (Axis::Column, false),
            Some('C') => (Axis::Column, true),
            Some('r') => (Axis::Row, false),
            Some('R') => (Axis::Row, true),
            _ => return Err(malformed()),
        };
        let spec = if alphabetic {
            if zero_fill || width > 0 {
                return Err(malformed());
            }
            FieldSpec {
                style: if tally {
                    CoordStyle::AlphabeticTally
                } else {
                    CoordStyle::Alphabetic
                },
                width: 0,
                zero_fill: false,
            }
        } else {
            // Tally only means something for letters
            FieldSpec::numeric(width, zero_fill)
        };

        tokens.push(Token::Literal(std::mem::take(&mut literal)));
        tokens.push(Token::Field(axis, spec));
    }
    tokens.push(Token::Literal(literal));
    Ok(tokens)
}

impl FromStr for LabelFormat {
    type Err = GridError;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        if format.is_empty() {
            return Ok(Self::suppressed());
        }

        let tokens = tokenize(format)?;
        match tokens.as_slice() {
            [Token::Literal(prefix), Token::Field(first_axis, first), Token::Literal(inter), Token::Field(second_axis, second), Token::Literal(suffix)]
                if first_axis != second_axis =>
            {
                Ok(Self {
                    prefix: prefix.clone(),
                    first: *first,
                    inter: inter.clone(),
                    second: *second,
                    suffix: suffix.clone(),
                    order: match first_axis {
                        Axis::Column => CoordOrder::ColumnsFirst,
                        Axis::Row => CoordOrder::RowsFirst,
                    },
                })
            }
            _ => Err(malformed()),
        }
    }
}

impl TryFrom<String> for LabelFormat {
    type Error = GridError;

    fn try_from(format: String) -> Result<Self, Self::Error> {
        format.parse()
    }
}

impl From<LabelFormat> for String {
    fn from(format: LabelFormat) -> Self {
        format.to_string()
    }
}

/// Writes the format back out in template form
impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
            write!(f, "{}", text.replace('%', "%%"))
        }
        fn field(
            f: &mut fmt::Formatter<'_>,
            spec: &FieldSpec,
            axis: Axis,
        ) -> fmt::Result {
            let letter = match axis {
                Axis::Column => 'c',
                Axis::Row => 'r',
            };
            match spec.style {
                CoordStyle::Suppressed => Ok(()),
                CoordStyle::Numeric => {
                    write!(f, "%")?;
                    if spec.zero_fill {
                        write!(f, "0")?;
                    }
                    if spec.width > 0 {
                        write!(f, "{}", spec.width)?;
                    }
                    write!(f, "{}", letter)
                }
                CoordStyle::Alphabetic => {
                    write!(f, "%{}", letter.to_ascii_uppercase())
                }
                CoordStyle::AlphabeticTally => {
                    write!(f, "%t{}", letter.to_ascii_uppercase())
                }
            }
        }

        if self.is_suppressed() {
            return Ok(());
        }
        let (first_axis, second_axis) = match self.order {
            CoordOrder::ColumnsFirst => (Axis::Column, Axis::Row),
            CoordOrder::RowsFirst => (Axis::Row, Axis::Column),
        };
        literal(f, &self.prefix)?;
        field(f, &self.first, first_axis)?;
        literal(f, &self.inter)?;
        field(f, &self.second, second_axis)?;
        literal(f, &self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token,
    };

    fn parse(format: &str) -> LabelFormat {
        format.parse().unwrap()
    }

    #[test]
    fn test_default_format() {
        assert_eq!(parse("%02c%02r"), LabelFormat::default());
        assert_eq!(LabelFormat::default().render(4, 2), "0402");
    }

    #[test]
    fn test_literals() {
        let format = parse("[%c, %r]");
        assert_eq!(format.prefix, "[");
        assert_eq!(format.inter, ", ");
        assert_eq!(format.suffix, "]");
        assert_eq!(format.render(12, 3), "[12, 3]");

        let format = parse("%%%c-%r%%");
        assert_eq!(format.prefix, "%");
        assert_eq!(format.render(1, 2), "%1-2%");
    }

    #[test]
    fn test_rows_first() {
        let format = parse("%R%3c");
        assert_eq!(format.order, CoordOrder::RowsFirst);
        assert_eq!(format.first.style, CoordStyle::Alphabetic);
        assert_eq!(format.render(7, 28), "AB  7");
    }

    #[test]
    fn test_tally() {
        let format = parse("%tC.%r");
        assert_eq!(format.first.style, CoordStyle::AlphabeticTally);
        assert_eq!(format.render(27, 1), "AA.1");
        // The flag does nothing for numbers
        assert_eq!(parse("%tc%r"), parse("%c%r"));
    }

    #[test]
    fn test_suppressed() {
        let format = parse("");
        assert!(format.is_suppressed());
        assert_eq!(format.render(1, 1), "");
        assert_eq!(format.to_string(), "");
    }

    #[test]
    fn test_malformed() {
        for format in &[
            "%c", "%r", "%c%c", "%R%tR", "%02C%r", "%0R%c", "%x%r", "%c%r%",
            "%c%r%c", "no fields",
        ] {
            let err = format.parse::<LabelFormat>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{}", format);
        }
    }

    #[test]
    fn test_display() {
        for format in &["%02c%02r", "(%tR:%4c)", "%%%C%r"] {
            assert_eq!(parse(format).to_string(), *format);
        }
    }

    #[test]
    fn test_serde() {
        assert_ser_tokens(
            &LabelFormat::default(),
            &[Token::String("%02c%02r")],
        );
        assert_ser_tokens(&LabelFormat::suppressed(), &[Token::String("")]);
        assert_de_tokens(&parse("%C/%tR"), &[Token::Str("%C/%tR")]);
        assert_de_tokens_error::<LabelFormat>(
            &[Token::Str("%c")],
            "coord-format is a bad coordinate format string",
        );
    }
}
