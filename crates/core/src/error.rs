use strum::Display;
use thiserror::Error;
use validator::ValidationErrors;

/// A geometric quantity that the resolver is responsible for determining.
/// Each one gets its own failure when it can't be derived from the given
/// values.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum Quantity {
    #[strum(serialize = "hex side")]
    HexSide,
    #[strum(serialize = "hex width")]
    HexWidth,
    #[strum(serialize = "hex height")]
    HexHeight,
    #[strum(serialize = "image width")]
    ImageWidth,
    #[strum(serialize = "image height")]
    ImageHeight,
    #[strum(serialize = "rows")]
    Rows,
    #[strum(serialize = "columns")]
    Columns,
}

impl Quantity {
    /// The option that supplies this quantity
    pub fn option(self) -> &'static str {
        match self {
            Self::HexSide => "hex-side",
            Self::HexWidth => "hex-width",
            Self::HexHeight => "hex-height",
            Self::ImageWidth => "image-width",
            Self::ImageHeight => "image-height",
            Self::Rows => "rows",
            Self::Columns => "columns",
        }
    }
}

/// Broad category of a [GridError]. Useful when the caller cares about what
/// went wrong, but not about the exact option.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A value has the wrong type or syntax, or is outside the range that
    /// the output format accepts
    Validation,
    /// Resolution finished without determining a required quantity
    Underconstrained,
    /// A value is well-formed, but outside its domain
    Range,
    /// A bug in the resolver
    Internal,
}

/// Any failure that can occur while turning options into a grid. Every error
/// is terminal: nothing is partially applied, and the message names the
/// offending option along with the reason.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("{option} {reason}")]
    Validation { option: String, reason: String },

    #[error("unable to determine {0} from given values")]
    Underconstrained(Quantity),

    #[error("{option} {reason}")]
    Range { option: String, reason: String },

    /// Declarative range checks on the config structs failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationErrors),

    #[error("resolution did not settle after {passes} passes")]
    Unsettled { passes: usize },
}

impl GridError {
    pub fn validation(
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub fn range(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Range {
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Underconstrained(_) => ErrorKind::Underconstrained,
            Self::Range { .. } | Self::InvalidConfig(_) => ErrorKind::Range,
            Self::Unsettled { .. } => ErrorKind::Internal,
        }
    }
}
