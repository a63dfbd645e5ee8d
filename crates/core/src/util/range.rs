use crate::GridError;
use derive_more::Display;
use std::fmt::{Debug, Display};

/// A range between two values, inclusive on both ends. Used to describe the
/// valid values of an option, which can differ between output formats.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange<T: Copy + Display + PartialOrd> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + Display + PartialOrd> NumRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Check if a value is in this range. Ranges are inclusive on both ends.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks if the value is in this range. If it isn't, return a range
    /// error that names the option the value came from.
    pub fn ensure_contains(
        &self,
        option: &str,
        value: T,
        context: &str,
    ) -> Result<(), GridError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(GridError::range(
                option,
                format!("is not in the allowable range {}{}", self, context),
            ))
        }
    }
}
