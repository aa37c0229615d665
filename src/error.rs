use thiserror::Error;

use crate::field_type::{DateTimeFieldType, DurationFieldType};

/// Errors reported by the calendar engine. None of these are retried internally; the
/// computations are pure, so retrying cannot change the outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An instant or a year lies outside the range the calendar can represent.
    #[error("value {value} is out of range [{min}, {max}]")]
    Range { value: i64, min: i64, max: i64 },

    /// A field value does not correspond to a valid date or time.
    #[error("value {value} for {field:?} must be in the range [{min}, {max}]")]
    InvalidField {
        field: DateTimeFieldType,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Millisecond arithmetic exceeded the signed 64-bit range.
    #[error("arithmetic overflow")]
    Overflow,

    #[error("{0:?} is not a supported duration field")]
    UnsupportedField(DurationFieldType),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_field(field: DateTimeFieldType, value: i64, min: i64, max: i64) -> Self {
        Error::InvalidField {
            field,
            value,
            min,
            max,
        }
    }

    pub(crate) fn range(value: i64, min: i64, max: i64) -> Self {
        Error::Range { value, min, max }
    }
}
