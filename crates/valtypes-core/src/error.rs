//! # Validation Errors
//!
//! Every value type in this crate fails in exactly one way: the input does
//! not describe a legal value. [`InvalidValue`] is that failure. It is raised
//! at construction, parse or `modify` time and never afterwards, because a
//! constructed value is valid for its whole lifetime.
//!
//! Each variant carries enough context to fix the caller without guesswork:
//! the field or type that was rejected, the offending input, and the
//! accepted range or expected format.

use thiserror::Error;

/// A named component of a date or datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Calendar year.
    Year,
    /// Month of the year.
    Month,
    /// Day of the month.
    Day,
    /// Hour of the day.
    Hour,
    /// Minute of the hour.
    Minute,
    /// Second of the minute.
    Second,
    /// Sub-second fraction, in microseconds.
    Microsecond,
    /// Zone offset from UTC.
    Offset,
}

impl Field {
    /// Returns the lowercase name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Microsecond => "microsecond",
            Self::Offset => "offset",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single error kind raised by value-type constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidValue {
    /// A component lies outside its accepted range.
    #[error("invalid {field} value ({value}), it must be between [{min}-{max}]")]
    OutOfRange {
        /// The rejected component.
        field: Field,
        /// The value that was supplied.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// Every component is in range but the day does not exist in that month.
    #[error("invalid day value ({day}), {year:04}-{month:02} has only {days_in_month} days")]
    NonexistentDate {
        /// Year of the rejected date.
        year: i32,
        /// Month of the rejected date.
        month: u32,
        /// The day that does not exist.
        day: u32,
        /// Number of days the month actually has.
        days_in_month: u32,
    },

    /// The input string does not have the expected shape.
    #[error("invalid {kind} value ({value:?}), it must follow {expected}")]
    Malformed {
        /// What was being parsed (`Date`, `DateTimeUtc`, `adjustment`, ...).
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Description of the accepted format.
        expected: String,
    },

    /// Date arithmetic left the range chrono can represent.
    #[error("{field} arithmetic overflowed while applying {operation}")]
    Overflow {
        /// The component being adjusted.
        field: Field,
        /// Human-readable description of the adjustment.
        operation: String,
    },
}

impl InvalidValue {
    /// Build an [`InvalidValue::OutOfRange`].
    pub(crate) fn out_of_range(field: Field, value: impl Into<i64>, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            field,
            value: value.into(),
            min,
            max,
        }
    }

    /// Build an [`InvalidValue::Malformed`].
    pub(crate) fn malformed(
        kind: &'static str,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            kind,
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// The component this error is about, when there is one.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::OutOfRange { field, .. } | Self::Overflow { field, .. } => Some(*field),
            Self::NonexistentDate { .. } => Some(Field::Day),
            Self::Malformed { .. } => None,
        }
    }
}

/// Check `value` against an inclusive range, naming `field` on failure.
pub(crate) fn check_range(field: Field, value: i64, min: i64, max: i64) -> Result<(), InvalidValue> {
    if value < min || value > max {
        return Err(InvalidValue::out_of_range(field, value, min, max));
    }
    Ok(())
}
