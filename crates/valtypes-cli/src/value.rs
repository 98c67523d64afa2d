//! # Kind Selection
//!
//! Most subcommands work on either a `Date` or a `DateTimeUtc`, chosen on
//! the command line. [`TemporalValue`] carries whichever was parsed so the
//! handlers stay kind-agnostic.

use clap::ValueEnum;

use valtypes_core::{Adjustment, Date, DateTimeUtc, InvalidValue, ValueObject, Weekday};

/// Which value type a subcommand operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// UTC instant, `YYYY-MM-DDTHH:MM:SS±HH:MM`.
    Datetime,
}

/// A parsed value of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValue {
    /// A calendar date.
    Date(Date),
    /// A UTC instant.
    DateTime(DateTimeUtc),
}

impl TemporalValue {
    /// Parse the canonical string form of `kind`.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self, InvalidValue> {
        match kind {
            ValueKind::Date => Date::from_string(text).map(Self::Date),
            ValueKind::Datetime => DateTimeUtc::from_string(text).map(Self::DateTime),
        }
    }

    /// Project a date onto `kind`; datetimes land on midnight UTC.
    pub fn from_date(kind: ValueKind, date: Date) -> Self {
        match kind {
            ValueKind::Date => Self::Date(date),
            ValueKind::Datetime => Self::DateTime(date.to_datetime()),
        }
    }

    /// The type name, as used in messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Date(_) => Date::KIND,
            Self::DateTime(_) => DateTimeUtc::KIND,
        }
    }

    /// Apply one adjustment.
    pub fn modify(&self, adjustment: Adjustment) -> Result<Self, InvalidValue> {
        match self {
            Self::Date(d) => d.modify(adjustment).map(Self::Date),
            Self::DateTime(dt) => dt.modify(adjustment).map(Self::DateTime),
        }
    }

    /// The calendar day of the value.
    pub fn date(&self) -> Date {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.to_date(),
        }
    }

    /// Serialization form of the wrapped value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Date(d) => d.to_json(),
            Self::DateTime(dt) => dt.to_json(),
        }
    }
}

impl std::fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(d) => std::fmt::Display::fmt(d, f),
            Self::DateTime(dt) => std::fmt::Display::fmt(dt, f),
        }
    }
}

/// clap value parser for weekday arguments (`mon`, `Monday`, ...).
pub fn parse_weekday(text: &str) -> Result<Weekday, String> {
    text.parse::<Weekday>()
        .map_err(|_| format!("unknown weekday {text:?}, expected e.g. \"monday\" or \"mon\""))
}
