//! # Inspect Subcommand
//!
//! `valtypes inspect <date|datetime> <VALUE>` prints every derived field of
//! a value as pretty JSON.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use valtypes_core::relative::weekday_name;

use crate::value::{TemporalValue, ValueKind};

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Value type to parse as.
    pub kind: ValueKind,

    /// Canonical string to inspect.
    pub value: String,
}

/// Time-of-day part of an inspection; absent for dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
}

/// Everything a value exposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub kind: &'static str,
    pub canonical: serde_json::Value,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOfDay>,
    pub day_of_week: u32,
    pub weekday: &'static str,
    pub day_of_year: u32,
    pub iso_week: u32,
    pub timestamp: i64,
}

impl Inspection {
    /// Collect the fields of `value`.
    pub fn of(value: &TemporalValue) -> Self {
        let date = value.date();
        let (time, timestamp) = match value {
            TemporalValue::Date(d) => (None, d.to_timestamp()),
            TemporalValue::DateTime(dt) => (
                Some(TimeOfDay {
                    hour: dt.hour(),
                    minute: dt.minute(),
                    second: dt.second(),
                    microsecond: dt.microsecond(),
                }),
                dt.to_timestamp(),
            ),
        };
        Self {
            kind: value.kind_name(),
            canonical: value.to_json(),
            year: date.year(),
            month: date.month(),
            day: date.day(),
            time,
            day_of_week: date.day_of_week(),
            weekday: weekday_name(date.weekday()),
            day_of_year: date.day_of_year(),
            iso_week: date.week(),
            timestamp,
        }
    }
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let value = TemporalValue::parse(args.kind, &args.value)
        .with_context(|| format!("cannot inspect {:?}", args.value))?;
    let report = Inspection::of(&value);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}
