//! # Now Subcommand
//!
//! `valtypes now [--kind date|datetime] [--which now|today|yesterday|tomorrow]`
//! prints a clock-derived value. The clock and zone come from
//! [`Settings`], so `--now` and `--zone` make the output reproducible.

use anyhow::Result;
use clap::{Args, ValueEnum};

use valtypes_core::{Date, DateTimeUtc};

use crate::config::Settings;
use crate::value::{TemporalValue, ValueKind};

/// Which clock-relative value to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Which {
    /// The current instant (for dates: today).
    Now,
    /// Start of the current day.
    Today,
    /// Start of the previous day.
    Yesterday,
    /// Start of the next day.
    Tomorrow,
}

/// Arguments for the `now` subcommand.
#[derive(Args, Debug)]
pub struct NowArgs {
    /// Value type to produce.
    #[arg(long, value_enum, default_value = "datetime")]
    pub kind: ValueKind,

    /// Which value relative to the clock.
    #[arg(long, value_enum, default_value = "now")]
    pub which: Which,
}

/// Produce the requested value from `settings`.
pub fn current(kind: ValueKind, which: Which, settings: &Settings) -> TemporalValue {
    let clock = &settings.clock;
    let zone = &settings.zone;
    match (kind, which) {
        (ValueKind::Datetime, Which::Now) => TemporalValue::DateTime(DateTimeUtc::now_with(clock)),
        (ValueKind::Datetime, Which::Today) => {
            TemporalValue::DateTime(DateTimeUtc::today_in(clock, zone))
        }
        (ValueKind::Datetime, Which::Yesterday) => {
            TemporalValue::DateTime(DateTimeUtc::yesterday_in(clock, zone))
        }
        (ValueKind::Datetime, Which::Tomorrow) => {
            TemporalValue::DateTime(DateTimeUtc::tomorrow_in(clock, zone))
        }
        (ValueKind::Date, Which::Now | Which::Today) => {
            TemporalValue::Date(Date::today_in(clock, zone))
        }
        (ValueKind::Date, Which::Yesterday) => TemporalValue::Date(Date::yesterday_in(clock, zone)),
        (ValueKind::Date, Which::Tomorrow) => TemporalValue::Date(Date::tomorrow_in(clock, zone)),
    }
}

/// Execute the now subcommand.
pub fn run_now(args: &NowArgs, settings: &Settings) -> Result<u8> {
    println!("{}", current(args.kind, args.which, settings));
    Ok(0)
}
