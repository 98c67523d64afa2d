//! # Weekday Subcommand
//!
//! `valtypes weekday <last|this-week> <WEEKDAY> [--kind date|datetime]`
//! resolves a weekday relative to today in the configured zone.
//!
//! `last` never returns today: on a Monday, `last monday` is a week back.
//! `this-week` stays inside the Monday..Sunday week and may be in the past
//! or the future.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use valtypes_core::relative::weekday_name;
use valtypes_core::{Date, Weekday};

use crate::config::Settings;
use crate::value::{parse_weekday, TemporalValue, ValueKind};

/// How the weekday is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Most recent occurrence strictly before today.
    Last,
    /// Occurrence inside the current Monday..Sunday week.
    ThisWeek,
}

/// Arguments for the `weekday` subcommand.
#[derive(Args, Debug)]
pub struct WeekdayArgs {
    /// Resolution mode.
    pub mode: Mode,

    /// Weekday name, full or abbreviated.
    #[arg(value_parser = parse_weekday)]
    pub weekday: Weekday,

    /// Value type to produce.
    #[arg(long, value_enum, default_value = "date")]
    pub kind: ValueKind,
}

/// Resolve `weekday` against the zone-local today of `settings`.
pub fn resolve(
    mode: Mode,
    weekday: Weekday,
    kind: ValueKind,
    settings: &Settings,
) -> Result<TemporalValue> {
    let date = match mode {
        Mode::Last => Date::last_in(&settings.clock, &settings.zone, weekday),
        Mode::ThisWeek => Date::this_week_in(&settings.clock, &settings.zone, weekday),
    }
    .with_context(|| {
        let today = Date::today_in(&settings.clock, &settings.zone);
        format!("{} relative to {today}", weekday_name(weekday))
    })?;
    Ok(TemporalValue::from_date(kind, date))
}

/// Execute the weekday subcommand.
pub fn run_weekday(args: &WeekdayArgs, settings: &Settings) -> Result<u8> {
    let value = resolve(args.mode, args.weekday, args.kind, settings)?;
    println!("{value}");
    Ok(0)
}
