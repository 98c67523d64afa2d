//! # Custom-Format Parsing and Rendering
//!
//! `from_format` accepts any strftime-style pattern (`%Y-%m-%d %H:%M:%S%.6f`,
//! `%d/%m/%Y`, ...). Fields the pattern does not mention are reset to the
//! Unix epoch defaults (1970-01-01 00:00:00.000000) rather than borrowed
//! from the current time, so the result depends on the input alone.
//!
//! The whole input must be consumed; trailing or missing characters fail.

use std::fmt::Write as _;

use chrono::format::{parse, ParseError, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc};

use crate::calendar;
use crate::date::{MAX_YEAR, MIN_YEAR};
use crate::error::{check_range, Field, InvalidValue};
use crate::zone::utc;

/// Components extracted from a custom-format parse.
///
/// Values are as parsed, not yet range-checked against the value types'
/// own limits (year 1..=9999 in particular).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PatternFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
    /// Offset read from the input (`%z`, `%:z`), if the pattern had one.
    pub offset: Option<FixedOffset>,
}

impl PatternFields {
    fn from_utc(dt: DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            nanosecond: dt.nanosecond(),
            offset: Some(*utc()),
        }
    }
}

/// Parse `value` against `pattern`, defaulting unspecified fields.
///
/// The date is resolved by chrono from whichever fields the pattern
/// supplied: year/month/day, year/day-of-year, year/week/weekday
/// (`%U`, `%W`) or ISO week-year/week/weekday (`%G`, `%V`, `%u`). Every
/// supplied field must agree with the resolved date, so a weekday name
/// that does not match the calendar day is rejected.
pub(crate) fn parse_pattern(
    kind: &'static str,
    value: &str,
    pattern: &str,
) -> Result<PatternFields, InvalidValue> {
    let reject = |e: ParseError| {
        tracing::debug!(kind, value, pattern, error = %e, "custom-format parse rejected input");
        InvalidValue::malformed(kind, value, format!("pattern {pattern:?} ({e})"))
    };

    let mut parsed = Parsed::new();
    parse(&mut parsed, value, StrftimeItems::new(pattern)).map_err(reject)?;

    if parsed.timestamp().is_some() {
        let dt = parsed.to_datetime_with_timezone(&Utc).map_err(reject)?;
        return Ok(PatternFields::from_utc(dt));
    }

    fill_epoch_defaults(&mut parsed).map_err(reject)?;
    let date = parsed
        .to_naive_date()
        .map_err(|e| explain_date(&parsed, kind, value).unwrap_or_else(|| reject(e)))?;
    let time = parsed.to_naive_time().map_err(reject)?;

    let offset = match parsed.offset() {
        Some(secs) => Some(FixedOffset::east_opt(secs).ok_or_else(|| {
            InvalidValue::malformed(kind, value, "an offset below 24 hours")
        })?),
        None => None,
    };

    Ok(PatternFields {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: time.hour(),
        minute: time.minute(),
        second: time.second(),
        nanosecond: time.nanosecond(),
        offset,
    })
}

/// Reset whatever the pattern left out to 1970-01-01 00:00:00.
///
/// Month and day are only defaulted when no day-of-year or week field is
/// present, since those select the day themselves.
fn fill_epoch_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some()
        || parsed.isoyear_div_100().is_some()
        || parsed.isoyear_mod_100().is_some();
    let selects_day = parsed.ordinal().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.isoweek().is_some();

    if !has_year {
        parsed.set_year(1970)?;
    }
    if !selects_day {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // `%I` without `%p` reads as a morning hour.
        (None, Some(_)) => parsed.set_ampm(false)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

/// Report a failed year/month/day resolution the way `Date::from_values`
/// would, when the pattern gave those three fields explicitly.
fn explain_date(parsed: &Parsed, kind: &'static str, value: &str) -> Option<InvalidValue> {
    let year = match (parsed.year(), parsed.year_div_100(), parsed.year_mod_100()) {
        (Some(year), _, _) => year,
        (None, Some(century), Some(rest)) => century.checked_mul(100)?.checked_add(rest)?,
        _ => return None,
    };
    let (month, day) = (parsed.month()?, parsed.day()?);
    if NaiveDate::from_ymd_opt(year, month, day).is_some() {
        return None;
    }
    tracing::debug!(kind, value, year, month, day, "custom-format parse named a missing day");
    Some(
        check_range(Field::Year, i64::from(year), i64::from(MIN_YEAR), i64::from(MAX_YEAR))
            .err()
            .unwrap_or(InvalidValue::NonexistentDate {
                year,
                month,
                day,
                days_in_month: calendar::days_in_month(year, month),
            }),
    )
}

/// Render `dt` with a strftime-style pattern.
///
/// # Errors
///
/// Returns [`InvalidValue::Malformed`] when the pattern contains an unknown
/// specifier.
pub(crate) fn render(dt: &DateTime<Utc>, pattern: &str) -> Result<String, InvalidValue> {
    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(StrftimeItems::new(pattern)))
        .map_err(|_| InvalidValue::malformed("pattern", pattern, "valid strftime specifiers"))?;
    Ok(out)
}
