//! # UTC Datetimes
//!
//! [`DateTimeUtc`] is an instant with microsecond precision, always stored
//! in UTC. Whatever offset the input carried, construction converts it, so
//! two values for the same absolute instant compare equal and print the
//! same.
//!
//! The canonical string is ATOM-style `YYYY-MM-DDTHH:MM:SS+00:00`. It has
//! no sub-second digits; the microseconds are still kept and are visible
//! through [`DateTimeUtc::microsecond()`] and [`DateTimeUtc::format()`].

use std::str::FromStr;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
    Utc, Weekday,
};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::clock::{Clock, SystemClock};
use crate::canonical::{fixed_digits, split_canonical_date};
use crate::date::{validate_ymd, Date, MAX_YEAR, MIN_YEAR};
use crate::error::{check_range, Field, InvalidValue};
use crate::pattern::{parse_pattern, render, PatternFields};
use crate::relative::Adjustment;
use crate::value::ValueObject;
use crate::zone::{is_utc, parse_offset, utc};

const CANONICAL_DATETIME: &str = "YYYY-MM-DDTHH:MM:SS±HH:MM";

/// A validated instant, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateTimeUtc(DateTime<Utc>);

/// Drop everything below microseconds; leap-second nanos clamp to the
/// last microsecond of the second.
fn truncate_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = dt.nanosecond().min(999_999_999);
    dt.with_nanosecond(nanos / 1_000 * 1_000).unwrap_or(dt)
}

fn check_year(dt: &DateTime<Utc>) -> Result<(), InvalidValue> {
    check_range(
        Field::Year,
        i64::from(dt.year()),
        i64::from(MIN_YEAR),
        i64::from(MAX_YEAR),
    )
}

/// Check time-of-day components and attach them to `date`.
fn with_time(
    date: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
) -> Result<NaiveDateTime, InvalidValue> {
    check_range(Field::Hour, i64::from(hour), 0, 23)?;
    check_range(Field::Minute, i64::from(minute), 0, 59)?;
    check_range(Field::Second, i64::from(second), 0, 59)?;
    check_range(Field::Microsecond, i64::from(microsecond), 0, 999_999)?;
    let time = NaiveTime::from_hms_micro_opt(hour, minute, second, microsecond).ok_or(
        InvalidValue::out_of_range(Field::Microsecond, microsecond, 0, 999_999),
    )?;
    Ok(date.and_time(time))
}

/// Read `local` as wall-clock time at `zone` and convert it to UTC.
fn normalize(local: NaiveDateTime, zone: &FixedOffset) -> Result<DateTime<Utc>, InvalidValue> {
    if !is_utc(zone) {
        tracing::debug!(%local, offset = %zone, "normalizing datetime to UTC");
    }
    let instant = zone
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| InvalidValue::Overflow {
            field: Field::Offset,
            operation: format!("converting {local} at {zone} to UTC"),
        })?
        .with_timezone(&Utc);
    check_year(&instant)?;
    Ok(instant)
}

/// Turn custom-format fields into a UTC instant.
///
/// An offset read from the input wins over `zone`.
pub(crate) fn resolve_fields(
    fields: PatternFields,
    zone: &FixedOffset,
) -> Result<DateTime<Utc>, InvalidValue> {
    let date = validate_ymd(fields.year, fields.month, fields.day)?;
    let local = with_time(
        date,
        fields.hour,
        fields.minute,
        fields.second,
        fields.nanosecond.min(999_999_999) / 1_000,
    )?;
    normalize(local, fields.offset.as_ref().unwrap_or(zone))
}

impl DateTimeUtc {
    pub(crate) fn from_utc_unchecked(instant: DateTime<Utc>) -> Self {
        Self(truncate_to_micros(instant))
    }

    /// Clamp a clock-derived instant into years 1..=9999.
    fn saturating(instant: DateTime<Utc>) -> Self {
        let bound = if instant.year() < MIN_YEAR {
            NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).map(|d| d.and_time(NaiveTime::MIN))
        } else if instant.year() > MAX_YEAR {
            NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31)
                .and_then(|d| d.and_hms_micro_opt(23, 59, 59, 999_999))
        } else {
            None
        };
        Self::from_utc_unchecked(bound.map_or(instant, |b| b.and_utc()))
    }

    // ---- explicit construction ----

    /// Midnight UTC of the given day.
    pub fn from_values(year: i32, month: u32, day: u32) -> Result<Self, InvalidValue> {
        Self::from_values_micro(year, month, day, 0, 0, 0, 0)
    }

    /// A UTC instant from date and time-of-day components.
    ///
    /// # Errors
    ///
    /// [`InvalidValue::OutOfRange`] naming the first offending field
    /// (year 1..=9999, month 1..=12, day 1..=31, hour 0..=23, minute and
    /// second 0..=59), or [`InvalidValue::NonexistentDate`].
    pub fn from_values_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, InvalidValue> {
        Self::from_values_micro(year, month, day, hour, minute, second, 0)
    }

    /// Like [`DateTimeUtc::from_values_hms()`] with a microsecond fraction.
    #[allow(clippy::too_many_arguments)]
    pub fn from_values_micro(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self, InvalidValue> {
        let date = validate_ymd(year, month, day)?;
        let local = with_time(date, hour, minute, second, microsecond)?;
        normalize(local, utc()).map(Self)
    }

    /// Components read as wall-clock time at `zone`, then normalized.
    #[allow(clippy::too_many_arguments)]
    pub fn from_values_in(
        zone: &FixedOffset,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, InvalidValue> {
        let date = validate_ymd(year, month, day)?;
        let local = with_time(date, hour, minute, second, 0)?;
        normalize(local, zone).map(Self)
    }

    /// Parse the canonical `YYYY-MM-DDTHH:MM:SS±HH:MM` form.
    ///
    /// Any valid offset is accepted; the stored value is the equivalent
    /// UTC instant.
    pub fn from_string(value: &str) -> Result<Self, InvalidValue> {
        let malformed = || InvalidValue::malformed("DateTimeUtc", value, CANONICAL_DATETIME);
        let bytes = value.as_bytes();
        if !value.is_ascii()
            || bytes.len() != 25
            || bytes[10] != b'T'
            || bytes[13] != b':'
            || bytes[16] != b':'
        {
            return Err(malformed());
        }
        let (year, month, day) = split_canonical_date(bytes).ok_or_else(malformed)?;
        let hour = fixed_digits(&bytes[11..13]).ok_or_else(malformed)?;
        let minute = fixed_digits(&bytes[14..16]).ok_or_else(malformed)?;
        let second = fixed_digits(&bytes[17..19]).ok_or_else(malformed)?;
        let offset = parse_offset(&value[19..])?;

        let date = validate_ymd(year, month, day)?;
        let local = with_time(date, hour, minute, second, 0)?;
        normalize(local, &offset).map(Self)
    }

    /// Parse `value` with a strftime-style `pattern`.
    ///
    /// Unspecified fields reset to 1970-01-01 00:00:00.000000. The input is
    /// read in the offset it carries (`%z`/`%:z`), else in `zone`, else UTC.
    pub fn from_format(
        value: &str,
        pattern: &str,
        zone: Option<&FixedOffset>,
    ) -> Result<Self, InvalidValue> {
        let fields = parse_pattern("DateTimeUtc", value, pattern)?;
        resolve_fields(fields, zone.unwrap_or(utc())).map(Self::from_utc_unchecked)
    }

    /// Normalize any chrono datetime.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, InvalidValue> {
        let instant = datetime.with_timezone(&Utc);
        check_year(&instant)?;
        Ok(Self::from_utc_unchecked(instant))
    }

    // ---- clock-relative construction ----

    /// The current instant (system clock).
    pub fn now() -> Self {
        Self::now_with(&SystemClock)
    }

    /// The current instant according to `clock`.
    pub fn now_with(clock: &impl Clock) -> Self {
        Self::saturating(clock.now())
    }

    /// 00:00:00 UTC today (system clock).
    pub fn today() -> Self {
        Self::today_with(&SystemClock)
    }

    /// 00:00:00 UTC of `clock`'s today.
    pub fn today_with(clock: &impl Clock) -> Self {
        Date::today_with(clock).to_datetime()
    }

    /// 00:00:00 UTC of the day it currently is in `zone`.
    pub fn today_in(clock: &impl Clock, zone: &FixedOffset) -> Self {
        Date::today_in(clock, zone).to_datetime()
    }

    /// 00:00:00 UTC yesterday (system clock).
    pub fn yesterday() -> Self {
        Self::yesterday_with(&SystemClock)
    }

    /// 00:00:00 UTC of `clock`'s yesterday.
    pub fn yesterday_with(clock: &impl Clock) -> Self {
        Date::yesterday_with(clock).to_datetime()
    }

    /// 00:00:00 UTC of yesterday as seen in `zone`.
    pub fn yesterday_in(clock: &impl Clock, zone: &FixedOffset) -> Self {
        Date::yesterday_in(clock, zone).to_datetime()
    }

    /// 00:00:00 UTC tomorrow (system clock).
    pub fn tomorrow() -> Self {
        Self::tomorrow_with(&SystemClock)
    }

    /// 00:00:00 UTC of `clock`'s tomorrow.
    pub fn tomorrow_with(clock: &impl Clock) -> Self {
        Date::tomorrow_with(clock).to_datetime()
    }

    /// 00:00:00 UTC of tomorrow as seen in `zone`.
    pub fn tomorrow_in(clock: &impl Clock, zone: &FixedOffset) -> Self {
        Date::tomorrow_in(clock, zone).to_datetime()
    }

    /// Midnight of `weekday` in the current Monday..Sunday week.
    pub fn this_week(weekday: Weekday) -> Result<Self, InvalidValue> {
        Self::this_week_with(&SystemClock, weekday)
    }

    /// Midnight of `weekday` in `clock`'s current week.
    ///
    /// Fails like [`Date::this_week_with`] at the edges of the year range.
    pub fn this_week_with(clock: &impl Clock, weekday: Weekday) -> Result<Self, InvalidValue> {
        Date::this_week_with(clock, weekday).map(|date| date.to_datetime())
    }

    /// Midnight UTC of `weekday` in the week containing today in `zone`.
    pub fn this_week_in(
        clock: &impl Clock,
        zone: &FixedOffset,
        weekday: Weekday,
    ) -> Result<Self, InvalidValue> {
        Date::this_week_in(clock, zone, weekday).map(|date| date.to_datetime())
    }

    /// Midnight of the most recent `weekday` strictly before today.
    pub fn last(weekday: Weekday) -> Result<Self, InvalidValue> {
        Self::last_with(&SystemClock, weekday)
    }

    /// Midnight of the most recent `weekday` strictly before `clock`'s today.
    pub fn last_with(clock: &impl Clock, weekday: Weekday) -> Result<Self, InvalidValue> {
        Date::last_with(clock, weekday).map(|date| date.to_datetime())
    }

    /// Midnight UTC of the most recent `weekday` before today in `zone`.
    pub fn last_in(
        clock: &impl Clock,
        zone: &FixedOffset,
        weekday: Weekday,
    ) -> Result<Self, InvalidValue> {
        Date::last_in(clock, zone, weekday).map(|date| date.to_datetime())
    }

    // ---- transformation ----

    /// Apply an offset, returning a new value.
    ///
    /// Microseconds survive every adjustment except `Previous`/`Next`,
    /// which land on 00:00:00.000000.
    pub fn modify(&self, adjustment: Adjustment) -> Result<Self, InvalidValue> {
        let shifted = adjustment.apply(self.0.naive_utc())?.and_utc();
        check_year(&shifted)?;
        Ok(Self(shifted))
    }

    /// The last representable instant of the same UTC day, 23:59:59.999999.
    ///
    /// Not the start of the day; see [`DateTimeUtc::start_of_day()`] for that.
    pub fn end_of_day(&self) -> Self {
        let end = self
            .0
            .date_naive()
            .and_hms_micro_opt(23, 59, 59, 999_999)
            .map_or(self.0, |dt| dt.and_utc());
        Self(end)
    }

    /// 00:00:00.000000 of the same UTC day.
    pub fn start_of_day(&self) -> Self {
        Self(self.0.date_naive().and_time(NaiveTime::MIN).and_utc())
    }

    /// The calendar day of this instant.
    pub fn to_date(&self) -> Date {
        Date::from_naive_unchecked(self.0.date_naive())
    }

    // ---- accessors ----

    /// Calendar year (1..=9999).
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month (1..=12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month (1..=31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour (0..=23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute (0..=59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Second (0..=59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Sub-second fraction in microseconds (0..=999_999).
    pub fn microsecond(&self) -> u32 {
        self.0.nanosecond() / 1_000
    }

    /// ISO day of the week, Monday = 1 .. Sunday = 7.
    pub fn day_of_week(&self) -> u32 {
        calendar::day_of_week(self.year(), self.month(), self.day())
    }

    /// Day of the week as a chrono [`Weekday`].
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// 1-based day of the year.
    pub fn day_of_year(&self) -> u32 {
        calendar::day_of_year(self.year(), self.month(), self.day())
    }

    /// ISO-8601 week number.
    pub fn week(&self) -> u32 {
        calendar::iso_week(self.year(), self.month(), self.day())
    }

    /// The wrapped chrono instant.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix timestamp in whole seconds.
    pub fn to_timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render with a strftime-style pattern.
    pub fn format(&self, pattern: &str) -> Result<String, InvalidValue> {
        render(&self.0, pattern)
    }

    // ---- predicates ----

    /// Whether this instant is before now (system clock).
    pub fn is_past(&self) -> bool {
        self.is_past_with(&SystemClock)
    }

    /// Whether this instant is before `clock`'s now.
    pub fn is_past_with(&self, clock: &impl Clock) -> bool {
        *self < Self::now_with(clock)
    }

    /// Whether this instant is after now (system clock).
    pub fn is_future(&self) -> bool {
        self.is_future_with(&SystemClock)
    }

    /// Whether this instant is after `clock`'s now.
    pub fn is_future_with(&self, clock: &impl Clock) -> bool {
        *self > Self::now_with(clock)
    }

    /// Whether this instant falls on today's UTC date (system clock).
    pub fn is_today(&self) -> bool {
        self.is_today_with(&SystemClock)
    }

    /// Whether this instant lies in `[today, today.end_of_day()]`.
    pub fn is_today_with(&self, clock: &impl Clock) -> bool {
        let start = Self::today_with(clock);
        let end = start.end_of_day();
        start <= *self && *self <= end
    }
}

impl std::fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}+00:00",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl FromStr for DateTimeUtc {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for DateTimeUtc {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl TryFrom<&str> for DateTimeUtc {
    type Error = InvalidValue;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_string(value)
    }
}

impl From<DateTimeUtc> for String {
    fn from(value: DateTimeUtc) -> Self {
        value.to_string()
    }
}

impl From<DateTimeUtc> for DateTime<Utc> {
    fn from(value: DateTimeUtc) -> Self {
        value.0
    }
}

impl From<DateTimeUtc> for Date {
    fn from(value: DateTimeUtc) -> Self {
        value.to_date()
    }
}

impl ValueObject for DateTimeUtc {
    const KIND: &'static str = "DateTimeUtc";

    fn is_valid(value: &str) -> bool {
        Self::from_string(value).is_ok()
    }
}
