//! # Calendar Date
//!
//! [`Date`] is a zone-free, time-free proleptic Gregorian day between
//! 0001-01-01 and 9999-12-31. Its canonical string is `YYYY-MM-DD`.
//!
//! ## Construction
//!
//! - [`Date::from_values()`]: explicit components, range-checked.
//! - [`Date::from_string()`]: canonical `YYYY-MM-DD` only.
//! - [`Date::from_format()`]: any strftime-style pattern.
//! - [`Date::today()`], [`Date::yesterday()`], [`Date::tomorrow()`] and their
//!   `_with`/`_in` variants read through a [`Clock`].
//! - [`Date::this_week()`] and [`Date::last()`] resolve relative weekdays.
//!
//! Impossible days (`2021-02-30`) are rejected, not rolled over into the
//! next month.

use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::canonical::split_canonical_date;
use crate::clock::{Clock, SystemClock};
use crate::datetime::{resolve_fields, DateTimeUtc};
use crate::error::{check_range, Field, InvalidValue};
use crate::pattern::{parse_pattern, render};
use crate::relative::{previous_weekday, weekday_this_week, Adjustment};
use crate::value::ValueObject;
use crate::zone::utc;

/// Smallest supported year.
pub const MIN_YEAR: i32 = 1;
/// Largest supported year.
pub const MAX_YEAR: i32 = 9999;

const CANONICAL_DATE: &str = "YYYY-MM-DD";

/// A validated calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

/// Range-check `(year, month, day)` and build the naive date.
///
/// Checks run in order year, month, day, then existence of the day in
/// that month, so the first offending field is the one reported.
pub(crate) fn validate_ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, InvalidValue> {
    check_range(Field::Year, i64::from(year), i64::from(MIN_YEAR), i64::from(MAX_YEAR))?;
    check_range(Field::Month, i64::from(month), 1, 12)?;
    check_range(Field::Day, i64::from(day), 1, 31)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(InvalidValue::NonexistentDate {
        year,
        month,
        day,
        days_in_month: calendar::days_in_month(year, month),
    })
}

impl Date {
    pub(crate) fn from_naive_unchecked(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Clamp a clock-derived date into the supported range.
    fn saturating(date: NaiveDate) -> Self {
        let bound = if date.year() < MIN_YEAR {
            NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1)
        } else if date.year() > MAX_YEAR {
            NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31)
        } else {
            None
        };
        Self(bound.unwrap_or(date))
    }

    // ---- explicit construction ----

    /// Create a date from its components.
    ///
    /// # Errors
    ///
    /// - [`InvalidValue::OutOfRange`] if year is outside 1..=9999, month
    ///   outside 1..=12 or day outside 1..=31.
    /// - [`InvalidValue::NonexistentDate`] if the day does not exist in
    ///   that month (e.g. February 30).
    pub fn from_values(year: i32, month: u32, day: u32) -> Result<Self, InvalidValue> {
        validate_ymd(year, month, day).map(Self)
    }

    /// Parse the canonical `YYYY-MM-DD` form.
    ///
    /// Fixed digit counts: a four-digit year and two-digit month and day.
    pub fn from_string(value: &str) -> Result<Self, InvalidValue> {
        let bytes = value.as_bytes();
        let (year, month, day) = Some(bytes)
            .filter(|b| b.len() == 10)
            .and_then(split_canonical_date)
            .ok_or_else(|| InvalidValue::malformed("Date", value, CANONICAL_DATE))?;

        Self::from_values(year, month, day)
    }

    /// Parse `value` with a strftime-style `pattern`.
    ///
    /// Fields the pattern does not cover default to 1970-01-01. If the
    /// pattern reads an offset, the parsed instant is normalized to UTC
    /// before its calendar day is taken.
    pub fn from_format(value: &str, pattern: &str) -> Result<Self, InvalidValue> {
        let fields = parse_pattern("Date", value, pattern)?;
        let instant = resolve_fields(fields, utc())?;
        Ok(Self(instant.date_naive()))
    }

    /// The calendar day of `datetime` in its own zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, InvalidValue> {
        Self::from_naive(datetime.date_naive())
    }

    /// Wrap a chrono date, checking the year range.
    pub fn from_naive(date: NaiveDate) -> Result<Self, InvalidValue> {
        check_range(
            Field::Year,
            i64::from(date.year()),
            i64::from(MIN_YEAR),
            i64::from(MAX_YEAR),
        )?;
        Ok(Self(date))
    }

    // ---- clock-relative construction ----

    /// Today's UTC date according to the system clock.
    pub fn today() -> Self {
        Self::today_with(&SystemClock)
    }

    /// Today's UTC date according to `clock`.
    pub fn today_with(clock: &impl Clock) -> Self {
        Self::today_in(clock, utc())
    }

    /// Today's date as seen in `zone`.
    pub fn today_in(clock: &impl Clock, zone: &FixedOffset) -> Self {
        Self::saturating(clock.now().with_timezone(zone).date_naive())
    }

    /// Yesterday's UTC date according to the system clock.
    pub fn yesterday() -> Self {
        Self::yesterday_with(&SystemClock)
    }

    /// Yesterday's UTC date according to `clock`.
    pub fn yesterday_with(clock: &impl Clock) -> Self {
        Self::yesterday_in(clock, utc())
    }

    /// Yesterday's date as seen in `zone`.
    pub fn yesterday_in(clock: &impl Clock, zone: &FixedOffset) -> Self {
        let today = Self::today_in(clock, zone).0;
        Self::saturating(today.pred_opt().unwrap_or(today))
    }

    /// Tomorrow's UTC date according to the system clock.
    pub fn tomorrow() -> Self {
        Self::tomorrow_with(&SystemClock)
    }

    /// Tomorrow's UTC date according to `clock`.
    pub fn tomorrow_with(clock: &impl Clock) -> Self {
        Self::tomorrow_in(clock, utc())
    }

    /// Tomorrow's date as seen in `zone`.
    pub fn tomorrow_in(clock: &impl Clock, zone: &FixedOffset) -> Self {
        let today = Self::today_in(clock, zone).0;
        Self::saturating(today.succ_opt().unwrap_or(today))
    }

    /// `weekday` of the current Monday..Sunday week.
    pub fn this_week(weekday: Weekday) -> Result<Self, InvalidValue> {
        Self::this_week_with(&SystemClock, weekday)
    }

    /// `weekday` of the Monday..Sunday week containing `clock`'s today.
    ///
    /// May lie before or after today.
    ///
    /// # Errors
    ///
    /// [`InvalidValue::OutOfRange`] on [`Field::Year`] when the week
    /// straddles 0001-01-01 or 9999-12-31 and the requested day falls
    /// outside the supported years.
    pub fn this_week_with(clock: &impl Clock, weekday: Weekday) -> Result<Self, InvalidValue> {
        Self::this_week_in(clock, utc(), weekday)
    }

    /// `weekday` of the Monday..Sunday week containing today in `zone`.
    pub fn this_week_in(
        clock: &impl Clock,
        zone: &FixedOffset,
        weekday: Weekday,
    ) -> Result<Self, InvalidValue> {
        let today = Self::today_in(clock, zone).0;
        Self::resolve_weekday(weekday_this_week(today, weekday), "this week")
    }

    /// The most recent `weekday` strictly before today.
    pub fn last(weekday: Weekday) -> Result<Self, InvalidValue> {
        Self::last_with(&SystemClock, weekday)
    }

    /// The most recent `weekday` strictly before `clock`'s today.
    ///
    /// Today never matches: on a Monday, `last_with(clock, Weekday::Mon)`
    /// is the Monday one week earlier.
    ///
    /// # Errors
    ///
    /// [`InvalidValue::OutOfRange`] on [`Field::Year`] when that day would
    /// fall before 0001-01-01.
    pub fn last_with(clock: &impl Clock, weekday: Weekday) -> Result<Self, InvalidValue> {
        Self::last_in(clock, utc(), weekday)
    }

    /// The most recent `weekday` strictly before today in `zone`.
    pub fn last_in(
        clock: &impl Clock,
        zone: &FixedOffset,
        weekday: Weekday,
    ) -> Result<Self, InvalidValue> {
        let today = Self::today_in(clock, zone).0;
        Self::resolve_weekday(previous_weekday(today, weekday), "last weekday")
    }

    fn resolve_weekday(
        resolved: Option<NaiveDate>,
        operation: &str,
    ) -> Result<Self, InvalidValue> {
        let date = resolved.ok_or_else(|| InvalidValue::Overflow {
            field: Field::Day,
            operation: operation.to_string(),
        })?;
        Self::from_naive(date)
    }

    // ---- transformation ----

    /// Apply a calendar offset, returning a new date.
    ///
    /// Time-based offsets act on midnight and the result is floored back
    /// to a whole day, so `Hours(25)` moves one day forward.
    ///
    /// # Errors
    ///
    /// [`InvalidValue::OutOfRange`] if the result leaves years 1..=9999,
    /// [`InvalidValue::Overflow`] if the arithmetic itself overflows.
    pub fn modify(&self, adjustment: Adjustment) -> Result<Self, InvalidValue> {
        let shifted = adjustment.apply(self.0.and_time(NaiveTime::MIN))?;
        Self::from_naive(shifted.date())
    }

    /// Midnight UTC at the start of this date.
    pub fn to_datetime(&self) -> DateTimeUtc {
        DateTimeUtc::from_utc_unchecked(self.0.and_time(NaiveTime::MIN).and_utc())
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

    /// The wrapped chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Unix timestamp of midnight UTC.
    pub fn to_timestamp(&self) -> i64 {
        self.0.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// Render with a strftime-style pattern; time fields read as midnight UTC.
    pub fn format(&self, pattern: &str) -> Result<String, InvalidValue> {
        render(&self.0.and_time(NaiveTime::MIN).and_utc(), pattern)
    }

    // ---- predicates ----

    /// Whether this date is before today (system clock).
    pub fn is_past(&self) -> bool {
        self.is_past_with(&SystemClock)
    }

    /// Whether this date is before `clock`'s today.
    pub fn is_past_with(&self, clock: &impl Clock) -> bool {
        *self < Self::today_with(clock)
    }

    /// Whether this date is after today (system clock).
    pub fn is_future(&self) -> bool {
        self.is_future_with(&SystemClock)
    }

    /// Whether this date is after `clock`'s today.
    pub fn is_future_with(&self, clock: &impl Clock) -> bool {
        *self > Self::today_with(clock)
    }

    /// Whether this date is today (system clock).
    pub fn is_today(&self) -> bool {
        self.is_today_with(&SystemClock)
    }

    /// Whether this date is `clock`'s today.
    pub fn is_today_with(&self, clock: &impl Clock) -> bool {
        *self == Self::today_with(clock)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for Date {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for Date {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl TryFrom<&str> for Date {
    type Error = InvalidValue;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_string(value)
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl ValueObject for Date {
    const KIND: &'static str = "Date";

    fn is_valid(value: &str) -> bool {
        Self::from_string(value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::Utc;

    fn clock_at(y: i32, m: u32, d: u32, h: u32) -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap())
    }

    // ---- construction ----

    #[test]
    fn from_values_formats_canonically() {
        assert_eq!(Date::from_values(2020, 1, 2).unwrap().to_string(), "2020-01-02");
        assert_eq!(Date::from_values(1, 1, 1).unwrap().to_string(), "0001-01-01");
        assert_eq!(Date::from_values(9999, 12, 31).unwrap().to_string(), "9999-12-31");
    }

    #[test]
    fn from_values_keeps_components() {
        for year in [1, 1000, 2000, 9999] {
            assert_eq!(Date::from_values(year, 1, 2).unwrap().year(), year);
        }
        for month in 1..=12 {
            assert_eq!(Date::from_values(2020, month, 2).unwrap().month(), month);
        }
        for day in 1..=31 {
            assert_eq!(Date::from_values(2020, 1, day).unwrap().day(), day);
        }
    }

    #[test]
    fn from_values_rejects_out_of_range_components() {
        for year in [-1, 0, 10_000] {
            assert!(matches!(
                Date::from_values(year, 1, 2),
                Err(InvalidValue::OutOfRange { field: Field::Year, .. })
            ));
        }
        for month in [0, 13] {
            assert!(matches!(
                Date::from_values(2000, month, 2),
                Err(InvalidValue::OutOfRange { field: Field::Month, .. })
            ));
        }
        for day in [0, 32] {
            assert!(matches!(
                Date::from_values(2000, 1, day),
                Err(InvalidValue::OutOfRange { field: Field::Day, .. })
            ));
        }
    }

    #[test]
    fn from_values_rejects_nonexistent_days() {
        assert_eq!(
            Date::from_values(2021, 2, 29),
            Err(InvalidValue::NonexistentDate {
                year: 2021,
                month: 2,
                day: 29,
                days_in_month: 28
            })
        );
        assert!(Date::from_values(2020, 2, 29).is_ok());
        assert!(Date::from_values(2020, 4, 31).is_err());
    }

    #[test]
    fn from_values_reports_first_offending_field() {
        let err = Date::from_values(0, 13, 32).unwrap_err();
        assert_eq!(err.field(), Some(Field::Year));
    }

    #[test]
    fn from_string_round_trips() {
        assert_eq!(Date::from_string("2020-01-12").unwrap().to_string(), "2020-01-12");
    }

    #[test]
    fn from_string_rejects_other_shapes() {
        for bad in ["020-01-12:", "2020-1-12", "2020-01-12T00:00", "2020/01/12", "", "20200112"] {
            assert!(Date::from_string(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn from_format_resets_time() {
        let date = Date::from_format("2020-01-02", "%Y-%m-%d").unwrap();
        assert_eq!(date.format("%Y-%m-%d %H:%M:%S%.6f").unwrap(), "2020-01-02 00:00:00.000000");
    }

    #[test]
    fn from_format_custom_pattern() {
        let date = Date::from_format("12/01/2020", "%d/%m/%Y").unwrap();
        assert_eq!(date.to_string(), "2020-01-12");
    }

    #[test]
    fn from_format_normalizes_offset_to_utc() {
        let date = Date::from_format("2020-01-02 01:00 +02:00", "%Y-%m-%d %H:%M %:z").unwrap();
        assert_eq!(date.to_string(), "2020-01-01");
    }

    #[test]
    fn from_format_rejects_incomplete_input() {
        assert!(Date::from_format("2020-01-", "%Y-%m-%d").is_err());
    }

    #[test]
    fn from_format_resolves_iso_week_dates() {
        let date = Date::from_format("2020-W02-1", "%G-W%V-%u").unwrap();
        assert_eq!(date.to_string(), "2020-01-06");
        assert_eq!(date.week(), 2);
        let date = Date::from_format("2015-W53-7", "%G-W%V-%u").unwrap();
        assert_eq!(date.to_string(), "2016-01-03");
    }

    #[test]
    fn from_format_rejects_mismatched_weekday() {
        assert_eq!(
            Date::from_format("Mon 2020-01-06", "%a %Y-%m-%d").unwrap().to_string(),
            "2020-01-06"
        );
        assert!(Date::from_format("Tue 2020-01-06", "%a %Y-%m-%d").is_err());
        assert!(Date::from_format("Sunday, 12 January 2020", "%A, %d %B %Y").is_ok());
        assert!(Date::from_format("Monday, 12 January 2020", "%A, %d %B %Y").is_err());
    }

    #[test]
    fn from_format_reports_nonexistent_day() {
        assert!(matches!(
            Date::from_format("30/02/2021", "%d/%m/%Y"),
            Err(InvalidValue::NonexistentDate { days_in_month: 28, .. })
        ));
    }

    #[test]
    fn from_datetime_uses_local_day() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = zone.with_ymd_and_hms(2020, 8, 1, 0, 30, 0).unwrap();
        assert_eq!(Date::from_datetime(&dt).unwrap().to_string(), "2020-08-01");
    }

    // ---- clock-relative ----

    #[test]
    fn today_yesterday_tomorrow() {
        let clock = clock_at(2020, 3, 1, 23);
        assert_eq!(Date::today_with(&clock).to_string(), "2020-03-01");
        assert_eq!(Date::yesterday_with(&clock).to_string(), "2020-02-29");
        assert_eq!(Date::tomorrow_with(&clock).to_string(), "2020-03-02");
    }

    #[test]
    fn today_in_zone() {
        let clock = clock_at(2020, 3, 1, 23);
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(Date::today_in(&clock, &tokyo).to_string(), "2020-03-02");
        assert_eq!(Date::yesterday_in(&clock, &tokyo).to_string(), "2020-03-01");
        assert_eq!(Date::tomorrow_in(&clock, &tokyo).to_string(), "2020-03-03");
    }

    #[test]
    fn this_week_covers_monday_to_sunday() {
        // Thursday 2020-01-09.
        let clock = clock_at(2020, 1, 9, 12);
        let this_week = |w| Date::this_week_with(&clock, w).unwrap().to_string();
        assert_eq!(this_week(Weekday::Mon), "2020-01-06");
        assert_eq!(this_week(Weekday::Thu), "2020-01-09");
        assert_eq!(this_week(Weekday::Sun), "2020-01-12");
    }

    #[test]
    fn last_weekday_on_same_weekday_goes_back_a_week() {
        // Monday 2020-01-06.
        let clock = clock_at(2020, 1, 6, 8);
        let last = |w| Date::last_with(&clock, w).unwrap().to_string();
        assert_eq!(last(Weekday::Mon), "2019-12-30");
        assert_eq!(last(Weekday::Sun), "2020-01-05");
        assert_eq!(last(Weekday::Tue), "2019-12-31");
    }

    #[test]
    fn last_weekday_before_year_one_fails() {
        // 0001-01-01 is a Monday.
        let clock = clock_at(1, 1, 1, 0);
        for weekday in [Weekday::Sun, Weekday::Mon, Weekday::Tue] {
            assert!(matches!(
                Date::last_with(&clock, weekday),
                Err(InvalidValue::OutOfRange { field: Field::Year, value: 0, .. })
            ));
        }
        assert_eq!(Date::this_week_with(&clock, Weekday::Mon).unwrap().to_string(), "0001-01-01");
        let tuesday = clock_at(1, 1, 2, 0);
        assert_eq!(Date::last_with(&tuesday, Weekday::Mon).unwrap().to_string(), "0001-01-01");
    }

    #[test]
    fn this_week_past_year_9999_fails() {
        // 9999-12-31 is a Friday; its Saturday and Sunday fall in year 10000.
        let clock = clock_at(9999, 12, 31, 12);
        assert_eq!(Date::this_week_with(&clock, Weekday::Fri).unwrap().to_string(), "9999-12-31");
        assert_eq!(Date::this_week_with(&clock, Weekday::Mon).unwrap().to_string(), "9999-12-27");
        for weekday in [Weekday::Sat, Weekday::Sun] {
            assert!(matches!(
                Date::this_week_with(&clock, weekday),
                Err(InvalidValue::OutOfRange { field: Field::Year, value: 10_000, .. })
            ));
        }
    }

    #[test]
    fn weekday_factories_follow_zone() {
        // 2020-01-05 23:00 UTC is already Monday 2020-01-06 in Tokyo.
        let clock = clock_at(2020, 1, 5, 23);
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(Date::last_with(&clock, Weekday::Mon).unwrap().to_string(), "2019-12-30");
        assert_eq!(Date::last_in(&clock, &tokyo, Weekday::Mon).unwrap().to_string(), "2019-12-30");
        assert_eq!(Date::last_in(&clock, &tokyo, Weekday::Sun).unwrap().to_string(), "2020-01-05");
        assert_eq!(
            Date::this_week_in(&clock, &tokyo, Weekday::Sun).unwrap().to_string(),
            "2020-01-12"
        );
        assert_eq!(Date::this_week_with(&clock, Weekday::Sun).unwrap().to_string(), "2020-01-05");
    }

    #[test]
    fn clock_beyond_range_saturates() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(Date::today_with(&clock).to_string(), "9999-12-31");
    }

    // ---- predicates ----

    #[test]
    fn past_future_today() {
        let clock = clock_at(2020, 5, 10, 12);
        let yesterday = Date::yesterday_with(&clock);
        let today = Date::today_with(&clock);
        let tomorrow = Date::tomorrow_with(&clock);

        assert!(yesterday.is_past_with(&clock));
        assert!(!today.is_past_with(&clock));
        assert!(!tomorrow.is_past_with(&clock));

        assert!(!yesterday.is_future_with(&clock));
        assert!(!today.is_future_with(&clock));
        assert!(tomorrow.is_future_with(&clock));

        assert!(!yesterday.is_today_with(&clock));
        assert!(today.is_today_with(&clock));
        assert!(!tomorrow.is_today_with(&clock));
    }

    // ---- modify ----

    #[test]
    fn modify_returns_new_value() {
        let date = Date::from_values(2020, 12, 31).unwrap();
        let next = date.modify(Adjustment::Days(1)).unwrap();
        assert_eq!(date.to_string(), "2020-12-31");
        assert_eq!(next.to_string(), "2021-01-01");
        assert_ne!(date, next);
    }

    #[test]
    fn modify_floors_time_offsets() {
        let date = Date::from_values(2020, 1, 1).unwrap();
        assert_eq!(date.modify(Adjustment::Hours(25)).unwrap().to_string(), "2020-01-02");
        assert_eq!(date.modify(Adjustment::Hours(-1)).unwrap().to_string(), "2019-12-31");
    }

    #[test]
    fn modify_previous_weekday() {
        let date = Date::from_values(2020, 1, 6).unwrap();
        let previous = date.modify(Adjustment::Previous(Weekday::Mon)).unwrap();
        assert_eq!(previous.to_string(), "2019-12-30");
    }

    #[test]
    fn modify_out_of_range_fails() {
        let date = Date::from_values(9999, 12, 31).unwrap();
        assert!(matches!(
            date.modify(Adjustment::Days(1)),
            Err(InvalidValue::OutOfRange { field: Field::Year, .. })
        ));
        let first = Date::from_values(1, 1, 1).unwrap();
        assert!(first.modify(Adjustment::Previous(Weekday::Sun)).is_err());
    }

    // ---- accessors ----

    #[test]
    fn accessors() {
        let date = Date::from_values(2020, 11, 29).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2020, 11, 29));
        assert_eq!(date.day_of_week(), calendar::SUNDAY);
        assert_eq!(date.weekday(), Weekday::Sun);
        assert_eq!(Date::from_values(2020, 1, 12).unwrap().day_of_year(), 12);
    }

    #[test]
    fn week_numbers() {
        let week = |m, d| Date::from_values(2020, m, d).unwrap().week();
        assert_eq!(week(1, 1), 1);
        assert_eq!(week(1, 5), 1);
        assert_eq!(week(1, 6), 2);
        assert_eq!(week(12, 27), 52);
        assert_eq!(week(12, 28), 53);
        assert_eq!(week(12, 31), 53);
    }

    #[test]
    fn day_of_week_constants() {
        let expected = [
            calendar::MONDAY,
            calendar::TUESDAY,
            calendar::WEDNESDAY,
            calendar::THURSDAY,
            calendar::FRIDAY,
            calendar::SATURDAY,
            calendar::SUNDAY,
        ];
        for (i, want) in expected.into_iter().enumerate() {
            let date = Date::from_values(2020, 1, 6 + i as u32).unwrap();
            assert_eq!(date.day_of_week(), want);
        }
    }

    // ---- conversion ----

    #[test]
    fn timestamp_is_midnight_utc() {
        assert_eq!(Date::from_string("2020-01-12").unwrap().to_timestamp(), 1_578_787_200);
    }

    #[test]
    fn serde_uses_canonical_string() {
        let date = Date::from_string("2020-01-12").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2020-01-12\"");
        let back: Date = serde_json::from_str("\"2020-01-12\"").unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<Date>("\"2020-13-01\"").is_err());
        assert_eq!(date.to_json(), serde_json::json!("2020-01-12"));
    }

    #[test]
    fn ordering_is_chronological() {
        let a = Date::from_values(2019, 12, 31).unwrap();
        let b = Date::from_values(2020, 1, 1).unwrap();
        assert!(a < b);
    }

    // ---- validity predicate ----

    #[test]
    fn is_valid_accepts_canonical_values() {
        for year in ["0001", "1000", "2000", "9999"] {
            assert!(Date::is_valid(&format!("{year}-01-01")), "year {year}");
        }
        for month in 1..=12 {
            assert!(Date::is_valid(&format!("2020-{month:02}-01")), "month {month}");
        }
        for day in 1..=31 {
            assert!(Date::is_valid(&format!("2020-01-{day:02}")), "day {day}");
        }
    }

    #[test]
    fn is_valid_rejects_bad_values() {
        for bad in ["-1-01-01", "0-01-01", "10000-01-01", "2020--1-01", "2020-0-01", "2020-13-01"]
        {
            assert!(!Date::is_valid(bad), "{bad:?}");
        }
        for bad in ["2020-01--1", "2020-01-0", "2020-01-32", "2021-02-29"] {
            assert!(!Date::is_valid(bad), "{bad:?}");
        }
    }

    #[test]
    fn is_value_valid_rejects_non_strings() {
        for value in [serde_json::json!(true), serde_json::json!(1), serde_json::json!(1.2)] {
            assert!(!Date::is_value_valid(&value));
        }
        assert!(Date::is_value_valid(&serde_json::json!("2020-01-01")));
    }
}
