//! # Relative Dates
//!
//! Closed-form calendar offsets used by `modify`, and the weekday resolver
//! behind `this_week` / `last`.
//!
//! Offsets are plain data ([`Adjustment`]) rather than free text. A small,
//! fixed grammar (`"+1 day"`, `"-2 weeks"`, `"previous monday"`) parses into
//! them through [`FromStr`] for callers that receive offsets as strings.

use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};

use crate::calendar;
use crate::error::{Field, InvalidValue};

/// A calendar offset applied by `modify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjustment {
    /// Add (or subtract, when negative) whole days.
    Days(i64),
    /// Add whole weeks.
    Weeks(i64),
    /// Add calendar months, clamping to the last day of the target month.
    Months(i32),
    /// Add calendar years, clamping Feb 29 to Feb 28 in common years.
    Years(i32),
    /// Add hours.
    Hours(i64),
    /// Add minutes.
    Minutes(i64),
    /// Add seconds.
    Seconds(i64),
    /// Nearest earlier date on this weekday, at 00:00.
    Previous(Weekday),
    /// Nearest later date on this weekday, at 00:00.
    Next(Weekday),
}

impl Adjustment {
    fn field(&self) -> Field {
        match self {
            Self::Days(_) | Self::Weeks(_) | Self::Previous(_) | Self::Next(_) => Field::Day,
            Self::Months(_) => Field::Month,
            Self::Years(_) => Field::Year,
            Self::Hours(_) => Field::Hour,
            Self::Minutes(_) => Field::Minute,
            Self::Seconds(_) => Field::Second,
        }
    }

    /// Apply the offset to a naive datetime.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValue::Overflow`] when the result is not
    /// representable. The caller still owns the year-range check.
    pub(crate) fn apply(&self, dt: NaiveDateTime) -> Result<NaiveDateTime, InvalidValue> {
        let result = match *self {
            Self::Days(n) => TimeDelta::try_days(n).and_then(|d| dt.checked_add_signed(d)),
            Self::Weeks(n) => TimeDelta::try_weeks(n).and_then(|d| dt.checked_add_signed(d)),
            Self::Hours(n) => TimeDelta::try_hours(n).and_then(|d| dt.checked_add_signed(d)),
            Self::Minutes(n) => TimeDelta::try_minutes(n).and_then(|d| dt.checked_add_signed(d)),
            Self::Seconds(n) => TimeDelta::try_seconds(n).and_then(|d| dt.checked_add_signed(d)),
            Self::Months(n) => add_months(dt, i64::from(n)),
            Self::Years(n) => add_months(dt, i64::from(n) * 12),
            Self::Previous(weekday) => {
                previous_weekday(dt.date(), weekday).map(|d| d.and_time(NaiveTime::MIN))
            }
            Self::Next(weekday) => {
                next_weekday(dt.date(), weekday).map(|d| d.and_time(NaiveTime::MIN))
            }
        };
        result.ok_or_else(|| InvalidValue::Overflow {
            field: self.field(),
            operation: self.to_string(),
        })
    }
}

fn add_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(magnitude)
    } else {
        dt.checked_sub_months(magnitude)
    }
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days(n) => write!(f, "{n:+} day"),
            Self::Weeks(n) => write!(f, "{n:+} week"),
            Self::Months(n) => write!(f, "{n:+} month"),
            Self::Years(n) => write!(f, "{n:+} year"),
            Self::Hours(n) => write!(f, "{n:+} hour"),
            Self::Minutes(n) => write!(f, "{n:+} minute"),
            Self::Seconds(n) => write!(f, "{n:+} second"),
            Self::Previous(w) => write!(f, "previous {}", weekday_name(*w)),
            Self::Next(w) => write!(f, "next {}", weekday_name(*w)),
        }
    }
}

const ADJUSTMENT_GRAMMAR: &str =
    "\"[+|-]N <second|minute|hour|day|week|fortnight|month|year>[s]\" or \"previous|last|next <weekday>\"";

impl FromStr for Adjustment {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidValue::malformed("adjustment", s, ADJUSTMENT_GRAMMAR);
        let lowered = s.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let (Some(head), Some(tail), None) = (words.next(), words.next(), words.next()) else {
            return Err(malformed());
        };

        match head {
            "previous" | "last" => {
                return tail.parse::<Weekday>().map(Self::Previous).map_err(|_| malformed())
            }
            "next" => return tail.parse::<Weekday>().map(Self::Next).map_err(|_| malformed()),
            _ => {}
        }

        let (negative, digits) = match head.as_bytes().first() {
            Some(b'+') => (false, &head[1..]),
            Some(b'-') => (true, &head[1..]),
            _ => (false, head),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let magnitude: i64 = digits.parse().map_err(|_| malformed())?;
        let amount = if negative { -magnitude } else { magnitude };
        let unit = tail.strip_suffix('s').unwrap_or(tail);
        let narrow = |n: i64| i32::try_from(n).map_err(|_| malformed());

        Ok(match unit {
            "sec" | "second" => Self::Seconds(amount),
            "min" | "minute" => Self::Minutes(amount),
            "hour" => Self::Hours(amount),
            "day" => Self::Days(amount),
            "week" => Self::Weeks(amount),
            "fortnight" => Self::Days(amount.checked_mul(14).ok_or_else(malformed)?),
            "month" => Self::Months(narrow(amount)?),
            "year" => Self::Years(narrow(amount)?),
            _ => return Err(malformed()),
        })
    }
}

/// Lowercase English name of `weekday`, as accepted by the adjustment
/// grammar.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn iso_day(date: NaiveDate) -> i64 {
    i64::from(calendar::day_of_week(date.year(), date.month(), date.day()))
}

/// Nearest date strictly before `date` that falls on `weekday`.
pub fn previous_weekday(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let target = i64::from(weekday.number_from_monday());
    let back = match (iso_day(date) - target).rem_euclid(7) {
        0 => 7,
        n => n,
    };
    date.checked_sub_days(Days::new(back as u64))
}

/// Nearest date strictly after `date` that falls on `weekday`.
pub fn next_weekday(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let target = i64::from(weekday.number_from_monday());
    let ahead = match (target - iso_day(date)).rem_euclid(7) {
        0 => 7,
        n => n,
    };
    date.checked_add_days(Days::new(ahead as u64))
}

/// The date of `weekday` inside the Monday..Sunday week containing `date`.
pub fn weekday_this_week(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let delta = i64::from(weekday.number_from_monday()) - iso_day(date);
    if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ---- resolver ----

    #[test]
    fn previous_weekday_is_strictly_before() {
        // 2020-01-06 is a Monday.
        assert_eq!(previous_weekday(ymd(2020, 1, 6), Weekday::Mon), Some(ymd(2019, 12, 30)));
        assert_eq!(previous_weekday(ymd(2020, 1, 7), Weekday::Mon), Some(ymd(2020, 1, 6)));
        assert_eq!(previous_weekday(ymd(2020, 1, 6), Weekday::Sun), Some(ymd(2020, 1, 5)));
        assert_eq!(previous_weekday(ymd(2020, 1, 6), Weekday::Tue), Some(ymd(2019, 12, 31)));
    }

    #[test]
    fn next_weekday_is_strictly_after() {
        assert_eq!(next_weekday(ymd(2020, 1, 6), Weekday::Mon), Some(ymd(2020, 1, 13)));
        assert_eq!(next_weekday(ymd(2020, 1, 6), Weekday::Fri), Some(ymd(2020, 1, 10)));
        assert_eq!(next_weekday(ymd(2020, 1, 12), Weekday::Mon), Some(ymd(2020, 1, 13)));
    }

    #[test]
    fn weekday_this_week_spans_monday_to_sunday() {
        // Wednesday 2020-01-08.
        let wednesday = ymd(2020, 1, 8);
        assert_eq!(weekday_this_week(wednesday, Weekday::Mon), Some(ymd(2020, 1, 6)));
        assert_eq!(weekday_this_week(wednesday, Weekday::Wed), Some(wednesday));
        assert_eq!(weekday_this_week(wednesday, Weekday::Sun), Some(ymd(2020, 1, 12)));
        // On a Sunday, Monday is six days back.
        assert_eq!(weekday_this_week(ymd(2020, 1, 12), Weekday::Mon), Some(ymd(2020, 1, 6)));
    }

    // ---- apply ----

    #[test]
    fn apply_days_keeps_time_of_day() {
        let dt = ymd(2020, 11, 12).and_hms_micro_opt(11, 22, 33, 123_456).unwrap();
        let shifted = Adjustment::Days(1).apply(dt).unwrap();
        assert_eq!(shifted, ymd(2020, 11, 13).and_hms_micro_opt(11, 22, 33, 123_456).unwrap());
    }

    #[test]
    fn apply_months_clamps_to_month_end() {
        let dt = ymd(2020, 1, 31).and_time(NaiveTime::MIN);
        assert_eq!(Adjustment::Months(1).apply(dt).unwrap().date(), ymd(2020, 2, 29));
        assert_eq!(Adjustment::Months(-2).apply(dt).unwrap().date(), ymd(2019, 11, 30));
        let leap = ymd(2020, 2, 29).and_time(NaiveTime::MIN);
        assert_eq!(Adjustment::Years(1).apply(leap).unwrap().date(), ymd(2021, 2, 28));
    }

    #[test]
    fn apply_previous_resets_time() {
        let dt = ymd(2020, 1, 8).and_hms_opt(15, 0, 0).unwrap();
        assert_eq!(
            Adjustment::Previous(Weekday::Mon).apply(dt).unwrap(),
            ymd(2020, 1, 6).and_time(NaiveTime::MIN)
        );
    }

    #[test]
    fn apply_overflow_is_an_error() {
        let dt = ymd(2020, 1, 1).and_time(NaiveTime::MIN);
        assert!(matches!(
            Adjustment::Days(i64::MAX).apply(dt),
            Err(InvalidValue::Overflow { field: Field::Day, .. })
        ));
    }

    // ---- grammar ----

    #[test]
    fn parses_signed_units() {
        assert_eq!("+1 day".parse::<Adjustment>().unwrap(), Adjustment::Days(1));
        assert_eq!("-2 weeks".parse::<Adjustment>().unwrap(), Adjustment::Weeks(-2));
        assert_eq!("3 months".parse::<Adjustment>().unwrap(), Adjustment::Months(3));
        assert_eq!("+1 Year".parse::<Adjustment>().unwrap(), Adjustment::Years(1));
        assert_eq!("  +90 min ".parse::<Adjustment>().unwrap(), Adjustment::Minutes(90));
        assert_eq!("1 fortnight".parse::<Adjustment>().unwrap(), Adjustment::Days(14));
        assert_eq!("-5 secs".parse::<Adjustment>().unwrap(), Adjustment::Seconds(-5));
    }

    #[test]
    fn parses_weekday_phrases() {
        assert_eq!(
            "previous Monday".parse::<Adjustment>().unwrap(),
            Adjustment::Previous(Weekday::Mon)
        );
        assert_eq!("last fri".parse::<Adjustment>().unwrap(), Adjustment::Previous(Weekday::Fri));
        assert_eq!("next sunday".parse::<Adjustment>().unwrap(), Adjustment::Next(Weekday::Sun));
    }

    #[test]
    fn rejects_unknown_phrases() {
        for bad in [
            "",
            "tomorrow",
            "+1",
            "+1 dayz",
            "one day",
            "previous funday",
            "+1 day extra",
            "++1 day",
            "+-1 day",
            "--1 day",
            "- 1 day",
            "+ day",
        ] {
            assert!(bad.parse::<Adjustment>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn single_sign_is_accepted() {
        assert_eq!("+1 day".parse::<Adjustment>().unwrap(), Adjustment::Days(1));
        assert_eq!("-1 day".parse::<Adjustment>().unwrap(), Adjustment::Days(-1));
        assert_eq!("1 day".parse::<Adjustment>().unwrap(), Adjustment::Days(1));
    }

    #[test]
    fn weekday_names_are_lowercase() {
        assert_eq!(weekday_name(Weekday::Wed), "wednesday");
        assert_eq!(weekday_name(Weekday::Sun), "sunday");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for adj in [
            Adjustment::Days(-3),
            Adjustment::Months(2),
            Adjustment::Previous(Weekday::Thu),
            Adjustment::Next(Weekday::Sat),
        ] {
            assert_eq!(adj.to_string().parse::<Adjustment>().unwrap(), adj);
        }
    }
}
