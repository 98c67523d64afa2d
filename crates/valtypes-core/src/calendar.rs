//! # Calendar Arithmetic
//!
//! Pure functions over proleptic Gregorian `(year, month, day)` triples,
//! shared by [`Date`](crate::Date) and [`DateTimeUtc`](crate::DateTimeUtc).
//!
//! Components are assumed valid: callers validate before calling. Nothing
//! here panics for in-range input.
//!
//! ## ISO-8601 weeks
//!
//! Weeks run Monday..Sunday and week 1 is the week containing the year's
//! first Thursday. Late-December days can therefore belong to week 1 of the
//! next year, and early-January days to week 52 or 53 of the previous one.

/// ISO day number of Monday.
pub const MONDAY: u32 = 1;
/// ISO day number of Tuesday.
pub const TUESDAY: u32 = 2;
/// ISO day number of Wednesday.
pub const WEDNESDAY: u32 = 3;
/// ISO day number of Thursday.
pub const THURSDAY: u32 = 4;
/// ISO day number of Friday.
pub const FRIDAY: u32 = 5;
/// ISO day number of Saturday.
pub const SATURDAY: u32 = 6;
/// ISO day number of Sunday.
pub const SUNDAY: u32 = 7;

// Days before the first of each month in a common year.
const CUMULATIVE_DAYS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// 1-based ordinal day within the year (1..=366).
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let leap_shift = u32::from(month > 2 && is_leap_year(year));
    CUMULATIVE_DAYS[(month as usize).saturating_sub(1).min(11)] + day + leap_shift
}

/// ISO day of the week: Monday = 1 .. Sunday = 7.
pub fn day_of_week(year: i32, month: u32, day: u32) -> u32 {
    // Sakamoto's method, shifted so that Monday is 1.
    const T: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = i64::from(year) - i64::from(month < 3);
    let m = (month as usize).saturating_sub(1).min(11);
    let sunday_based = (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        + T[m]
        + i64::from(day))
    .rem_euclid(7);
    if sunday_based == 0 {
        SUNDAY
    } else {
        sunday_based as u32
    }
}

/// Number of ISO weeks in `year` (52 or 53).
///
/// A year has 53 weeks when it starts on a Thursday, or is a leap year
/// starting on a Wednesday.
pub fn weeks_in_year(year: i32) -> u32 {
    match day_of_week(year, 1, 1) {
        THURSDAY => 53,
        WEDNESDAY if is_leap_year(year) => 53,
        _ => 52,
    }
}

/// ISO-8601 week number (1..=53).
pub fn iso_week(year: i32, month: u32, day: u32) -> u32 {
    let ordinal = day_of_year(year, month, day) as i64;
    let weekday = day_of_week(year, month, day) as i64;
    let week = (ordinal - weekday + 10).div_euclid(7);

    if week < 1 {
        weeks_in_year(year - 1)
    } else if week > i64::from(weeks_in_year(year)) {
        1
    } else {
        week as u32
    }
}

/// ISO week-numbering year owning the given date.
///
/// Differs from the calendar year only in the first and last few days.
pub fn iso_week_year(year: i32, month: u32, day: u32) -> i32 {
    let week = iso_week(year, month, day);
    if month == 1 && week >= 52 {
        year - 1
    } else if month == 12 && week == 1 {
        year + 1
    } else {
        year
    }
}
