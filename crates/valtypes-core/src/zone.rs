//! # Zone Handling
//!
//! Every temporal value is normalized to UTC at construction. The canonical
//! UTC offset lives in a process-wide [`OnceLock`]: initialized once on first
//! access (safe under concurrent first access) and read-only afterwards.
//!
//! Only constant offsets are supported. There is no timezone database.

use std::sync::OnceLock;

use chrono::{FixedOffset, Offset, Utc};

use crate::error::{Field, InvalidValue};
use crate::canonical::fixed_digits;

static UTC: OnceLock<FixedOffset> = OnceLock::new();

/// The canonical UTC offset (`+00:00`).
pub fn utc() -> &'static FixedOffset {
    UTC.get_or_init(|| Utc.fix())
}

/// Returns whether `offset` is the UTC offset.
pub fn is_utc(offset: &FixedOffset) -> bool {
    offset.local_minus_utc() == 0
}

/// Parse a `±HH:MM` offset.
///
/// Hours must be in `00..=23` and minutes in `00..=59`.
///
/// # Errors
///
/// Returns [`InvalidValue::Malformed`] if the text is not `±HH:MM`, or
/// [`InvalidValue::OutOfRange`] if a component is out of range.
pub fn parse_offset(value: &str) -> Result<FixedOffset, InvalidValue> {
    let malformed = || InvalidValue::malformed("offset", value, "±HH:MM");
    let bytes = value.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return Err(malformed());
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(malformed()),
    };
    let hours = fixed_digits(&bytes[1..3]).ok_or_else(malformed)?;
    let minutes = fixed_digits(&bytes[4..6]).ok_or_else(malformed)?;
    if hours > 23 {
        return Err(InvalidValue::out_of_range(Field::Offset, hours, 0, 23));
    }
    if minutes > 59 {
        return Err(InvalidValue::out_of_range(Field::Offset, minutes, 0, 59));
    }

    let seconds = sign * (hours as i32 * 3600 + minutes as i32 * 60);
    FixedOffset::east_opt(seconds).ok_or_else(malformed)
}

/// Render an offset as `±HH:MM`.
pub fn format_offset(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let minutes = total.abs() / 60;
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}
