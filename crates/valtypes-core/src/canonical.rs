//! # Canonical String Scanning
//!
//! Byte-level helpers shared by the fixed-width canonical parsers
//! (`YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS±HH:MM` and `±HH:MM`). They check
//! shape only; range checks belong to the value types.

/// Read an all-digit byte slice as an unsigned number.
///
/// Returns `None` for an empty slice or any non-digit byte.
pub(crate) fn fixed_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() {
        return None;
    }
    bytes.iter().try_fold(0u32, |acc, b| {
        b.is_ascii_digit()
            .then(|| acc * 10 + u32::from(b - b'0'))
    })
}

/// Split a canonical `YYYY-MM-DD` prefix into components, shape only.
pub(crate) fn split_canonical_date(bytes: &[u8]) -> Option<(i32, u32, u32)> {
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year = fixed_digits(&bytes[0..4])?;
    let month = fixed_digits(&bytes[5..7])?;
    let day = fixed_digits(&bytes[8..10])?;
    Some((year as i32, month, day))
}
