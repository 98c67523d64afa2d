//! # valtypes-core: Temporal Value Objects
//!
//! Immutable, self-validating wrappers for calendar dates and UTC instants.
//! A value that exists is valid: every constructor range-checks its input
//! and fails with [`InvalidValue`], and no method mutates in place.
//!
//! ## Key Design Principles
//!
//! 1. **Strict construction.** Out-of-range components and impossible days
//!    (`2021-02-30`) are rejected, never rolled over.
//!
//! 2. **UTC-only instants.** [`DateTimeUtc`] converts whatever offset it is
//!    given into UTC at construction. Equality and ordering are on the
//!    absolute instant.
//!
//! 3. **Injectable time.** Everything that depends on "now" reads it through
//!    a [`Clock`]. The plain factories use [`SystemClock`]; the `_with`
//!    variants take any clock, [`FixedClock`] in tests.
//!
//! 4. **One canonical string.** `Display`, `FromStr` and serde all use
//!    `YYYY-MM-DD` for [`Date`] and `YYYY-MM-DDTHH:MM:SS+00:00` for
//!    [`DateTimeUtc`].
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Supported years are 1..=9999.

pub mod calendar;
mod canonical;
pub mod clock;
pub mod date;
pub mod datetime;
pub mod error;
mod pattern;
pub mod relative;
pub mod value;
pub mod zone;

// Re-export primary types for ergonomic imports.
pub use chrono::{FixedOffset, Weekday};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{Date, MAX_YEAR, MIN_YEAR};
pub use datetime::DateTimeUtc;
pub use error::{Field, InvalidValue};
pub use relative::Adjustment;
pub use value::ValueObject;
pub use zone::{format_offset, parse_offset, utc};
