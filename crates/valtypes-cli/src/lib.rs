//! # valtypes-cli: Command-Line Front End
//!
//! Thin wrapper over `valtypes-core`. Each subcommand parses its input
//! through the core value types and prints the canonical result, so the
//! CLI never accepts a value the library would reject.
//!
//! ## Subcommands
//!
//! - `check`: validate a date or datetime string.
//! - `inspect`: print every derived field as JSON.
//! - `shift`: apply adjustments such as `"+1 month"` or `"next friday"`.
//! - `now`: print now, today, yesterday or tomorrow.
//! - `weekday`: resolve `last <weekday>` or `this-week <weekday>`.
//!
//! ```bash
//! valtypes --now 2020-01-06T09:00:00+00:00 weekday last monday
//! valtypes shift date 2020-01-31 "+1 month"
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the `*Args` structs; handlers are plain
//!   functions that tests call directly.
//! - No temporal logic here beyond dispatch.

pub mod check;
pub mod config;
pub mod inspect;
pub mod now;
pub mod shift;
pub mod value;
pub mod weekday;
