//! # Check Subcommand
//!
//! `valtypes check <date|datetime> <VALUE>` prints `valid` and exits 0, or
//! prints the validation error and exits 1.

use anyhow::Result;
use clap::Args;

use valtypes_core::InvalidValue;

use crate::value::{TemporalValue, ValueKind};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Value type to validate against.
    pub kind: ValueKind,

    /// Canonical string to validate.
    pub value: String,
}

/// Validate `value` as `kind`.
pub fn check(kind: ValueKind, value: &str) -> Result<(), InvalidValue> {
    TemporalValue::parse(kind, value).map(|_| ())
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    match check(args.kind, &args.value) {
        Ok(()) => {
            println!("valid");
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(value = %args.value, error = %e, "check failed");
            println!("invalid: {e}");
            Ok(1)
        }
    }
}
