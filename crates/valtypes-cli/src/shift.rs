//! # Shift Subcommand
//!
//! `valtypes shift <date|datetime> <VALUE> <ADJUSTMENT>...` applies each
//! adjustment in order and prints the canonical result.
//!
//! ```bash
//! valtypes shift date 2020-01-31 "+1 month"          # 2020-02-29
//! valtypes shift datetime 2020-01-12T11:22:33+00:00 "-90 min" "next monday"
//! ```

use anyhow::{Context, Result};
use clap::Args;

use valtypes_core::Adjustment;

use crate::value::{TemporalValue, ValueKind};

/// Arguments for the `shift` subcommand.
#[derive(Args, Debug)]
pub struct ShiftArgs {
    /// Value type to parse as.
    pub kind: ValueKind,

    /// Canonical starting value.
    pub value: String,

    /// Offsets such as "+1 day", "-2 weeks" or "previous friday".
    #[arg(required = true, allow_hyphen_values = true)]
    pub adjustments: Vec<String>,
}

/// Parse `value` and apply `adjustments` left to right.
pub fn shift(kind: ValueKind, value: &str, adjustments: &[String]) -> Result<TemporalValue> {
    let start =
        TemporalValue::parse(kind, value).with_context(|| format!("cannot shift {value:?}"))?;
    adjustments.iter().try_fold(start, |current, text| -> Result<TemporalValue> {
        let adjustment: Adjustment = text.parse()?;
        let next = current
            .modify(adjustment)
            .with_context(|| format!("cannot apply {adjustment} to {current}"))?;
        tracing::debug!(from = %current, to = %next, %adjustment, "applied adjustment");
        Ok(next)
    })
}

/// Execute the shift subcommand.
pub fn run_shift(args: &ShiftArgs) -> Result<u8> {
    let result = shift(args.kind, &args.value, &args.adjustments)?;
    println!("{result}");
    Ok(0)
}
