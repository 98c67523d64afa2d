//! # CLI Configuration
//!
//! An optional YAML file supplies defaults for the zone used by
//! "today"-style commands and for pinning the clock:
//!
//! ```yaml
//! zone: "+02:00"
//! now: "2020-01-06T09:00:00+00:00"
//! ```
//!
//! Command-line flags override file values. Resolution into [`Settings`]
//! parses both through the core value types, so a bad zone or instant is
//! reported before any command runs.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use valtypes_core::{parse_offset, utc, Clock, DateTimeUtc, FixedClock, FixedOffset, SystemClock};

/// Raw configuration, as read from YAML or flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Zone offset (`±HH:MM`) for calendar-day resolution.
    #[serde(default)]
    pub zone: Option<String>,
    /// Canonical datetime that pins the clock.
    #[serde(default)]
    pub now: Option<String>,
}

impl CliConfig {
    /// Parse a YAML document. An empty document is the default config.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("invalid valtypes configuration")
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Overlay command-line flags; a flag that is set wins.
    pub fn with_overrides(self, zone: Option<String>, now: Option<String>) -> Self {
        Self {
            zone: zone.or(self.zone),
            now: now.or(self.now),
        }
    }

    /// Validate and turn the raw strings into runtime settings.
    pub fn resolve(&self) -> Result<Settings> {
        let zone = match &self.zone {
            Some(text) => parse_offset(text).with_context(|| format!("invalid zone {text:?}"))?,
            None => *utc(),
        };
        let clock: Box<dyn Clock> = match &self.now {
            Some(text) => {
                let pinned = DateTimeUtc::from_string(text)
                    .with_context(|| format!("invalid pinned clock {text:?}"))?;
                tracing::info!(now = %pinned, "clock pinned");
                Box::new(FixedClock::new(*pinned.as_datetime()))
            }
            None => Box::new(SystemClock),
        };
        Ok(Settings { zone, clock })
    }
}

/// Resolved runtime settings shared by every subcommand.
pub struct Settings {
    /// Zone whose calendar day "today" refers to.
    pub zone: FixedOffset,
    /// Source of the current instant.
    pub clock: Box<dyn Clock>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zone: *utc(),
            clock: Box::new(SystemClock),
        }
    }
}
