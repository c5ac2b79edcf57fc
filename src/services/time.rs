// src/services/time.rs

//! Timestamp and timezone normalization.
//!
//! Status page timestamps arrive as ISO-8601 strings with an explicit
//! offset, with or without fractional seconds. Parsing walks a fixed chain
//! of strategies and returns the first success. New formats are added by
//! appending to [`STRATEGIES`].

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;

use crate::error::{AppError, Result};
use crate::models::StatusSnapshot;

/// A single parse attempt.
type ParseStrategy = fn(&str) -> Option<DateTime<FixedOffset>>;

/// Strategies in priority order.
const STRATEGIES: &[(&str, ParseStrategy)] = &[
    ("rfc3339", parse_rfc3339),
    ("fixed-colon-offset", parse_fixed_colon_offset),
    ("fixed-offset", parse_fixed_offset),
];

fn parse_rfc3339(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

fn parse_fixed_colon_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%:z").ok()
}

fn parse_fixed_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z").ok()
}

/// Parse a status page timestamp into an offset-aware instant.
pub fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            strategy(trimmed).inspect(|_| log::trace!("Parsed '{trimmed}' with {name}"))
        })
        .ok_or_else(|| AppError::malformed_timestamp(raw))
}

/// Resolve the zone the snapshot declares.
pub fn resolve_timezone(snapshot: &StatusSnapshot) -> Result<Tz> {
    let name = snapshot
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::UnknownTimezone("status page declared no timezone".into()))?;

    name.parse::<Tz>()
        .map_err(|_| AppError::UnknownTimezone(name.to_string()))
}
