//! Offset point (cursor) encoding.
//!
//! Cursors are ISO-8601 "round-trip" timestamps: seven fractional digits and
//! an explicit UTC offset, e.g. `2024-01-01T00:00:00.0000000+00:00`.

use chrono::{DateTime, FixedOffset, Timelike};

use crate::core::{Result, SourceError};

/// Formats `dt` as a round-trip timestamp (100ns precision, `+hh:mm` offset).
pub fn format_round_trip(dt: &DateTime<FixedOffset>) -> String {
    let ticks = (dt.nanosecond() % 1_000_000_000) / 100;
    format!(
        "{}.{:07}{}",
        dt.format("%Y-%m-%dT%H:%M:%S"),
        ticks,
        dt.format("%:z")
    )
}

/// Parses a cursor back into a timestamp with offset.
///
/// Accepts any RFC 3339 timestamp, which covers the round-trip form.
pub fn parse_offset_point(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|e| SourceError::InvalidOffset {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
