//! Timestamp parsing for raw feed property strings.
//!
//! The feeds are not consistent about timestamp formats: Socrata-style
//! naive datetimes with fractional seconds, RFC 3339 with offsets, and
//! minute-precision `Z`-suffixed values all appear.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Naive formats seen in the feeds, tried in order after RFC 3339.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses a raw feed timestamp string.
///
/// Naive values are interpreted as UTC. Returns `None` for anything
/// unparseable — a malformed timestamp is equivalent to an absent one
/// downstream, never an error.
#[must_use]
pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    let bare = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(bare, format) {
            return Some(naive.and_utc());
        }
    }

    None
}
