//! Freshness resolution across both feeds.
//!
//! The merged view carries a single "last updated" timestamp. The export
//! currency field (`data_as_of`) is authoritative when present; received
//! times are only a fallback for feeds that omit it.

use chrono::{DateTime, Utc};
use dispatch_radar_feed_models::{Feature, FeedSchema, FireFeature, ServiceFeature};

use crate::parsing::parse_feed_timestamp;

/// Resolves the single "as of" timestamp for the whole merged view.
///
/// Strict priority order — the first step with any parseable value wins,
/// even when a later step holds a newer timestamp:
///
/// 1. latest `data_as_of` across fire features
/// 2. latest `data_as_of` across service features
/// 3. latest received time across fire features
/// 4. latest received time across service features
///
/// Missing and unparseable values are skipped within each step. `None`
/// (all four steps empty) renders as a placeholder downstream and never
/// blocks rendering.
#[must_use]
pub fn resolve_last_updated(
    fire: &[FireFeature],
    service: &[ServiceFeature],
) -> Option<DateTime<Utc>> {
    latest_timestamp(fire, FeedSchema::data_as_of_raw)
        .or_else(|| latest_timestamp(service, FeedSchema::data_as_of_raw))
        .or_else(|| latest_timestamp(fire, FeedSchema::received_raw))
        .or_else(|| latest_timestamp(service, FeedSchema::received_raw))
}

/// Latest successfully parsed value of one timestamp field across a
/// feature slice.
fn latest_timestamp<P: FeedSchema>(
    features: &[Feature<P>],
    field: impl Fn(&P) -> Option<&str>,
) -> Option<DateTime<Utc>> {
    features
        .iter()
        .filter_map(|feature| field(&feature.properties))
        .filter_map(parse_feed_timestamp)
        .max()
}
