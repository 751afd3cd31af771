//! Merge & order engine.
//!
//! Combines the two normalized incident sequences into the single list
//! both views render from.

use chrono::DateTime;
use dispatch_radar_incident_models::Incident;

/// Merges both normalized sequences into one list ordered by recency.
///
/// Stable descending sort on received time. Incidents without a parsed
/// time sort as the Unix epoch, sinking to the bottom while keeping their
/// relative input order. No cross-source deduplication happens here;
/// fire and service incidents are always distinct records, regardless of
/// any coincidental key similarity.
#[must_use]
pub fn merge_and_order(fire: Vec<Incident>, service: Vec<Incident>) -> Vec<Incident> {
    let mut merged = fire;
    merged.extend(service);
    merged.sort_by_key(|incident| std::cmp::Reverse(incident.time.unwrap_or(DateTime::UNIX_EPOCH)));
    merged
}
