//! Identity key derivation.
//!
//! The key correlates the map marker and the list row rendered for the
//! same raw feature. It is derived from the feature alone, so both views
//! (and any test harness) compute identical keys without coordination.

use dispatch_radar_feed_models::{Feature, FeedSchema};
use dispatch_radar_incident_models::IdentityKey;

/// Derives the stable identity key for a raw feature.
///
/// Pure function of the feature: source prefix, the coordinate pair
/// joined by comma (empty when geometry is absent), and the source's
/// first non-empty timestamp-like value used raw. A feature with neither
/// geometry nor timestamp keys on the prefix alone and is likely to
/// collide with siblings; that is accepted, not an error.
#[must_use]
pub fn identity_key<P: FeedSchema>(feature: &Feature<P>) -> IdentityKey {
    let coords = feature
        .geometry
        .as_ref()
        .map_or_else(String::new, |geometry| {
            geometry
                .coordinates
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        });
    let when = feature.properties.key_timestamp().unwrap_or_default();

    IdentityKey::new(format!("{}:{coords}:{when}", P::SOURCE.key_prefix()))
}
