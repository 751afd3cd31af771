//! Record normalization: raw property bags into uniform [`Incident`] records.
//!
//! Each output field resolves through a source-specific fallback chain
//! (first present value wins, else a literal default). Normalization never
//! fails: a property bag with every field absent still produces a complete
//! record.

use dispatch_radar_feed_models::{FireProperties, ServiceProperties};
use dispatch_radar_incident_models::{IdentityKey, Incident, palette};

use crate::parsing::parse_feed_timestamp;

/// Placeholder for missing short fields.
const DASH: &str = "—";
/// Placeholder for a missing address or intersection.
const LOCATION_FALLBACK: &str = "Location n/a";
/// Default title for fire calls without a call type.
const FIRE_TITLE_FALLBACK: &str = "Fire Call";
/// Default title for service calls without a call type.
const SERVICE_TITLE_FALLBACK: &str = "Service Call";

/// Normalizes a fire dispatch property bag.
///
/// The identity key is supplied by the caller (derived once per feature
/// by [`crate::key::identity_key`]).
#[must_use]
pub fn normalize_fire(key: IdentityKey, properties: &FireProperties) -> Incident {
    let priority = properties
        .priority
        .clone()
        .unwrap_or_else(|| DASH.to_string());
    let color = palette::severity_color(&priority).to_string();

    Incident {
        key,
        time: properties
            .received_dttm
            .as_deref()
            .and_then(parse_feed_timestamp),
        title: properties
            .call_type
            .clone()
            .unwrap_or_else(|| FIRE_TITLE_FALLBACK.to_string()),
        notes: properties.call_type_final_notes.clone(),
        location: repair_location(properties.address.as_deref().unwrap_or(LOCATION_FALLBACK)),
        neighborhood: properties
            .analysis_neighborhood
            .clone()
            .or_else(|| properties.neighborhood_district.clone()),
        priority,
        agency: None,
        color,
    }
}

/// Normalizes a police / service dispatch property bag.
///
/// Service calls prefer the final priority over the one assigned at call
/// intake, and the final call-type description over the bare code.
#[must_use]
pub fn normalize_service(key: IdentityKey, properties: &ServiceProperties) -> Incident {
    let priority = properties
        .priority_final
        .clone()
        .or_else(|| properties.priority_original.clone())
        .unwrap_or_else(|| DASH.to_string());
    let color = palette::severity_color(&priority).to_string();

    Incident {
        key,
        time: properties
            .received_datetime
            .as_deref()
            .and_then(parse_feed_timestamp),
        title: properties
            .call_type_final_desc
            .clone()
            .or_else(|| properties.call_type_final.clone())
            .unwrap_or_else(|| SERVICE_TITLE_FALLBACK.to_string()),
        notes: properties.call_type_final_notes.clone(),
        location: repair_location(
            properties
                .intersection_name
                .as_deref()
                .unwrap_or(LOCATION_FALLBACK),
        ),
        neighborhood: properties
            .analysis_neighborhood
            .clone()
            .or_else(|| properties.neighborhood_district.clone()),
        priority,
        agency: properties.agency.clone(),
        color,
    }
}

/// Repairs the upstream export artifact that ships `&` as a literal
/// backslash in location strings.
///
/// Applied exactly once, here at normalization. `Incident::location` is
/// clean from then on; render paths must not reapply the transform, since
/// a second pass would mangle locations that legitimately contain
/// ampersands.
#[must_use]
pub fn repair_location(raw: &str) -> String {
    raw.replace('\\', "&")
}
