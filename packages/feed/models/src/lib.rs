#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw dispatch feed data model.
//!
//! The upstream worker returns one combined payload with two `GeoJSON`-like
//! feature collections: fire dispatch calls and police/service dispatch
//! calls. The two collections share the feature envelope (point geometry +
//! property bag) but use entirely different property field names, so each
//! source gets its own typed property struct. Every property field is
//! optional; the feeds routinely omit or null fields, and downstream
//! normalization resolves the gaps.

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which raw feed schema a feature follows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceTag {
    /// Fire department dispatch feed
    Fire,
    /// Police / service call dispatch feed
    Service,
}

impl SourceTag {
    /// Single-character prefix used in identity keys.
    #[must_use]
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Fire => "F",
            Self::Service => "S",
        }
    }
}

/// Point geometry as delivered by the feeds: `coordinates: [lon, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Raw coordinate pair, longitude first.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl PointGeometry {
    /// Returns `(lon, lat)` when the coordinate pair is complete.
    #[must_use]
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        }
    }
}

/// A single raw feature: optional point geometry plus a source-specific
/// property bag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct Feature<P> {
    /// Point geometry. `None` for features the source ships without a
    /// location fix.
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
    /// Source-specific property bag. Missing or `null` bags decay to the
    /// all-`None` default.
    #[serde(default, deserialize_with = "null_default")]
    pub properties: P,
}

/// A raw feature collection (the `features` array of one feed).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct FeatureCollection<P> {
    /// Raw features in feed order.
    #[serde(default)]
    pub features: Vec<Feature<P>>,
}

impl<P> Default for FeatureCollection<P> {
    fn default() -> Self {
        Self {
            features: Vec::new(),
        }
    }
}

impl<P> FeatureCollection<P> {
    /// Number of features in this collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Property bag for fire dispatch features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FireProperties {
    /// Call type description (e.g., "Structure Fire").
    #[serde(default)]
    pub call_type: Option<String>,
    /// Free-text dispatcher notes for the call.
    #[serde(default)]
    pub call_type_final_notes: Option<String>,
    /// Final disposition of the call (e.g., "Fire").
    #[serde(default)]
    pub call_final_disposition: Option<String>,
    /// Block-level street address.
    #[serde(default)]
    pub address: Option<String>,
    /// When the call was received, as the feed's raw timestamp string.
    #[serde(default)]
    pub received_dttm: Option<String>,
    /// Data currency timestamp of the upstream export.
    #[serde(default)]
    pub data_as_of: Option<String>,
    /// Numeric priority tier code ("1" = most severe).
    #[serde(default)]
    pub priority: Option<String>,
    /// Analysis neighborhood name.
    #[serde(default)]
    pub analysis_neighborhood: Option<String>,
    /// Coarser neighborhood district name.
    #[serde(default)]
    pub neighborhood_district: Option<String>,
}

/// Property bag for police / service dispatch features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceProperties {
    /// Final call type description (e.g., "AUDIBLE ALARM").
    #[serde(default)]
    pub call_type_final_desc: Option<String>,
    /// Final call type code.
    #[serde(default)]
    pub call_type_final: Option<String>,
    /// Free-text dispatcher notes for the call.
    #[serde(default)]
    pub call_type_final_notes: Option<String>,
    /// Intersection name (service calls are located by intersection, not
    /// street address).
    #[serde(default)]
    pub intersection_name: Option<String>,
    /// When the call was received, as the feed's raw timestamp string.
    #[serde(default)]
    pub received_datetime: Option<String>,
    /// Data currency timestamp of the upstream export.
    #[serde(default)]
    pub data_as_of: Option<String>,
    /// Final priority tier code ("A" = most severe).
    #[serde(default)]
    pub priority_final: Option<String>,
    /// Priority tier assigned at call intake.
    #[serde(default)]
    pub priority_original: Option<String>,
    /// Responding agency.
    #[serde(default)]
    pub agency: Option<String>,
    /// Analysis neighborhood name.
    #[serde(default)]
    pub analysis_neighborhood: Option<String>,
    /// Coarser neighborhood district name.
    #[serde(default)]
    pub neighborhood_district: Option<String>,
}

/// Schema-level accessors shared by both property bags.
///
/// Lets keying and freshness logic stay generic over the two record shapes
/// without duck-typed property lookups.
pub trait FeedSchema {
    /// Which raw schema this property bag follows.
    const SOURCE: SourceTag;

    /// Raw received-time string, if present.
    fn received_raw(&self) -> Option<&str>;

    /// Raw data-currency string, if present.
    fn data_as_of_raw(&self) -> Option<&str>;

    /// First non-empty timestamp-like value, used for identity keying.
    ///
    /// The raw string is used as-is; no format normalization happens
    /// before keying.
    fn key_timestamp(&self) -> Option<&str> {
        self.received_raw()
            .filter(|s| !s.is_empty())
            .or_else(|| self.data_as_of_raw().filter(|s| !s.is_empty()))
    }
}

impl FeedSchema for FireProperties {
    const SOURCE: SourceTag = SourceTag::Fire;

    fn received_raw(&self) -> Option<&str> {
        self.received_dttm.as_deref()
    }

    fn data_as_of_raw(&self) -> Option<&str> {
        self.data_as_of.as_deref()
    }
}

impl FeedSchema for ServiceProperties {
    const SOURCE: SourceTag = SourceTag::Service;

    fn received_raw(&self) -> Option<&str> {
        self.received_datetime.as_deref()
    }

    fn data_as_of_raw(&self) -> Option<&str> {
        self.data_as_of.as_deref()
    }
}

/// A raw fire dispatch feature.
pub type FireFeature = Feature<FireProperties>;

/// A raw service dispatch feature.
pub type ServiceFeature = Feature<ServiceProperties>;

/// The combined payload returned by the feed endpoint.
///
/// Both collections arrive in one response, so there is no partial
/// availability to model — a payload missing either key is a parse error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedSnapshot {
    /// Fire dispatch feature collection.
    pub fire: FeatureCollection<FireProperties>,
    /// Police / service dispatch feature collection.
    pub service: FeatureCollection<ServiceProperties>,
}

impl FeedSnapshot {
    /// Number of fire features in the snapshot.
    #[must_use]
    pub fn fire_count(&self) -> usize {
        self.fire.len()
    }

    /// Number of service features in the snapshot.
    #[must_use]
    pub fn service_count(&self) -> usize {
        self.service.len()
    }
}

/// Deserializes a value that may be `null` into its `Default`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
