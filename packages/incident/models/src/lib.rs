#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Normalized incident record and presentation attributes.
//!
//! Both dispatch feeds normalize into [`Incident`], the single uniform
//! record shape shared by the map and list views. The identity key embedded
//! in each incident is the correlation handle between the two views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identity for one raw feature, shared by the map marker and the
/// list row that render it.
///
/// Format: `{source prefix}:{coordinates joined by comma}:{raw timestamp}`.
/// Two features produce the same key iff they share source, coordinates,
/// and raw timestamp string. Identical-looking duplicate events therefore
/// collide — an accepted approximation, not a unique ID.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Wraps an already-formatted key string.
    #[must_use]
    pub const fn new(key: String) -> Self {
        Self(key)
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IdentityKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for IdentityKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// A dispatch call normalized to the uniform record shape.
///
/// Derived from exactly one raw feature. All presentation attributes
/// (placeholder defaults, the severity color, the location repair) are
/// resolved at normalization time; renderers consume this record as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Correlation handle shared with the map marker for this call.
    pub key: IdentityKey,
    /// When the call was received. `None` when the raw timestamp is missing
    /// or unparseable.
    pub time: Option<DateTime<Utc>>,
    /// Call type description.
    pub title: String,
    /// Free-text dispatcher notes, if any.
    pub notes: Option<String>,
    /// Street address or intersection name. The upstream backslash export
    /// artifact is already repaired here.
    pub location: String,
    /// Neighborhood name, if the feed provides one.
    pub neighborhood: Option<String>,
    /// Resolved priority tier code.
    pub priority: String,
    /// Responding agency. Only present for service-sourced incidents.
    pub agency: Option<String>,
    /// CSS color for rendering, resolved from `priority`.
    pub color: String,
}

/// Header stats for one feed load: per-source counts plus the resolved
/// "last updated" timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSummary {
    /// Number of fire dispatch features in the snapshot.
    pub fire_count: usize,
    /// Number of police / service dispatch features in the snapshot.
    pub service_count: usize,
    /// Freshness timestamp across both feeds. `None` renders as a
    /// placeholder, never blocks rendering.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Severity color palette shared by both feeds.
///
/// Fire priorities use numeric tier codes and service priorities use
/// letter tier codes; the code sets are disjoint, so one lookup serves
/// both. Equivalent tiers render identically regardless of source.
pub mod palette {
    /// Most severe tier (fire "1", service "A").
    pub const CRITICAL: &str = "#d73027";
    /// Elevated tier (fire "2", service "B").
    pub const ELEVATED: &str = "#fc8d59";
    /// Moderate tier (fire "3", service "C").
    pub const MODERATE: &str = "#feb224";
    /// Neutral gray for unrecognized priority codes.
    pub const NEUTRAL: &str = "#9aa0a6";

    /// Resolves a priority tier code to its render color.
    ///
    /// Unknown codes map to [`NEUTRAL`] rather than failing.
    #[must_use]
    pub fn severity_color(code: &str) -> &'static str {
        match code {
            "1" | "A" => CRITICAL,
            "2" | "B" => ELEVATED,
            "3" | "C" => MODERATE,
            _ => NEUTRAL,
        }
    }
}
