#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feed correlation logic.
//!
//! Derives stable identity keys for raw features, normalizes both feed
//! shapes into the uniform [`Incident`](dispatch_radar_incident_models::Incident)
//! record, orders the merged set by recency, and resolves the combined
//! freshness timestamp. Everything here is a pure synchronous function,
//! total over malformed input — missing and unparseable fields resolve to
//! safe defaults instead of errors.

pub mod freshness;
pub mod key;
pub mod merge;
pub mod normalize;
pub mod parsing;

pub use freshness::resolve_last_updated;
pub use key::identity_key;
pub use merge::merge_and_order;
pub use normalize::{normalize_fire, normalize_service};
pub use parsing::parse_feed_timestamp;
