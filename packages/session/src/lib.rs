#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Session layer: one feed load rendered into two synchronized views.
//!
//! The map and list renderers are external collaborators reached through
//! the [`render`] contracts, so the whole layer runs headless in tests.
//! The [`store::CorrelationStore`] links the two views through identity
//! keys, and [`sync`] propagates selections so clicking an entry in
//! either view highlights its counterpart in the other.

pub mod controller;
pub mod render;
pub mod store;
pub mod sync;

pub use controller::{RadarSession, SessionError};
pub use render::{Bounds, ListView, MapView, MarkerId};
pub use store::{CorrelationEntry, CorrelationStore};
pub use sync::{FOCUS_ZOOM, SelectionOrigin, SelectionRequest, apply_selection};
