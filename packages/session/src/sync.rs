//! Selection synchronization between the two views.
//!
//! A click in either view becomes an explicit [`SelectionRequest`] that
//! the synchronizer resolves through the correlation store and turns into
//! commands against both renderer contracts. The core stays decoupled
//! from any rendering technology and runs headless in tests.

use dispatch_radar_incident_models::IdentityKey;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::render::{ListView, MapView};
use crate::store::CorrelationStore;

/// Zoom level used when focusing the map on a selected marker.
pub const FOCUS_ZOOM: u8 = 15;

/// Which view originated a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionOrigin {
    /// The user clicked a map marker.
    Map,
    /// The user clicked a list row.
    List,
}

/// A request to select one incident, from either view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Identity key of the incident to select.
    pub key: IdentityKey,
    /// The view the selection came from.
    pub origin: SelectionOrigin,
}

impl SelectionRequest {
    /// Builds a selection request.
    pub fn new(key: impl Into<IdentityKey>, origin: SelectionOrigin) -> Self {
        Self {
            key: key.into(),
            origin,
        }
    }
}

/// Applies a selection to both views.
///
/// Regardless of origin, the end state is canonical: the map focused on
/// the selected marker with its detail open, and exactly one list row
/// highlighted (any prior highlight cleared first). A request for an
/// unregistered key is a warn-and-ignore no-op. There is no queued or
/// cancellable selection state — a new selection unconditionally
/// replaces the previous one.
pub fn apply_selection<M: MapView, L: ListView>(
    store: &CorrelationStore,
    map: &mut M,
    list: &mut L,
    request: &SelectionRequest,
) {
    let Some(entry) = store.resolve(&request.key) else {
        log::warn!(
            "Selection from {} for unknown key {}",
            request.origin,
            request.key
        );
        return;
    };

    log::debug!("Selection from {}: {}", request.origin, request.key);

    map.focus(entry.marker, FOCUS_ZOOM);
    map.open_detail(entry.marker);
    list.clear_highlight();
    list.highlight_row(&request.key);
}
