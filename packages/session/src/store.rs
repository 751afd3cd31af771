//! Correlation store: identity key to marker handle and incident.
//!
//! The store is the link between the two views. It is owned by the
//! session controller and scoped to one feed load: filled once during
//! initial rendering, read for every selection afterwards, and discarded
//! wholesale when the session is torn down.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use dispatch_radar_incident_models::{IdentityKey, Incident};

use crate::render::MarkerId;

/// One registered feature: the marker rendering it plus its normalized
/// record.
#[derive(Debug, Clone)]
pub struct CorrelationEntry {
    /// Handle of the map marker rendering this incident.
    pub marker: MarkerId,
    /// The normalized incident record.
    pub incident: Incident,
}

/// Write-once mapping from identity key to renderer handle and incident.
#[derive(Debug, Default)]
pub struct CorrelationStore {
    entries: HashMap<IdentityKey, CorrelationEntry>,
}

impl CorrelationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a feature under its identity key.
    ///
    /// The first registration per key wins. Identity keys are an accepted
    /// approximation (identical-looking duplicate events collide), so a
    /// duplicate registration is dropped with a debug log rather than
    /// mutating the existing entry.
    pub fn register(&mut self, key: IdentityKey, marker: MarkerId, incident: Incident) {
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                log::debug!(
                    "Duplicate identity key {}; keeping first registration",
                    occupied.key()
                );
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CorrelationEntry { marker, incident });
            }
        }
    }

    /// Looks up the entry registered under a key.
    #[must_use]
    pub fn resolve(&self, key: &IdentityKey) -> Option<&CorrelationEntry> {
        self.entries.get(key)
    }

    /// All registered marker handles, in arbitrary order.
    #[must_use]
    pub fn markers(&self) -> Vec<MarkerId> {
        self.entries.values().map(|entry| entry.marker).collect()
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
