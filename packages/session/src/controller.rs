//! Session controller: one feed load wired into both views.
//!
//! Owns every piece of per-load state: the correlation store, the two
//! renderer handles, the merged incident list, and the header summary.
//! Nothing here is a module-level singleton; dropping the session drops
//! the whole load.

use dispatch_radar_feed::{FeedError, FeedLoader};
use dispatch_radar_feed_models::{Feature, FeedSchema, FeedSnapshot, PointGeometry};
use dispatch_radar_incident::{
    identity_key, merge_and_order, normalize_fire, normalize_service, resolve_last_updated,
};
use dispatch_radar_incident_models::{FeedSummary, IdentityKey, Incident};

use crate::render::{ListView, MapView};
use crate::store::CorrelationStore;
use crate::sync::{SelectionRequest, apply_selection};

/// Errors fatal to session startup.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The single feed fetch failed. No partial UI is constructed.
    #[error("Feed load failed: {0}")]
    Feed(#[from] FeedError),
}

/// One visualization session: a single feed load rendered into a map
/// view and a list view, kept in sync through the correlation store.
pub struct RadarSession<M: MapView, L: ListView> {
    store: CorrelationStore,
    map: M,
    list: L,
    incidents: Vec<Incident>,
    summary: FeedSummary,
}

impl<M: MapView, L: ListView> RadarSession<M, L> {
    /// Fetches the combined snapshot and builds the session.
    ///
    /// The fetch is the only suspending operation of the whole session;
    /// everything after it runs synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Feed`] when the fetch or payload parse
    /// fails. No view state is constructed in that case; surfacing a
    /// visible error state is the caller's responsibility.
    pub async fn start<F: FeedLoader>(loader: &F, map: M, list: L) -> Result<Self, SessionError> {
        let snapshot = loader.fetch_snapshot().await.inspect_err(|e| {
            log::error!("Feed load failed: {e}");
        })?;
        Ok(Self::from_snapshot(snapshot, map, list))
    }

    /// Builds the session from an already-loaded snapshot.
    ///
    /// Normalizes and keys every point-bearing feature, renders markers
    /// with bound detail content, registers store entries, fits the map
    /// to the combined marker bounds, and renders the ordered list with
    /// its header summary.
    pub fn from_snapshot(snapshot: FeedSnapshot, map: M, list: L) -> Self {
        let summary = FeedSummary {
            fire_count: snapshot.fire_count(),
            service_count: snapshot.service_count(),
            last_updated: resolve_last_updated(
                &snapshot.fire.features,
                &snapshot.service.features,
            ),
        };

        let mut session = Self {
            store: CorrelationStore::new(),
            map,
            list,
            incidents: Vec::new(),
            summary,
        };

        let fire = session.ingest(&snapshot.fire.features, normalize_fire);
        let service = session.ingest(&snapshot.service.features, normalize_service);

        let markers = session.store.markers();
        if let Some(bounds) = session.map.compute_bounds(&markers) {
            session.map.fit_bounds(bounds);
        }

        session.incidents = merge_and_order(fire, service);
        session.list.render_rows(&session.summary, &session.incidents);

        log::info!(
            "Session ready: {} fire + {} service features, {} rendered",
            session.summary.fire_count,
            session.summary.service_count,
            session.store.len()
        );

        session
    }

    /// Normalizes one feed's features, rendering and registering each
    /// point-bearing one.
    ///
    /// Features without a usable point geometry are skipped entirely.
    /// Neither view can place them, so they never render anywhere.
    fn ingest<P: FeedSchema>(
        &mut self,
        features: &[Feature<P>],
        normalize: impl Fn(IdentityKey, &P) -> Incident,
    ) -> Vec<Incident> {
        let mut incidents = Vec::with_capacity(features.len());

        for feature in features {
            let Some(lon_lat) = feature.geometry.as_ref().and_then(PointGeometry::lon_lat) else {
                log::debug!("Skipping {} feature without point geometry", P::SOURCE);
                continue;
            };

            let key = identity_key(feature);
            let incident = normalize(key.clone(), &feature.properties);

            let marker = self.map.add_point(lon_lat, &incident.color);
            self.map.bind_detail(marker, &incident);
            self.store.register(key, marker, incident.clone());

            incidents.push(incident);
        }

        incidents
    }

    /// Applies a selection from either view.
    pub fn select(&mut self, request: &SelectionRequest) {
        apply_selection(&self.store, &mut self.map, &mut self.list, request);
    }

    /// The merged incident list, ordered by recency.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Header stats for this load.
    #[must_use]
    pub const fn summary(&self) -> &FeedSummary {
        &self.summary
    }

    /// The correlation store backing selection resolution.
    #[must_use]
    pub const fn store(&self) -> &CorrelationStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;
    use dispatch_radar_feed::parse_snapshot;
    use dispatch_radar_incident_models::palette;

    use super::*;
    use crate::render::{Bounds, MarkerId};
    use crate::sync::{FOCUS_ZOOM, SelectionOrigin};

    const PAYLOAD: &str = r#"{
        "fire": {
            "features": [
                {
                    "geometry": { "type": "Point", "coordinates": [-122.41, 37.77] },
                    "properties": {
                        "call_type": "Structure Fire",
                        "address": "100 MARKET ST",
                        "received_dttm": "2024-01-15T14:30:00",
                        "data_as_of": "2024-01-15T15:00:00",
                        "priority": "1"
                    }
                },
                {
                    "geometry": null,
                    "properties": { "call_type": "Smoke Check" }
                }
            ]
        },
        "service": {
            "features": [
                {
                    "geometry": { "type": "Point", "coordinates": [-122.39, 37.79] },
                    "properties": {
                        "call_type_final_desc": "AUDIBLE ALARM",
                        "intersection_name": "5TH ST \\ MARKET ST",
                        "received_datetime": "2024-01-15T16:45:00",
                        "priority_final": "B",
                        "agency": "Police"
                    }
                }
            ]
        }
    }"#;

    #[derive(Debug, Default)]
    struct MapState {
        points: Vec<((f64, f64), String)>,
        bound_details: Vec<(MarkerId, IdentityKey)>,
        fitted: Option<Bounds>,
        focused: Option<(MarkerId, u8)>,
        open_detail: Option<MarkerId>,
    }

    #[derive(Debug, Clone, Default)]
    struct MockMap(Rc<RefCell<MapState>>);

    impl MapView for MockMap {
        fn add_point(&mut self, lon_lat: (f64, f64), color: &str) -> MarkerId {
            let mut state = self.0.borrow_mut();
            state.points.push((lon_lat, color.to_string()));
            MarkerId(state.points.len() as u64 - 1)
        }

        fn bind_detail(&mut self, marker: MarkerId, incident: &Incident) {
            self.0
                .borrow_mut()
                .bound_details
                .push((marker, incident.key.clone()));
        }

        fn compute_bounds(&self, markers: &[MarkerId]) -> Option<Bounds> {
            let state = self.0.borrow();
            let coords: Vec<(f64, f64)> = markers
                .iter()
                .map(|marker| state.points[usize::try_from(marker.0).unwrap()].0)
                .collect();
            let (&(first_lon, first_lat), rest) = coords.split_first()?;
            let mut bounds = Bounds {
                min_lon: first_lon,
                min_lat: first_lat,
                max_lon: first_lon,
                max_lat: first_lat,
            };
            for &(lon, lat) in rest {
                bounds.min_lon = bounds.min_lon.min(lon);
                bounds.min_lat = bounds.min_lat.min(lat);
                bounds.max_lon = bounds.max_lon.max(lon);
                bounds.max_lat = bounds.max_lat.max(lat);
            }
            Some(bounds)
        }

        fn fit_bounds(&mut self, bounds: Bounds) {
            self.0.borrow_mut().fitted = Some(bounds);
        }

        fn focus(&mut self, marker: MarkerId, zoom: u8) {
            self.0.borrow_mut().focused = Some((marker, zoom));
        }

        fn open_detail(&mut self, marker: MarkerId) {
            self.0.borrow_mut().open_detail = Some(marker);
        }
    }

    #[derive(Debug, Default)]
    struct ListState {
        rows: Vec<IdentityKey>,
        summary: Option<FeedSummary>,
        highlighted: Vec<IdentityKey>,
        clear_count: usize,
    }

    #[derive(Debug, Clone, Default)]
    struct MockList(Rc<RefCell<ListState>>);

    impl ListView for MockList {
        fn render_rows(&mut self, summary: &FeedSummary, incidents: &[Incident]) {
            let mut state = self.0.borrow_mut();
            state.summary = Some(*summary);
            state.rows = incidents.iter().map(|i| i.key.clone()).collect();
        }

        fn highlight_row(&mut self, key: &IdentityKey) {
            self.0.borrow_mut().highlighted.push(key.clone());
        }

        fn clear_highlight(&mut self) {
            let mut state = self.0.borrow_mut();
            state.highlighted.clear();
            state.clear_count += 1;
        }
    }

    struct StaticLoader(&'static str);

    #[async_trait]
    impl FeedLoader for StaticLoader {
        async fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError> {
            parse_snapshot(self.0)
        }
    }

    fn build_session() -> (RadarSession<MockMap, MockList>, MockMap, MockList) {
        let map = MockMap::default();
        let list = MockList::default();
        let session =
            RadarSession::from_snapshot(parse_snapshot(PAYLOAD).unwrap(), map.clone(), list.clone());
        (session, map, list)
    }

    #[test]
    fn renders_markers_and_fits_bounds() {
        let (session, map, _list) = build_session();
        let state = map.0.borrow();

        // The geometry-less fire feature renders nowhere.
        assert_eq!(state.points.len(), 2);
        assert_eq!(session.store().len(), 2);
        assert_eq!(state.points[0].1, palette::CRITICAL);
        assert_eq!(state.points[1].1, palette::ELEVATED);

        let bounds = state.fitted.unwrap();
        assert!((bounds.min_lon - -122.41).abs() < f64::EPSILON);
        assert!((bounds.max_lon - -122.39).abs() < f64::EPSILON);
        assert!((bounds.min_lat - 37.77).abs() < f64::EPSILON);
        assert!((bounds.max_lat - 37.79).abs() < f64::EPSILON);

        assert_eq!(state.bound_details.len(), 2);
    }

    #[test]
    fn renders_rows_newest_first_with_summary() {
        let (session, _map, list) = build_session();
        let state = list.0.borrow();

        // Counts reflect the raw snapshot, including the skipped feature.
        let summary = state.summary.unwrap();
        assert_eq!(summary.fire_count, 2);
        assert_eq!(summary.service_count, 1);
        assert_eq!(
            summary.last_updated.unwrap().to_string(),
            "2024-01-15 15:00:00 UTC"
        );

        // The 16:45 service call outranks the 14:30 fire call.
        assert_eq!(state.rows.len(), 2);
        assert!(state.rows[0].as_str().starts_with("S:"));
        assert!(state.rows[1].as_str().starts_with("F:"));
        assert_eq!(state.rows, session.incidents().iter().map(|i| i.key.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn location_repair_is_visible_in_store_entries() {
        let (session, _map, _list) = build_session();
        let service_key = session
            .incidents()
            .iter()
            .find(|i| i.key.as_str().starts_with("S:"))
            .unwrap()
            .key
            .clone();

        let entry = session.store().resolve(&service_key).unwrap();
        assert_eq!(entry.incident.location, "5TH ST & MARKET ST");
    }

    #[test]
    fn selection_from_either_view_reaches_the_same_end_state() {
        let (mut session, map, list) = build_session();
        let key = session.incidents()[0].key.clone();
        let marker = session.store().resolve(&key).unwrap().marker;

        session.select(&SelectionRequest::new(key.clone(), SelectionOrigin::Map));
        assert_eq!(map.0.borrow().focused, Some((marker, FOCUS_ZOOM)));
        assert_eq!(map.0.borrow().open_detail, Some(marker));
        assert_eq!(list.0.borrow().highlighted, [key.clone()]);

        session.select(&SelectionRequest::new(key.clone(), SelectionOrigin::List));
        assert_eq!(map.0.borrow().focused, Some((marker, FOCUS_ZOOM)));
        assert_eq!(list.0.borrow().highlighted, [key.clone()]);
    }

    #[test]
    fn new_selection_replaces_the_previous_highlight() {
        let (mut session, map, list) = build_session();
        let first = session.incidents()[0].key.clone();
        let second = session.incidents()[1].key.clone();

        session.select(&SelectionRequest::new(first, SelectionOrigin::List));
        session.select(&SelectionRequest::new(second.clone(), SelectionOrigin::Map));

        let list_state = list.0.borrow();
        assert_eq!(list_state.highlighted, [second.clone()]);
        assert_eq!(list_state.clear_count, 2);

        let marker = session.store().resolve(&second).unwrap().marker;
        assert_eq!(map.0.borrow().focused, Some((marker, FOCUS_ZOOM)));
    }

    #[test]
    fn unknown_key_selection_is_a_no_op() {
        let (mut session, map, list) = build_session();

        session.select(&SelectionRequest::new("F:nowhere:", SelectionOrigin::Map));

        assert!(map.0.borrow().focused.is_none());
        assert!(map.0.borrow().open_detail.is_none());
        assert!(list.0.borrow().highlighted.is_empty());
        assert_eq!(list.0.borrow().clear_count, 0);
    }

    #[tokio::test]
    async fn start_builds_session_from_loader() {
        let loader = StaticLoader(PAYLOAD);
        let session = RadarSession::start(&loader, MockMap::default(), MockList::default())
            .await
            .unwrap();
        assert_eq!(session.incidents().len(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_is_fatal_and_builds_nothing() {
        let loader = StaticLoader("not json");
        let map = MockMap::default();
        let list = MockList::default();

        let result = RadarSession::start(&loader, map.clone(), list.clone()).await;
        assert!(matches!(result, Err(SessionError::Feed(_))));

        // No partial UI was constructed.
        assert!(map.0.borrow().points.is_empty());
        assert!(list.0.borrow().summary.is_none());
    }

    #[test]
    fn empty_snapshot_builds_an_empty_session() {
        let map = MockMap::default();
        let list = MockList::default();
        let session = RadarSession::from_snapshot(
            parse_snapshot(r#"{ "fire": { "features": [] }, "service": { "features": [] } }"#)
                .unwrap(),
            map.clone(),
            list.clone(),
        );

        assert!(session.incidents().is_empty());
        assert!(session.store().is_empty());
        assert!(map.0.borrow().fitted.is_none());
        let state = list.0.borrow();
        let summary = state.summary.unwrap();
        assert_eq!(summary.fire_count, 0);
        assert!(summary.last_updated.is_none());
    }
}
