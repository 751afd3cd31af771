//! Renderer contracts for the two views.
//!
//! The core never touches a rendering technology directly — it issues
//! commands through these traits and the embedding application maps them
//! onto whatever map widget and list surface it uses. Detail content is
//! bound as the structured [`Incident`] record; HTML templating and
//! escaping belong to the renderer, not here.

use dispatch_radar_incident_models::{FeedSummary, IdentityKey, Incident};

/// Opaque handle to one rendered map marker, issued by the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

/// Geographic bounding box for fitting the viewport to the rendered
/// markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Western edge (minimum longitude).
    pub min_lon: f64,
    /// Southern edge (minimum latitude).
    pub min_lat: f64,
    /// Eastern edge (maximum longitude).
    pub max_lon: f64,
    /// Northern edge (maximum latitude).
    pub max_lat: f64,
}

/// Map view contract.
pub trait MapView {
    /// Renders a point marker in the given color and returns its handle.
    fn add_point(&mut self, lon_lat: (f64, f64), color: &str) -> MarkerId;

    /// Binds detail content to a marker, shown when the marker's detail
    /// is opened.
    fn bind_detail(&mut self, marker: MarkerId, incident: &Incident);

    /// Computes the bounding box covering the given markers. `None` when
    /// `markers` is empty.
    fn compute_bounds(&self, markers: &[MarkerId]) -> Option<Bounds>;

    /// Fits the viewport to a bounding box.
    fn fit_bounds(&mut self, bounds: Bounds);

    /// Re-centers the viewport on a marker at the given zoom level.
    fn focus(&mut self, marker: MarkerId, zoom: u8);

    /// Opens the detail content bound to a marker.
    fn open_detail(&mut self, marker: MarkerId);
}

/// List view contract.
pub trait ListView {
    /// Renders the header stats and the full ordered incident list.
    fn render_rows(&mut self, summary: &FeedSummary, incidents: &[Incident]);

    /// Applies the visual highlight to one row and scrolls it into view.
    /// At most one row is highlighted at a time; callers clear first.
    fn highlight_row(&mut self, key: &IdentityKey);

    /// Clears any existing row highlight.
    fn clear_highlight(&mut self);
}
