//! The two side-effect sinks the engine drives: the page chrome and the map.

use crate::engine::view::ViewId;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Identifies a marker previously placed on a [`MapWidget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Fire-and-forget presentation effects.
pub trait PresentationSink {
    fn show_loading(&self);
    fn hide_loading(&self);
    /// Tells the user something went wrong.
    fn show_error(&self, message: &str);
    /// Makes `view` the only visible view.
    fn set_active_view(&self, view: ViewId);
    /// Replaces the help text under the captcha. An empty hint hides it.
    fn set_captcha_hint(&self, hint: &str);
}

/// The mapping widget. Calls are treated as infallible.
pub trait MapWidget {
    /// Centers the map on `point` at `zoom`.
    fn set_view(&self, point: GeoPoint, zoom: u8);
    /// Drops a marker with `label` as its popup.
    fn place_marker(&self, point: GeoPoint, label: &str) -> MarkerHandle;
    fn remove_marker(&self, handle: MarkerHandle);
}
