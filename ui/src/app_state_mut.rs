//! Defines the mutable, reactive state for the application's UI.

use crate::engine::presentation::{GeoPoint, MapWidget, MarkerHandle, PresentationSink};
use crate::engine::view::ViewId;
use dioxus::prelude::*;

/// What the map is centered on.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

/// A marker currently drawn on the map.
#[derive(Clone, PartialEq, Debug)]
pub struct PlacedMarker {
    pub handle: MarkerHandle,
    pub point: GeoPoint,
    pub label: String,
}

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// The engine writes into these signals through [`PresentationSink`] and
/// [`MapWidget`], and the components re-render from them. It is separate
/// from the engine's own `AppState`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// The view on screen. Only completed transitions change it.
    pub active_view: Signal<ViewId>,
    pub loading: Signal<bool>,
    /// The error waiting to be acknowledged, if any.
    pub error: Signal<Option<String>>,
    pub captcha_hint: Signal<String>,
    /// `None` until the map has been initialized.
    pub viewport: Signal<Option<Viewport>>,
    pub markers: Signal<Vec<PlacedMarker>>,
    next_marker: Signal<u64>,
}

impl AppStateMut {
    pub const DEFAULT_CAPTCHA_HINT: &'static str = "Please confirm you are not a robot.";

    /// Creates the signals. Must be called from a component.
    pub fn new() -> Self {
        Self {
            active_view: Signal::new(ViewId::default()),
            loading: Signal::new(false),
            error: Signal::new(None),
            captcha_hint: Signal::new(Self::DEFAULT_CAPTCHA_HINT.to_string()),
            viewport: Signal::new(None),
            markers: Signal::new(Vec::new()),
            next_marker: Signal::new(0),
        }
    }

    pub fn dismiss_error(&self) {
        let mut error = self.error;
        error.set(None);
    }
}

impl PresentationSink for AppStateMut {
    fn show_loading(&self) {
        let mut loading = self.loading;
        loading.set(true);
    }

    fn hide_loading(&self) {
        let mut loading = self.loading;
        loading.set(false);
    }

    fn show_error(&self, message: &str) {
        let mut error = self.error;
        error.set(Some(message.to_string()));
    }

    fn set_active_view(&self, view: ViewId) {
        let mut active_view = self.active_view;
        active_view.set(view);
    }

    fn set_captcha_hint(&self, hint: &str) {
        let mut captcha_hint = self.captcha_hint;
        captcha_hint.set(hint.to_string());
    }
}

impl MapWidget for AppStateMut {
    fn set_view(&self, point: GeoPoint, zoom: u8) {
        let mut viewport = self.viewport;
        viewport.set(Some(Viewport {
            center: point,
            zoom,
        }));
    }

    fn place_marker(&self, point: GeoPoint, label: &str) -> MarkerHandle {
        let mut next_marker = self.next_marker;
        let handle = MarkerHandle(*next_marker.peek());
        next_marker.set(handle.0 + 1);

        let mut markers = self.markers;
        markers.write().push(PlacedMarker {
            handle,
            point,
            label: label.to_string(),
        });
        handle
    }

    fn remove_marker(&self, handle: MarkerHandle) {
        let mut markers = self.markers;
        markers.write().retain(|m| m.handle != handle);
    }
}
