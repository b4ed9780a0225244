use crate::app_state_mut::{PlacedMarker, Viewport};
use crate::hooks::use_estate_app::use_app_state_mut;
use dioxus::prelude::*;

const MAP_CONTAINER_ID: &str = "estate-map-container";
const EMBED_BASE: &str = "https://www.openstreetmap.org/export/embed.html";

// ---------------------------------------------------------------------------
// Viewport math (pure functions, easily testable)
// ---------------------------------------------------------------------------

/// Degrees of longitude visible at `zoom` on a roughly 256px-per-tile map.
fn span_degrees(zoom: u8) -> f64 {
    360.0 / 2f64.powi(i32::from(zoom.min(19)))
}

/// The `(min_lng, min_lat, max_lng, max_lat)` box shown for `viewport`.
fn bounding_box(viewport: &Viewport) -> (f64, f64, f64, f64) {
    let half = span_degrees(viewport.zoom) / 2.0;
    let c = viewport.center;
    (c.lng - half, c.lat - half / 2.0, c.lng + half, c.lat + half / 2.0)
}

/// The OpenStreetMap embed URL for `viewport`, pinned at `marker` if any.
fn embed_url(viewport: &Viewport, marker: Option<&PlacedMarker>) -> String {
    let (min_lng, min_lat, max_lng, max_lat) = bounding_box(viewport);
    let mut url = format!(
        "{EMBED_BASE}?bbox={min_lng:.6}%2C{min_lat:.6}%2C{max_lng:.6}%2C{max_lat:.6}&layer=mapnik"
    );
    if let Some(m) = marker {
        url.push_str(&format!("&marker={:.6}%2C{:.6}", m.point.lat, m.point.lng));
    }
    url
}

/// Renders the map tiles and the popup of the current marker.
#[component]
pub fn MapSurface() -> Element {
    let app_state_mut = use_app_state_mut();
    let viewport = (app_state_mut.viewport)();
    let marker = app_state_mut.markers.read().last().cloned();

    let Some(viewport) = viewport else {
        return rsx! {
            div { id: MAP_CONTAINER_ID, class: "map-container map-pending", "Preparing map…" }
        };
    };
    let src = embed_url(&viewport, marker.as_ref());

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "map-container",
            iframe {
                title: "Estate map",
                src: "{src}",
                "loading": "lazy",
            }
            if let Some(m) = marker {
                div {
                    class: "map-popup",
                    strong { "{m.label}" }
                    small { {format!(" ({:.4}, {:.4})", m.point.lat, m.point.lng)} }
                }
            }
        }
    }
}
