use crate::hooks::use_estate_app::use_app_state_mut;
use dioxus::prelude::*;

/// Covers the page while a transition or a charge is in flight.
#[component]
pub fn LoadingOverlay() -> Element {
    let app_state_mut = use_app_state_mut();

    rsx! {
        div {
            class: "loading-overlay",
            hidden: !(app_state_mut.loading)(),
            "aria-busy": "true",
            "aria-live": "polite",
            span { "Loading…" }
        }
    }
}
