// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
pub mod engine;
pub mod gateway;
pub mod hooks;
mod screens;

use api::plan::PlanCatalog;
use api::prefs::app_prefs::AppPrefs;
use api::validation::DefaultValidator;
use app_state_mut::AppStateMut;
use components::error_modal::ErrorModal;
use components::loading_overlay::LoadingOverlay;
use components::pico::Container;
use engine::controller::Collaborators;
use engine::controller::EstateApp;
use engine::view::ViewId;
use gateway::SimulatedGateway;
use hooks::use_estate_app::Estate;
use screens::auth::AuthScreen;
use screens::map::MapScreen;
use screens::subscription::SubscriptionScreen;
use std::rc::Rc;
use strum::IntoEnumIterator;

pub use app_state::AppState;
pub use app_state::PlateInput;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css";

/// The step indicator. Views are reached through the flow, not by clicking.
#[component]
fn Steps(active_view: Signal<ViewId>) -> Element {
    rsx! {
        nav {
            class: "tab-menu",
            ul {
                for view in ViewId::iter() {
                    li {
                        a {
                            class: if active_view() == view { "active-tab" } else { "" },
                            "aria-current": if active_view() == view { "step" } else { "false" },
                            "{view.name()}"
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let responsive_css = r#"
    * { box-sizing: border-box; }

    html, body {
        height: 100%;
        width: 100%;
        margin: 0;
        padding: 0;
        background-color: var(--muted-border-color);
    }

    /* --- APP FRAME --- */
    .app-main-container {
        position: fixed;
        top: 0; left: 0; right: 0; bottom: 0;
        padding: 10px;
        display: flex;
        flex-direction: column;
        overflow: auto;
        background-color: var(--background-color);
    }

    .app-main-container header {
        flex-shrink: 0;
        padding: 0 1rem;
        --pico-nav-element-spacing-vertical: 0.5rem;
    }

    /* --- STEP INDICATOR --- */
    .tab-menu a { cursor: default; }
    .tab-menu a.active-tab {
        color: var(--pico-primary) !important;
        border-bottom: 3px solid var(--pico-primary);
        text-decoration: none;
    }
    .tab-menu a:not(.active-tab) {
        color: var(--pico-muted-color);
        border-bottom: 3px solid transparent;
    }

    /* --- VIEWS --- */
    section[data-view][hidden] { display: none !important; }

    /* --- LOADING --- */
    .loading-overlay {
        position: fixed;
        inset: 0;
        display: flex;
        align-items: center;
        justify-content: center;
        background: color-mix(in srgb, var(--pico-background-color), transparent 30%);
        z-index: 1000;
    }
    .loading-overlay[hidden] { display: none; }

    /* --- MAP --- */
    .map-container {
        position: relative;
        width: 100%;
        height: 60vh;
        border-radius: var(--pico-border-radius);
        overflow: hidden;
        border: 1px solid var(--pico-card-border-color);
    }
    .map-container iframe { width: 100%; height: 100%; border: 0; }
    .map-pending { display: flex; align-items: center; justify-content: center; }
    .map-popup {
        position: absolute;
        top: 1rem; left: 50%;
        transform: translateX(-50%);
        padding: 0.4rem 0.8rem;
        border-radius: var(--pico-border-radius);
        background-color: var(--pico-card-background-color);
        box-shadow: 0 2px 10px rgba(0,0,0,0.2);
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: PICO_CSS,
        }
        style {
            "{responsive_css}"
        }
        AppBody {}
    }
}

/// Builds the engine once and keeps it for the lifetime of the page.
#[component]
fn AppBody() -> Element {
    let app_state_mut = use_hook(AppStateMut::new);
    use_context_provider(|| app_state_mut);

    let estate: Estate = use_hook(|| {
        let prefs = AppPrefs::from_env();
        dioxus_logger::tracing::info!("prefs: {:#?}", prefs);

        Rc::new(EstateApp::new(
            &prefs,
            PlanCatalog::default(),
            Collaborators {
                presenter: Rc::new(app_state_mut),
                map: Rc::new(app_state_mut),
                store: compat::platform_store(&prefs),
                validator: Rc::new(DefaultValidator::default()),
                gateway: SimulatedGateway::from_prefs(&prefs),
            },
        ))
    });
    use_context_provider(|| estate.clone());

    // Runs after the first render; `init` is a no-op on later calls.
    use_effect({
        let estate = estate.clone();
        move || {
            if let Some(transition) = estate.init() {
                spawn(async move {
                    if let Err(cancelled) = transition.await {
                        dioxus_logger::tracing::debug!("{cancelled}");
                    }
                });
            }
        }
    });
    use_drop({
        let estate = estate.clone();
        move || estate.dispose()
    });

    let active_view = app_state_mut.active_view;

    rsx! {
        div {
            class: "app-main-container",
            Container {
                header {
                    nav {
                        ul {
                            li {
                                h1 {
                                    style: "margin: 0; font-size: 1.5rem;",
                                    "Imperial Estate"
                                }
                            }
                        }
                        ul {
                            li {
                                Steps { active_view }
                            }
                        }
                    }
                }
                // Every view stays mounted so its tasks and inputs survive
                // while hidden.
                section {
                    "data-view": "auth",
                    hidden: active_view() != ViewId::Auth,
                    AuthScreen {}
                }
                section {
                    "data-view": "subscription",
                    hidden: active_view() != ViewId::Subscription,
                    SubscriptionScreen {}
                }
                section {
                    "data-view": "map",
                    hidden: active_view() != ViewId::Map,
                    MapScreen {}
                }
            }
            LoadingOverlay {}
            ErrorModal {}
        }
    }
}
