use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Modal;
use crate::hooks::use_estate_app::use_app_state_mut;
use dioxus::prelude::*;

/// Shows the most recent error until the user dismisses it.
#[component]
pub fn ErrorModal() -> Element {
    let app_state_mut = use_app_state_mut();
    let Some(message) = (app_state_mut.error)() else {
        return rsx! {};
    };

    rsx! {
        Modal {
            title: "Error",
            on_close: move |_| app_state_mut.dismiss_error(),
            p { "{message}" }
            footer {
                Button {
                    button_type: ButtonType::Secondary,
                    on_click: move |_| app_state_mut.dismiss_error(),
                    "OK"
                }
            }
        }
    }
}
