//=============================================================================
// File: src/screens/map.rs
//=============================================================================
use dioxus::prelude::*;
use dioxus_logger::tracing::debug;

use crate::components::map_surface::MapSurface;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Input;
use crate::engine::coordinate::Placement;
use crate::hooks::use_estate_app::use_estate_app;

#[component]
pub fn MapScreen() -> Element {
    let estate = use_estate_app();
    let mut main_plate = use_signal(String::new);
    let mut sub_plate = use_signal(String::new);

    let on_main = {
        let estate = estate.clone();
        move |value: String| {
            estate.set_plate_input(&value, &sub_plate.peek());
            main_plate.set(value);
        }
    };
    let on_sub = {
        let estate = estate.clone();
        move |value: String| {
            estate.set_plate_input(&main_plate.peek(), &value);
            sub_plate.set(value);
        }
    };
    let on_search = move |evt: FormEvent| {
        evt.prevent_default();
        if estate.search_plate() == Placement::Skipped {
            debug!("plate search changed nothing");
        }
    };

    rsx! {
        Card {
            h3 { "Find a parcel" }
            form {
                onsubmit: on_search,
                Grid {
                    Input {
                        label: "Main plate",
                        name: "mainPlate",
                        input_type: "number",
                        value: main_plate(),
                        on_input: on_main,
                    }
                    Input {
                        label: "Sub plate",
                        name: "subPlate",
                        input_type: "number",
                        value: sub_plate(),
                        on_input: on_sub,
                    }
                }
                Button {
                    button_type: ButtonType::Primary,
                    submit: true,
                    "Search"
                }
            }
            MapSurface {}
        }
    }
}
