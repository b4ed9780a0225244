//=============================================================================
// File: src/screens/auth.rs
//=============================================================================
use dioxus::prelude::*;
use dioxus_logger::tracing::debug;

use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Input;
use crate::hooks::use_estate_app::use_app_state_mut;
use crate::hooks::use_estate_app::use_estate_app;

#[component]
pub fn AuthScreen() -> Element {
    let estate = use_estate_app();
    let app_state_mut = use_app_state_mut();
    let mut phone = use_signal(String::new);
    let mut robot_checked = use_signal(|| false);

    let hint = (app_state_mut.captcha_hint)();
    let busy = (app_state_mut.loading)();

    let on_submit = {
        let estate = estate.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if let Some(transition) = estate.submit_credentials(&phone.read()) {
                spawn(async move {
                    if let Err(cancelled) = transition.await {
                        debug!("{cancelled}");
                    }
                });
            }
        }
    };

    let estate_ok = estate.clone();
    let estate_err = estate.clone();

    rsx! {
        Card {
            h3 { "Sign in" }
            form {
                onsubmit: on_submit,
                Input {
                    label: "Mobile number",
                    name: "phone",
                    input_type: "tel",
                    placeholder: "09xx xxx xxxx",
                    value: phone(),
                    on_input: move |value| phone.set(value),
                }
                fieldset {
                    class: "captcha",
                    label {
                        input {
                            r#type: "checkbox",
                            checked: robot_checked(),
                            onchange: move |evt| {
                                let checked = evt.checked();
                                robot_checked.set(checked);
                                if checked {
                                    estate_ok.on_captcha_success();
                                }
                            },
                        }
                        "I'm not a robot"
                    }
                    if !hint.is_empty() {
                        small { id: "captchaHelp", "{hint}" }
                    }
                    a {
                        href: "#",
                        class: "secondary",
                        onclick: move |evt| {
                            evt.prevent_default();
                            robot_checked.set(false);
                            estate_err.on_captcha_error();
                        },
                        "Captcha not loading?"
                    }
                }
                Button {
                    button_type: ButtonType::Primary,
                    submit: true,
                    disabled: busy,
                    "Continue"
                }
            }
        }
    }
}
