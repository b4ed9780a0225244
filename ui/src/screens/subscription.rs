//=============================================================================
// File: src/screens/subscription.rs
//=============================================================================
use dioxus::prelude::*;
use dioxus_logger::tracing::info;

use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::hooks::use_estate_app::use_app_state_mut;
use crate::hooks::use_estate_app::use_estate_app;

/// Formats a whole-unit price with thousands separators, e.g. `149,000`.
fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[component]
pub fn SubscriptionScreen() -> Element {
    let estate = use_estate_app();
    let app_state_mut = use_app_state_mut();
    let busy = (app_state_mut.loading)();

    let plans: Vec<_> = estate.catalog().iter().cloned().collect();

    rsx! {
        Card {
            h3 { "Choose a plan" }
            Grid {
                for plan in plans {
                    article {
                        key: "{plan.amount}",
                        "data-plan": "{plan.amount}",
                        header { strong { "{plan.display_name}" } }
                        p { "{plan.duration_months} months of map access" }
                        p { {format!("{} Toman", format_price(plan.amount))} }
                        footer {
                            Button {
                                button_type: ButtonType::Primary,
                                disabled: busy,
                                on_click: {
                                    let estate = estate.clone();
                                    let raw = plan.amount.to_string();
                                    move |_| {
                                        let estate = estate.clone();
                                        let raw = raw.clone();
                                        spawn(async move {
                                            if let Ok(Some(plan)) = estate.select_plan(&raw).await {
                                                info!("purchased {}", plan.display_name);
                                            }
                                        });
                                    }
                                },
                                "Subscribe"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_get_thousands_separators() {
        assert_eq!(format_price(149_000), "149,000");
        assert_eq!(format_price(1_249_000), "1,249,000");
        assert_eq!(format_price(999), "999");
        assert_eq!(format_price(-5_000), "-5,000");
    }
}
