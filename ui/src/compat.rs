// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

use futures::future::{self, Either};
use std::future::Future;
use std::pin::pin;
use std::time::Duration;
use thiserror::Error;

/// The deadline passed before the wrapped future finished.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {0:?} elapsed")]
pub struct Elapsed(pub Duration);

/// Runs `fut` to completion unless `duration` passes first.
///
/// Works on every target because it only races against [`sleep`].
pub async fn timeout<F: Future>(duration: Duration, fut: F) -> Result<F::Output, Elapsed> {
    let fut = pin!(fut);
    let deadline = pin!(sleep(duration));
    match future::select(fut, deadline).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(Elapsed(duration)),
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use api::prefs::app_prefs::AppPrefs;
    use api::subscription_store::{Subscription, SubscriptionStore};
    use api::ApiError;
    use chrono::Utc;
    use dioxus_logger::tracing::warn;
    use std::rc::Rc;
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    /// Keeps the subscription in the browser's `localStorage`.
    pub struct BrowserSubscriptionStore {
        key: &'static str,
    }

    impl BrowserSubscriptionStore {
        const KEY: &'static str = "imperial_estate.subscription";

        pub fn new() -> Self {
            Self { key: Self::KEY }
        }

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()?.local_storage().ok().flatten()
        }
    }

    impl SubscriptionStore for BrowserSubscriptionStore {
        fn has_valid_subscription(&self) -> bool {
            let Some(json) = Self::storage().and_then(|s| s.get_item(self.key).ok().flatten()) else {
                return false;
            };
            match serde_json::from_str::<Subscription>(&json) {
                Ok(subscription) => subscription.is_active_at(Utc::now()),
                Err(e) => {
                    warn!("ignoring unreadable stored subscription: {e}");
                    false
                }
            }
        }

        fn set_subscription(&self, duration_months: u32) -> Result<(), ApiError> {
            let subscription = Subscription::starting_at(Utc::now(), duration_months)
                .ok_or_else(|| ApiError::msg("subscription expiry out of range"))?;
            let json = serde_json::to_string(&subscription)?;
            let storage = Self::storage().ok_or_else(|| ApiError::msg("localStorage unavailable"))?;
            storage
                .set_item(self.key, &json)
                .map_err(|e| ApiError::msg(format!("localStorage write failed: {e:?}")))
        }
    }

    /// The subscription store backing this platform.
    pub fn platform_store(_prefs: &AppPrefs) -> Rc<dyn SubscriptionStore> {
        Rc::new(BrowserSubscriptionStore::new())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use api::prefs::app_prefs::AppPrefs;
    use api::subscription_store::{FileSubscriptionStore, SubscriptionStore};
    use std::rc::Rc;
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// The subscription store backing this platform.
    pub fn platform_store(prefs: &AppPrefs) -> Rc<dyn SubscriptionStore> {
        Rc::new(FileSubscriptionStore::new(prefs.subscription_file.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timeout_passes_through_fast_futures() {
        let out = timeout(Duration::from_secs(1), async { 7 }).await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_on_slow_futures() {
        let slow = sleep(Duration::from_secs(5));
        let out = timeout(Duration::from_secs(1), slow).await;
        assert_eq!(out, Err(Elapsed(Duration::from_secs(1))));
    }
}
