//! Runtime preferences for the estate client.

use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Represents all tunable runtime settings.
///
/// Durations are stored in milliseconds so the struct stays trivially
/// serialisable.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AppPrefs {
    /// The visual pause between requesting a view and showing it.
    pub transition_delay_ms: u64,

    /// Upper bound on a single payment gateway call.
    pub gateway_timeout_ms: u64,

    /// How long the simulated gateway takes to answer.
    pub gateway_latency_ms: u64,

    /// Forces the simulated gateway to decline every charge.
    pub simulate_payment_failure: bool,

    /// Where the native build keeps the purchased subscription.
    pub subscription_file: PathBuf,
}

impl AppPrefs {
    const TRANSITION_DELAY_MS: u64 = 600;
    const GATEWAY_TIMEOUT_MS: u64 = 30_000;
    const GATEWAY_LATENCY_MS: u64 = 1_500;
    const SUBSCRIPTION_FILE: &'static str = "imperial_estate_subscription.json";

    /// Creates an AppPrefs instance from environment variables, falling back
    /// to in-code defaults for anything unset or unparsable.
    ///
    /// # Environment Variables
    /// - `TRANSITION_DELAY_MS`: milliseconds, default 600.
    /// - `GATEWAY_TIMEOUT_MS`: milliseconds, default 30000.
    /// - `GATEWAY_LATENCY_MS`: milliseconds, default 1500.
    /// - `SIMULATE_PAYMENT_FAILURE`: "true" or "1" to decline all charges.
    /// - `SUBSCRIPTION_FILE`: path of the native subscription store.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`AppPrefs::from_env`], reading values through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let simulate_payment_failure = lookup("SIMULATE_PAYMENT_FAILURE")
            .map(|val| val.eq_ignore_ascii_case("true") || val == "1")
            .unwrap_or(false);

        let subscription_file = lookup("SUBSCRIPTION_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::SUBSCRIPTION_FILE));

        Self {
            transition_delay_ms: millis("TRANSITION_DELAY_MS", Self::TRANSITION_DELAY_MS),
            gateway_timeout_ms: millis("GATEWAY_TIMEOUT_MS", Self::GATEWAY_TIMEOUT_MS),
            gateway_latency_ms: millis("GATEWAY_LATENCY_MS", Self::GATEWAY_LATENCY_MS),
            simulate_payment_failure,
            subscription_file,
        }
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms)
    }

    pub fn gateway_latency(&self) -> Duration {
        Duration::from_millis(self.gateway_latency_ms)
    }
}

impl Default for AppPrefs {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_nothing_is_set() {
        let prefs = AppPrefs::default();
        assert_eq!(prefs.transition_delay(), Duration::from_millis(600));
        assert_eq!(prefs.gateway_timeout(), Duration::from_secs(30));
        assert!(!prefs.simulate_payment_failure);
        assert_eq!(
            prefs.subscription_file,
            PathBuf::from("imperial_estate_subscription.json")
        );
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TRANSITION_DELAY_MS", "50"),
            ("GATEWAY_TIMEOUT_MS", "soon"),
            ("SIMULATE_PAYMENT_FAILURE", "TRUE"),
            ("SUBSCRIPTION_FILE", "/tmp/sub.json"),
        ]);
        let prefs = AppPrefs::from_vars(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(prefs.transition_delay_ms, 50);
        assert_eq!(prefs.gateway_timeout_ms, 30_000);
        assert!(prefs.simulate_payment_failure);
        assert_eq!(prefs.subscription_file, PathBuf::from("/tmp/sub.json"));
    }
}
