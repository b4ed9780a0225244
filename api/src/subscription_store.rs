//! Durable storage of the purchased subscription.

use crate::ApiError;
use anyhow::Context;
use chrono::DateTime;
use chrono::Months;
use chrono::Utc;
use dioxus_logger::tracing::warn;
use serde::Deserialize;
use serde::Serialize;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// A purchased subscription and its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub duration_months: u32,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Subscription {
    /// A subscription of `duration_months` calendar months beginning at `now`.
    ///
    /// Returns `None` if the expiry would fall outside chrono's date range.
    pub fn starting_at(now: DateTime<Utc>, duration_months: u32) -> Option<Self> {
        let expires_at = now.checked_add_months(Months::new(duration_months))?;
        Some(Self {
            duration_months,
            started_at: now,
            expires_at,
        })
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// A service that remembers whether the user has paid.
pub trait SubscriptionStore {
    /// Returns `true` if a stored subscription has not yet expired.
    fn has_valid_subscription(&self) -> bool;

    /// Records a new subscription of `duration_months`, starting now and
    /// replacing any previous one.
    fn set_subscription(&self, duration_months: u32) -> Result<(), ApiError>;
}

fn new_subscription(duration_months: u32) -> Result<Subscription, ApiError> {
    Subscription::starting_at(Utc::now(), duration_months).with_context(|| {
        format!("a {duration_months}-month subscription expires out of range")
    })
}

/// Keeps the subscription in memory only. Used by tests and previews.
#[derive(Debug, Default)]
pub struct MemorySubscriptionStore {
    current: RefCell<Option<Subscription>>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out holding `subscription`.
    pub fn with_subscription(subscription: Subscription) -> Self {
        Self {
            current: RefCell::new(Some(subscription)),
        }
    }

    pub fn current(&self) -> Option<Subscription> {
        self.current.borrow().clone()
    }
}

impl SubscriptionStore for MemorySubscriptionStore {
    fn has_valid_subscription(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|s| s.is_active_at(Utc::now()))
    }

    fn set_subscription(&self, duration_months: u32) -> Result<(), ApiError> {
        let subscription = new_subscription(duration_months)?;
        *self.current.borrow_mut() = Some(subscription);
        Ok(())
    }
}

/// Keeps the subscription as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileSubscriptionStore {
    path: PathBuf,
}

impl FileSubscriptionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored subscription. A missing file means none was bought.
    pub fn load(&self) -> Result<Option<Subscription>, ApiError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let subscription = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(subscription))
    }

    fn save(&self, subscription: &Subscription) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(subscription)?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

impl SubscriptionStore for FileSubscriptionStore {
    fn has_valid_subscription(&self) -> bool {
        match self.load() {
            Ok(Some(subscription)) => subscription.is_active_at(Utc::now()),
            Ok(None) => false,
            Err(e) => {
                // A corrupt file is treated as no subscription; the next purchase overwrites it.
                warn!("ignoring unreadable subscription store: {e:#}");
                false
            }
        }
    }

    fn set_subscription(&self, duration_months: u32) -> Result<(), ApiError> {
        let subscription = new_subscription(duration_months)?;
        self.save(&subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expiry_uses_calendar_months() {
        let start = Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap();
        let sub = Subscription::starting_at(start, 6).unwrap();
        assert_eq!(sub.expires_at, Utc.with_ymd_and_hms(2026, 7, 31, 12, 0, 0).unwrap());
        assert!(sub.is_active_at(start));
        assert!(!sub.is_active_at(sub.expires_at));
    }

    #[test]
    fn memory_store_reports_what_was_set() {
        let store = MemorySubscriptionStore::new();
        assert!(!store.has_valid_subscription());

        store.set_subscription(12).unwrap();
        assert!(store.has_valid_subscription());
        assert_eq!(store.current().map(|s| s.duration_months), Some(12));
    }

    #[test]
    fn memory_store_ignores_expired_subscription() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let store = MemorySubscriptionStore::with_subscription(Subscription::starting_at(start, 1).unwrap());
        assert!(!store.has_valid_subscription());
    }
}
