//! The static catalog of purchasable subscription plans.

use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A purchasable subscription tier, keyed by its fixed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    /// The price, in whole currency units (no minor units).
    pub amount: i64,
    /// How long a purchase of this plan stays valid.
    pub duration_months: u32,
    pub display_name: String,
}

/// The read-only plan catalog, loaded once at startup.
///
/// Amounts are unique; iteration yields plans in ascending price order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog(BTreeMap<i64, SubscriptionPlan>);

impl PlanCatalog {
    /// Builds a catalog from a list of plans. A later plan with the same
    /// amount replaces an earlier one.
    pub fn new(plans: impl IntoIterator<Item = SubscriptionPlan>) -> Self {
        Self(plans.into_iter().map(|p| (p.amount, p)).collect())
    }

    /// Retrieves the plan priced at `amount`.
    ///
    /// Returns `None` if no plan has that price.
    pub fn get(&self, amount: i64) -> Option<&SubscriptionPlan> {
        self.0.get(&amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubscriptionPlan> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PlanCatalog {
    /// The two tiers the storefront sells.
    fn default() -> Self {
        Self::new([
            SubscriptionPlan {
                amount: 149_000,
                duration_months: 6,
                display_name: "Platinum".to_string(),
            },
            SubscriptionPlan {
                amount: 249_000,
                duration_months: 12,
                display_name: "Imperial".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_maps_amounts_to_durations() {
        let catalog = PlanCatalog::default();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(149_000).map(|p| p.duration_months), Some(6));
        assert_eq!(catalog.get(249_000).map(|p| p.duration_months), Some(12));
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn iterates_in_price_order() {
        let catalog = PlanCatalog::new([
            SubscriptionPlan {
                amount: 30,
                duration_months: 3,
                display_name: "c".into(),
            },
            SubscriptionPlan {
                amount: 10,
                duration_months: 1,
                display_name: "a".into(),
            },
        ]);
        let amounts: Vec<i64> = catalog.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![10, 30]);
    }
}
