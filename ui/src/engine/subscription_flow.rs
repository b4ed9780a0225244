//! Buying a plan: look it up, validate, charge, persist, then open the map.

use crate::compat::{self, Elapsed};
use crate::engine::navigation::{Navigator, TransitionCancelled};
use crate::engine::presentation::PresentationSink;
use crate::engine::view::ViewId;
use api::payment_gateway::{GatewayError, PaymentGateway};
use api::plan::{PlanCatalog, SubscriptionPlan};
use api::subscription_store::SubscriptionStore;
use api::validation::{ValidationError, Validator};
use dioxus_logger::tracing::{debug, info, warn};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("no plan is priced at {0}")]
    UnknownPlan(i64),
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("could not save the subscription: {0}")]
    Persistence(String),
    #[error("a payment is already in progress")]
    PaymentInProgress,
}

/// Clears the in-flight flag and the loading indicator however the charge ends.
struct ChargeGuard<'a> {
    charging: &'a Cell<bool>,
    presenter: &'a dyn PresentationSink,
}

impl Drop for ChargeGuard<'_> {
    fn drop(&mut self) {
        self.charging.set(false);
        self.presenter.hide_loading();
    }
}

pub struct SubscriptionFlow<G> {
    catalog: PlanCatalog,
    validator: Rc<dyn Validator>,
    gateway: G,
    store: Rc<dyn SubscriptionStore>,
    navigator: Rc<Navigator>,
    presenter: Rc<dyn PresentationSink>,
    gateway_timeout: Duration,
    charging: Cell<bool>,
}

impl<G: PaymentGateway> SubscriptionFlow<G> {
    pub fn new(
        catalog: PlanCatalog,
        validator: Rc<dyn Validator>,
        gateway: G,
        store: Rc<dyn SubscriptionStore>,
        navigator: Rc<Navigator>,
        presenter: Rc<dyn PresentationSink>,
        gateway_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            validator,
            gateway,
            store,
            navigator,
            presenter,
            gateway_timeout,
            charging: Cell::new(false),
        }
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// Whether a charge is outstanding.
    pub fn is_charging(&self) -> bool {
        self.charging.get()
    }

    /// Buys the plan priced at `amount` and moves to the map.
    ///
    /// Any failure is shown to the user before it is returned. Nothing is
    /// persisted and the view does not change unless the charge succeeds.
    pub async fn process_plan(&self, amount: i64) -> Result<SubscriptionPlan, FlowError> {
        match self.run(amount).await {
            Ok(plan) => Ok(plan),
            Err(e) => {
                warn!("plan purchase for {amount} failed: {e}");
                self.presenter.show_error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn run(&self, amount: i64) -> Result<SubscriptionPlan, FlowError> {
        let plan = self
            .catalog
            .get(amount)
            .cloned()
            .ok_or(FlowError::UnknownPlan(amount))?;
        self.validator.validate_payment_amount(plan.amount)?;

        if self.charging.replace(true) {
            return Err(FlowError::PaymentInProgress);
        }
        self.presenter.show_loading();
        let _guard = ChargeGuard {
            charging: &self.charging,
            presenter: &*self.presenter,
        };

        debug!("charging {} for plan {}", plan.amount, plan.display_name);
        match compat::timeout(self.gateway_timeout, self.gateway.charge(plan.amount)).await {
            Ok(outcome) => outcome?,
            Err(Elapsed(after)) => return Err(GatewayError::TimedOut(after).into()),
        }

        self.store
            .set_subscription(plan.duration_months)
            .map_err(|e| FlowError::Persistence(format!("{e:#}")))?;
        info!(
            "subscribed to {} for {} months",
            plan.display_name, plan.duration_months
        );

        if let Err(TransitionCancelled(view)) = self.navigator.switch_view(ViewId::Map).await {
            debug!("post-payment transition to {view} was superseded");
        }
        Ok(plan)
    }
}
