//! Wires the engine together and exposes what the screens can ask of it.

use crate::app_state::{AppState, PlateInput};
use crate::engine::coordinate::{CoordinatePlacer, Placement};
use crate::engine::input::parse_int_prefix;
use crate::engine::navigation::{Navigator, Transition};
use crate::engine::presentation::{MapWidget, PresentationSink};
use crate::engine::subscription_flow::{FlowError, SubscriptionFlow};
use crate::engine::view::ViewId;
use api::payment_gateway::PaymentGateway;
use api::plan::{PlanCatalog, SubscriptionPlan};
use api::prefs::app_prefs::AppPrefs;
use api::subscription_store::SubscriptionStore;
use api::validation::Validator;
use dioxus_logger::tracing::{debug, info};
use std::cell::Cell;
use std::rc::Rc;

/// Everything the engine talks to but does not own.
pub struct Collaborators<G> {
    pub presenter: Rc<dyn PresentationSink>,
    pub map: Rc<dyn MapWidget>,
    pub store: Rc<dyn SubscriptionStore>,
    pub validator: Rc<dyn Validator>,
    pub gateway: G,
}

/// One running instance of the estate client.
pub struct EstateApp<G> {
    state: AppState,
    presenter: Rc<dyn PresentationSink>,
    store: Rc<dyn SubscriptionStore>,
    validator: Rc<dyn Validator>,
    navigator: Rc<Navigator>,
    placer: Rc<CoordinatePlacer>,
    flow: SubscriptionFlow<G>,
    initialized: Cell<bool>,
    disposed: Cell<bool>,
}

impl<G: PaymentGateway> EstateApp<G> {
    pub fn new(prefs: &AppPrefs, catalog: PlanCatalog, collaborators: Collaborators<G>) -> Self {
        let Collaborators {
            presenter,
            map,
            store,
            validator,
            gateway,
        } = collaborators;

        let state = AppState::new();
        let placer = Rc::new(CoordinatePlacer::new(state.clone(), map));
        let navigator = Rc::new(Navigator::new(
            state.clone(),
            presenter.clone(),
            placer.clone(),
            prefs.transition_delay(),
        ));
        let flow = SubscriptionFlow::new(
            catalog,
            validator.clone(),
            gateway,
            store.clone(),
            navigator.clone(),
            presenter.clone(),
            prefs.gateway_timeout(),
        );

        Self {
            state,
            presenter,
            store,
            validator,
            navigator,
            placer,
            flow,
            initialized: Cell::new(false),
            disposed: Cell::new(false),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &PlanCatalog {
        self.flow.catalog()
    }

    pub fn current_view(&self) -> ViewId {
        self.state.current_view()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Shows the starting view, then skips straight to the map for
    /// returning subscribers. Only the first call does anything.
    pub fn init(&self) -> Option<Transition> {
        if self.initialized.replace(true) {
            return None;
        }
        self.presenter.set_active_view(self.state.current_view());
        if self.store.has_valid_subscription() {
            info!("valid subscription found, opening the map");
            Some(self.navigator.switch_view(ViewId::Map))
        } else {
            None
        }
    }

    /// Cancels anything in flight. Safe to call more than once.
    pub fn dispose(&self) {
        if !self.disposed.replace(true) {
            debug!("disposing estate app");
        }
        self.navigator.cancel_pending();
    }

    /// Handles the sign-in form.
    pub fn submit_credentials(&self, phone: &str) -> Option<Transition> {
        if self.validator.validate_phone(phone) {
            Some(self.navigator.switch_view(ViewId::Subscription))
        } else {
            self.presenter.show_error("invalid phone number");
            None
        }
    }

    /// Handles a click on a plan whose price attribute reads `raw`.
    ///
    /// A missing or zero price is ignored.
    pub async fn select_plan(&self, raw: &str) -> Result<Option<SubscriptionPlan>, FlowError> {
        match parse_int_prefix(raw) {
            None | Some(0) => {
                debug!("ignoring plan selection {raw:?}");
                Ok(None)
            }
            Some(amount) => self.flow.process_plan(amount).await.map(Some),
        }
    }

    pub async fn process_plan(&self, amount: i64) -> Result<SubscriptionPlan, FlowError> {
        self.flow.process_plan(amount).await
    }

    pub fn set_plate_input(&self, main: &str, sub: &str) {
        self.state.update(|s| {
            s.plate_input = PlateInput {
                main: main.to_owned(),
                sub: sub.to_owned(),
            }
        });
    }

    /// Places the typed plate on the map. Does nothing off the map view.
    pub fn search_plate(&self) -> Placement {
        if self.state.current_view() != ViewId::Map {
            return Placement::Skipped;
        }
        self.placer.place_from_input()
    }

    pub fn on_captcha_success(&self) {
        self.presenter.set_captcha_hint("");
    }

    pub fn on_captcha_error(&self) {
        self.presenter.show_error("captcha verification failed");
    }
}
