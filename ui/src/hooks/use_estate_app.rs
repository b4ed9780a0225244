use crate::app_state_mut::AppStateMut;
use crate::engine::controller::EstateApp;
use crate::gateway::SimulatedGateway;
use dioxus::prelude::*;
use std::rc::Rc;

/// The engine instance shared by every screen.
pub type Estate = Rc<EstateApp<SimulatedGateway>>;

/// Returns the running engine provided by the app root.
pub fn use_estate_app() -> Estate {
    use_context::<Estate>()
}

pub fn use_app_state_mut() -> AppStateMut {
    use_context::<AppStateMut>()
}
