//! A stand-in payment gateway that answers after a fixed latency.

use crate::compat;
use api::payment_gateway::{GatewayError, PaymentGateway};
use api::prefs::app_prefs::AppPrefs;
use dioxus_logger::tracing::info;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedGateway {
    latency: Duration,
    decline: bool,
}

impl SimulatedGateway {
    pub fn new(latency: Duration, decline: bool) -> Self {
        Self { latency, decline }
    }

    pub fn from_prefs(prefs: &AppPrefs) -> Self {
        Self::new(prefs.gateway_latency(), prefs.simulate_payment_failure)
    }
}

impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, amount: i64) -> Result<(), GatewayError> {
        compat::sleep(self.latency).await;
        if self.decline {
            return Err(GatewayError::Declined("transaction failed".to_string()));
        }
        info!("simulated charge of {amount} approved");
        Ok(())
    }
}
