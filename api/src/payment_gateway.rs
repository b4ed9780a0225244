//! The contract of the remote payment gateway.

use std::time::Duration;
use thiserror::Error;

/// A failed charge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The gateway answered and refused the charge.
    #[error("payment declined: {0}")]
    Declined(String),
    /// The gateway could not be reached or failed internally.
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
    /// The gateway did not answer within the configured bound.
    #[error("payment gateway did not respond within {0:?}")]
    TimedOut(Duration),
}

/// A service that charges the user for a plan.
///
/// Callers keep at most one charge outstanding per flow.
pub trait PaymentGateway {
    /// Charges `amount` and resolves once the gateway has answered.
    async fn charge(&self, amount: i64) -> Result<(), GatewayError>;
}

impl<T: PaymentGateway> PaymentGateway for std::rc::Rc<T> {
    async fn charge(&self, amount: i64) -> Result<(), GatewayError> {
        (**self).charge(amount).await
    }
}
