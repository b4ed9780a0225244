//! This crate contains the shared domain of the estate client: the plan
//! catalog, user preferences, and the contracts (plus default
//! implementations) of the services the UI engine talks to.

pub mod payment_gateway;
pub mod plan;
pub mod prefs;
pub mod subscription_store;
pub mod validation;

pub type ApiError = anyhow::Error;
