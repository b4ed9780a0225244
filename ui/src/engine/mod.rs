//! The application state and flow-control engine.
//!
//! Nothing in here renders anything. The Dioxus layer drives it through
//! [`controller::EstateApp`] and receives its side effects through the two
//! sinks declared in [`presentation`].

pub mod controller;
pub mod coordinate;
pub mod input;
pub mod navigation;
pub mod presentation;
pub mod subscription_flow;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
