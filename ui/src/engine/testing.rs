//! Recording fakes for the engine's collaborators.

use crate::compat;
use crate::engine::navigation::ViewInitializer;
use crate::engine::presentation::{GeoPoint, MapWidget, MarkerHandle, PresentationSink};
use crate::engine::view::ViewId;
use api::payment_gateway::{GatewayError, PaymentGateway};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    ShowLoading,
    HideLoading,
    Error(String),
    ActiveView(ViewId),
    CaptchaHint(String),
}

#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: &SinkEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Error(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether every `ShowLoading` has been matched by a later `HideLoading`.
    pub fn loading_cleared(&self) -> bool {
        let mut shown = false;
        for e in self.events.borrow().iter() {
            match e {
                SinkEvent::ShowLoading => shown = true,
                SinkEvent::HideLoading => shown = false,
                _ => {}
            }
        }
        !shown
    }

    fn push(&self, event: SinkEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PresentationSink for RecordingSink {
    fn show_loading(&self) {
        self.push(SinkEvent::ShowLoading);
    }

    fn hide_loading(&self) {
        self.push(SinkEvent::HideLoading);
    }

    fn show_error(&self, message: &str) {
        self.push(SinkEvent::Error(message.to_owned()));
    }

    fn set_active_view(&self, view: ViewId) {
        self.push(SinkEvent::ActiveView(view));
    }

    fn set_captcha_hint(&self, hint: &str) {
        self.push(SinkEvent::CaptchaHint(hint.to_owned()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    SetView(GeoPoint, u8),
    Place(GeoPoint, String),
    Remove(MarkerHandle),
}

#[derive(Default)]
pub struct RecordingMap {
    calls: RefCell<Vec<MapCall>>,
    next_handle: Cell<u64>,
}

impl RecordingMap {
    pub fn calls(&self) -> Vec<MapCall> {
        self.calls.borrow().clone()
    }

    pub fn placements(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, MapCall::Place(..)))
            .count()
    }
}

impl MapWidget for RecordingMap {
    fn set_view(&self, point: GeoPoint, zoom: u8) {
        self.calls.borrow_mut().push(MapCall::SetView(point, zoom));
    }

    fn place_marker(&self, point: GeoPoint, label: &str) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.calls.borrow_mut().push(MapCall::Place(point, label.to_owned()));
        handle
    }

    fn remove_marker(&self, handle: MarkerHandle) {
        self.calls.borrow_mut().push(MapCall::Remove(handle));
    }
}

/// A gateway that answers after `latency` with a fixed outcome.
pub struct FakeGateway {
    outcome: Result<(), GatewayError>,
    latency: Duration,
    charges: RefCell<Vec<i64>>,
}

impl FakeGateway {
    pub fn approving() -> Self {
        Self::answering(Ok(()))
    }

    pub fn declining(reason: &str) -> Self {
        Self::answering(Err(GatewayError::Declined(reason.to_owned())))
    }

    pub fn answering(outcome: Result<(), GatewayError>) -> Self {
        Self {
            outcome,
            latency: Duration::from_millis(100),
            charges: RefCell::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn charges(&self) -> Vec<i64> {
        self.charges.borrow().clone()
    }
}

impl PaymentGateway for FakeGateway {
    async fn charge(&self, amount: i64) -> Result<(), GatewayError> {
        self.charges.borrow_mut().push(amount);
        compat::sleep(self.latency).await;
        self.outcome.clone()
    }
}

#[derive(Default)]
pub struct CountingInitializer {
    entries: RefCell<HashMap<ViewId, usize>>,
}

impl CountingInitializer {
    pub fn entries(&self, view: ViewId) -> usize {
        self.entries.borrow().get(&view).copied().unwrap_or(0)
    }
}

impl ViewInitializer for CountingInitializer {
    fn on_enter(&self, view: ViewId) {
        *self.entries.borrow_mut().entry(view).or_default() += 1;
    }
}
