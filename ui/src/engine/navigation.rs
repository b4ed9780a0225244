//! Delayed, cancellable view transitions.
//!
//! A transition shows the loading indicator right away and swaps the
//! visible view only after a fixed delay. Requesting another view during
//! that delay supersedes the earlier request: it never completes.

use crate::app_state::AppState;
use crate::compat;
use crate::engine::presentation::PresentationSink;
use crate::engine::view::ViewId;
use dioxus_logger::tracing::{debug, info};
use futures::future::{AbortHandle, Abortable, Aborted, LocalBoxFuture};
use futures::FutureExt;
use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::str::FromStr;
use std::task::{Context, Poll};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("unknown view: {0:?}")]
    InvalidView(String),
}

/// A transition to the contained view was superseded or cancelled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("transition to {0} was cancelled")]
pub struct TransitionCancelled(pub ViewId);

/// Per-view setup that runs each time a transition into a view completes.
pub trait ViewInitializer {
    fn on_enter(&self, view: ViewId);
}

/// A requested view change.
///
/// Nothing happens until it is polled, so it must be awaited or spawned.
/// Dropping it abandons the change.
#[must_use = "a transition does nothing unless awaited or spawned"]
pub struct Transition {
    id: u64,
    target: ViewId,
    state: AppState,
    presenter: Rc<dyn PresentationSink>,
    inner: LocalBoxFuture<'static, Result<(), Aborted>>,
}

impl Future for Transition {
    type Output = Result<ViewId, TransitionCancelled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let target = self.target;
        self.inner
            .as_mut()
            .poll(cx)
            .map(|outcome| outcome.map(|()| target).map_err(|Aborted| TransitionCancelled(target)))
    }
}

impl Drop for Transition {
    fn drop(&mut self) {
        // Still pending means it was dropped mid-delay rather than completed
        // or superseded. Nobody else will clear the indicator in that case.
        if self.state.finish_transition(self.id) && self.state.pending_transitions() == 0 {
            debug!("transition to {} abandoned", self.target);
            self.presenter.hide_loading();
        }
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

pub struct Navigator {
    state: AppState,
    presenter: Rc<dyn PresentationSink>,
    initializer: Rc<dyn ViewInitializer>,
    delay: Duration,
    next_id: Cell<u64>,
}

impl Navigator {
    pub fn new(
        state: AppState,
        presenter: Rc<dyn PresentationSink>,
        initializer: Rc<dyn ViewInitializer>,
        delay: Duration,
    ) -> Self {
        Self {
            state,
            presenter,
            initializer,
            delay,
            next_id: Cell::new(0),
        }
    }

    pub fn current_view(&self) -> ViewId {
        self.state.current_view()
    }

    /// Starts a transition to `target`, superseding any transition in flight.
    pub fn switch_view(&self, target: ViewId) -> Transition {
        let superseded = self.state.abort_transitions();
        if superseded > 0 {
            debug!("{superseded} pending transition(s) superseded by {target}");
        }
        self.presenter.show_loading();

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let (handle, registration) = AbortHandle::new_pair();
        self.state.track_transition(id, handle);

        let effect = {
            let state = self.state.clone();
            let presenter = self.presenter.clone();
            let initializer = self.initializer.clone();
            let delay = self.delay;
            async move {
                compat::sleep(delay).await;
                if !state.finish_transition(id) {
                    return;
                }
                state.update(|s| s.current_view = target);
                presenter.set_active_view(target);
                initializer.on_enter(target);
                presenter.hide_loading();
                info!("switched to {target} view");
            }
        };

        Transition {
            id,
            target,
            state: self.state.clone(),
            presenter: self.presenter.clone(),
            inner: Abortable::new(effect, registration).boxed_local(),
        }
    }

    /// Like [`Navigator::switch_view`] but takes a view id as text.
    ///
    /// An unknown id fails without touching anything in flight.
    pub fn switch_to(&self, id: &str) -> Result<Transition, NavigationError> {
        let target = ViewId::from_str(id).map_err(|_| NavigationError::InvalidView(id.to_owned()))?;
        Ok(self.switch_view(target))
    }

    /// Aborts every transition in flight. Returns how many there were.
    pub fn cancel_pending(&self) -> usize {
        let cancelled = self.state.abort_transitions();
        if cancelled > 0 {
            self.presenter.hide_loading();
            debug!("cancelled {cancelled} pending transition(s)");
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{CountingInitializer, RecordingSink, SinkEvent};

    const DELAY: Duration = Duration::from_millis(600);

    struct Harness {
        state: AppState,
        sink: Rc<RecordingSink>,
        init: Rc<CountingInitializer>,
        nav: Navigator,
    }

    fn harness() -> Harness {
        let state = AppState::new();
        let sink = Rc::new(RecordingSink::default());
        let init = Rc::new(CountingInitializer::default());
        let nav = Navigator::new(state.clone(), sink.clone(), init.clone(), DELAY);
        Harness {
            state,
            sink,
            init,
            nav,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn view_changes_only_after_the_delay() {
        let h = harness();
        let mut transition = h.nav.switch_view(ViewId::Subscription);

        let early = tokio::time::timeout(Duration::from_millis(599), &mut transition).await;
        assert!(early.is_err());
        assert_eq!(h.state.current_view(), ViewId::Auth);
        assert_eq!(h.sink.events(), vec![SinkEvent::ShowLoading]);

        assert_eq!(transition.await, Ok(ViewId::Subscription));
        assert_eq!(h.state.current_view(), ViewId::Subscription);
        assert_eq!(
            h.sink.events(),
            vec![
                SinkEvent::ShowLoading,
                SinkEvent::ActiveView(ViewId::Subscription),
                SinkEvent::HideLoading,
            ]
        );
        assert_eq!(h.state.pending_transitions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_switches_complete_once() {
        let h = harness();
        let first = h.nav.switch_view(ViewId::Map);
        let second = h.nav.switch_view(ViewId::Map);

        let (first, second) = futures::join!(first, second);
        assert_eq!(first, Err(TransitionCancelled(ViewId::Map)));
        assert_eq!(second, Ok(ViewId::Map));
        assert_eq!(h.init.entries(ViewId::Map), 1);
        assert_eq!(h.sink.count(&SinkEvent::ActiveView(ViewId::Map)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_target_never_shows() {
        let h = harness();
        let stale = h.nav.switch_view(ViewId::Subscription);
        tokio::time::sleep(Duration::from_millis(300)).await;
        let fresh = h.nav.switch_view(ViewId::Map);

        assert_eq!(stale.await, Err(TransitionCancelled(ViewId::Subscription)));
        assert_eq!(fresh.await, Ok(ViewId::Map));
        assert_eq!(h.sink.count(&SinkEvent::ActiveView(ViewId::Subscription)), 0);
        assert_eq!(h.init.entries(ViewId::Subscription), 0);
        assert_eq!(h.state.current_view(), ViewId::Map);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_id_is_rejected_without_side_effects() {
        let h = harness();
        let pending = h.nav.switch_to("map").unwrap();

        let err = h.nav.switch_to("settings").unwrap_err();
        assert_eq!(err, NavigationError::InvalidView("settings".into()));
        assert_eq!(h.state.pending_transitions(), 1);
        assert_eq!(h.sink.count(&SinkEvent::ShowLoading), 1);

        assert_eq!(pending.await, Ok(ViewId::Map));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_transition_abandons_it() {
        let h = harness();
        let transition = h.nav.switch_view(ViewId::Map);
        assert_eq!(h.state.pending_transitions(), 1);

        drop(transition);
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(h.state.pending_transitions(), 0);
        assert_eq!(h.state.current_view(), ViewId::Auth);
        assert_eq!(h.sink.events().last(), Some(&SinkEvent::HideLoading));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_pending_clears_everything() {
        let h = harness();
        let transition = h.nav.switch_view(ViewId::Subscription);

        assert_eq!(h.nav.cancel_pending(), 1);
        assert_eq!(h.nav.cancel_pending(), 0);
        assert_eq!(transition.await, Err(TransitionCancelled(ViewId::Subscription)));
        assert_eq!(h.state.current_view(), ViewId::Auth);
        assert_eq!(h.sink.count(&SinkEvent::HideLoading), 1);
    }
}
