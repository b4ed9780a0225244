//! The single mutable state record shared by the engine's components.

use crate::engine::coordinate::PlatePair;
use crate::engine::presentation::MarkerHandle;
use crate::engine::view::ViewId;
use futures::future::AbortHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// The raw text of the two plate fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlateInput {
    pub main: String,
    pub sub: String,
}

#[derive(Debug, Default)]
pub struct AppStateData {
    /// The view the user is looking at. Only a completed transition changes it.
    pub current_view: ViewId,
    /// The plate pair whose marker is on the map, if any.
    pub last_placed: Option<PlatePair>,
    pub plate_input: PlateInput,
    /// Set once the map has received its initial overview.
    pub map_ready: bool,
    pub marker: Option<MarkerHandle>,
    /// Transitions requested but neither completed nor cancelled.
    pending: Vec<(u64, AbortHandle)>,
}

/// A cheap handle to the engine state.
///
/// Clones share the same record. The engine runs on one thread, so borrows
/// are short and never held across an `.await` or a collaborator call.
#[derive(Clone, Debug, Default)]
pub struct AppState(Rc<RefCell<AppStateData>>);

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_view(&self) -> ViewId {
        self.read(|s| s.current_view)
    }

    pub fn last_placed(&self) -> Option<PlatePair> {
        self.read(|s| s.last_placed)
    }

    pub fn plate_input(&self) -> PlateInput {
        self.read(|s| s.plate_input.clone())
    }

    /// Number of transitions still in flight.
    pub fn pending_transitions(&self) -> usize {
        self.read(|s| s.pending.len())
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&AppStateData) -> R) -> R {
        f(&self.0.borrow())
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut AppStateData) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub(crate) fn track_transition(&self, id: u64, handle: AbortHandle) {
        self.update(|s| s.pending.push((id, handle)));
    }

    /// Forgets transition `id`. Returns whether it was still pending.
    pub(crate) fn finish_transition(&self, id: u64) -> bool {
        self.update(|s| {
            let before = s.pending.len();
            s.pending.retain(|(pending_id, _)| *pending_id != id);
            s.pending.len() != before
        })
    }

    /// Aborts and forgets every pending transition, returning how many there were.
    pub(crate) fn abort_transitions(&self) -> usize {
        let aborted = self.update(|s| std::mem::take(&mut s.pending));
        for (_, handle) in &aborted {
            handle.abort();
        }
        aborted.len()
    }
}
