//! The view-model store.

use std::sync::{PoisonError, RwLock};

use tokio::sync::watch;
use tracing::debug;

use nimbus_core::types::FolderId;

use crate::state::{Action, Epoch, ViewState, reduce};

/// Exclusive owner of [`ViewState`].
///
/// Everything outside this store either reads snapshots, follows the
/// watch channel, or submits actions; nothing mutates the state
/// directly. Dispatch is synchronous — the lock is held only for the
/// reduce step, never across an await point.
#[derive(Debug)]
pub struct ViewStore {
    state: RwLock<ViewState>,
    tx: watch::Sender<ViewState>,
    /// Retained so the channel always has a live receiver: `watch::Sender::send`
    /// is a silent no-op when the receiver count is zero, which would drop any
    /// dispatch made before an external subscriber attaches.
    _keep: watch::Receiver<ViewState>,
}

impl ViewStore {
    /// Creates a store for a freshly mounted view.
    pub fn new(folder_id: Option<FolderId>) -> Self {
        let initial = ViewState::initial(folder_id);
        let (tx, _rx) = watch::channel(initial.clone());
        Self {
            state: RwLock::new(initial),
            tx,
            _keep: _rx,
        }
    }

    /// The current state.
    pub fn snapshot(&self) -> ViewState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The current `(folder, generation)` pair.
    pub fn epoch(&self) -> Epoch {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .epoch()
    }

    /// Follow every state change. The receiver always observes the
    /// latest state; intermediate states may coalesce.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    /// Apply an action unconditionally.
    pub fn dispatch(&self, action: Action) {
        let next = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let next = reduce(&state, &action);
            *state = next.clone();
            next
        };
        let _ = self.tx.send(next);
    }

    /// Apply an action only if the store is still on `epoch`.
    ///
    /// This is the stale-dispatch guard: every result produced by async
    /// work carries the epoch it was started under, and results from a
    /// superseded folder or generation are discarded here, silently.
    pub fn dispatch_if(&self, epoch: Epoch, action: Action) -> bool {
        let next = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if state.epoch() != epoch {
                debug!(
                    stale_generation = epoch.generation,
                    current_generation = state.generation,
                    "Discarding stale dispatch"
                );
                return false;
            }
            let next = reduce(&state, &action);
            *state = next.clone();
            next
        };
        let _ = self.tx.send(next);
        true
    }
}
