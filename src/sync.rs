//! Load/save policy between `PreferenceState` and the store
//!
//! Loading happens once, synchronously, before the UI comes up. Saves are
//! fire-and-forget: they run on the runtime's blocking pool so a slow store
//! never stalls a frame, and a failed write is logged rather than surfaced.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::state::PreferenceState;
use crate::store::SyncStore;

pub struct StateSync {
    store: Arc<dyn SyncStore>,
    runtime: Handle,
}

impl StateSync {
    pub fn new(store: Arc<dyn SyncStore>, runtime: Handle) -> Self {
        Self { store, runtime }
    }

    /// Read the store once and merge whatever it holds over the defaults.
    /// An unreadable store is first-run territory, not a fatal error.
    pub fn load(&self) -> PreferenceState {
        match self.store.get_all() {
            Ok(snapshot) => {
                let state = PreferenceState::from_snapshot(&snapshot);
                info!(store = %self.store.describe(), "Preference state loaded");
                state
            }
            Err(err) => {
                warn!(
                    store = %self.store.describe(),
                    error = ?err,
                    "Could not read persisted state, starting from defaults"
                );
                PreferenceState::default()
            }
        }
    }

    /// Persist the full current state in the background. Callers do not
    /// wait for completion; the returned handle exists so tests can.
    pub fn save(&self, state: &PreferenceState) -> JoinHandle<()> {
        let snapshot = state.to_snapshot();
        let store = Arc::clone(&self.store);
        self.runtime.spawn_blocking(move || {
            if let Err(err) = store.set_many(snapshot) {
                error!(
                    store = %store.describe(),
                    error = ?err,
                    "Failed to persist preference state"
                );
            }
        })
    }
}
