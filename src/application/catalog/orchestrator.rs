//! Epoch-guarded controller behind the item listing.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::cycle::{self, CyclePlan};
use crate::domain::{FilterSpec, IdentityState, ItemsView, QueryMode, QueryOutcome};
use crate::port::{CatalogGateway, IdentityContext};

/// Tuning knobs for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Keep only the first N recommended items. Applied to the result,
    /// never to the request.
    pub recommendation_limit: Option<usize>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            recommendation_limit: Some(3),
        }
    }
}

/// Inputs that determine which query a cycle runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct CycleInputs {
    pub filter: FilterSpec,
    pub mode: QueryMode,
    pub identity: IdentityState,
}

#[derive(Debug, Default)]
struct ControlState {
    inputs: CycleInputs,
    /// Generation of the only cycle allowed to commit.
    epoch: u64,
    /// False until the first cycle has been triggered.
    started: bool,
    disposed: bool,
}

/// State shared between the controller and its in-flight cycles.
pub(super) struct Inner {
    pub(super) gateway: Arc<dyn CatalogGateway>,
    pub(super) options: OrchestratorOptions,
    state: Mutex<ControlState>,
    outcome: watch::Sender<QueryOutcome>,
    follower: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    /// Start a new cycle if `update` changes the inputs (or `force` is set).
    fn trigger(self: &Arc<Self>, force: bool, update: impl FnOnce(&mut CycleInputs)) {
        let mut state = self.state.lock();
        if state.disposed {
            return;
        }

        let mut next = state.inputs.clone();
        update(&mut next);
        if state.started && !force && next == state.inputs {
            debug!(epoch = state.epoch, "inputs unchanged, keeping current cycle");
            return;
        }

        state.inputs = next;
        state.started = true;
        state.epoch += 1;
        let epoch = state.epoch;

        debug!(
            epoch,
            mode = ?state.inputs.mode,
            filter = %state.inputs.filter,
            identity = ?state.inputs.identity,
            "starting fetch cycle"
        );

        // Items of the superseded cycle disappear before anything else runs.
        self.outcome.send_replace(QueryOutcome::Loading);

        let plan = cycle::plan(&state.inputs);
        match plan {
            CyclePlan::Wait => {
                debug!(epoch, "waiting for identity to resolve");
            }
            CyclePlan::Settle(outcome) => {
                self.outcome.send_replace(outcome);
            }
            CyclePlan::Fetch(request) => {
                drop(state);
                tokio::spawn(cycle::run(Arc::clone(self), epoch, request));
            }
        }
    }

    /// Publish `outcome` if `epoch` is still the current one.
    ///
    /// Returns false when the result was discarded.
    pub(super) fn commit(&self, epoch: u64, outcome: QueryOutcome) -> bool {
        let state = self.state.lock();
        if state.disposed || state.epoch != epoch {
            debug!(
                epoch,
                current = state.epoch,
                disposed = state.disposed,
                "discarding superseded result"
            );
            return false;
        }
        self.outcome.send_replace(outcome);
        true
    }

    /// True while `epoch` may still commit.
    pub(super) fn is_current(&self, epoch: u64) -> bool {
        let state = self.state.lock();
        !state.disposed && state.epoch == epoch
    }
}

/// Reactive controller that keeps `{items, loading, error}` in sync with the
/// selected filters, the display mode and the session identity.
///
/// Setters never fail and never block: they start a cycle (when the inputs
/// actually changed), publish [`QueryOutcome::Loading`] immediately and let the
/// gateway call finish in a spawned task. The last triggered cycle always
/// wins, whatever order the network answers in.
///
/// # Panics
///
/// Setters spawn onto the ambient Tokio runtime and panic outside of one.
pub struct ItemQueryOrchestrator {
    inner: Arc<Inner>,
}

impl ItemQueryOrchestrator {
    /// Create an idle orchestrator. Nothing is fetched until the first setter
    /// call or [`refresh`](Self::refresh).
    pub fn new(gateway: Arc<dyn CatalogGateway>, options: OrchestratorOptions) -> Self {
        let (outcome, _) = watch::channel(QueryOutcome::Loading);
        Self {
            inner: Arc::new(Inner {
                gateway,
                options,
                state: Mutex::new(ControlState::default()),
                outcome,
                follower: Mutex::new(None),
            }),
        }
    }

    /// Replace the filter wholesale.
    pub fn set_filter(&self, filter: FilterSpec) {
        self.inner.trigger(false, |inputs| inputs.filter = filter);
    }

    /// Switch between catalog listing and recommendations.
    pub fn set_mode(&self, mode: QueryMode) {
        self.inner.trigger(false, |inputs| inputs.mode = mode);
    }

    /// Record a new identity snapshot (login, logout, lookup finished).
    pub fn set_identity(&self, identity: IdentityState) {
        self.inner.trigger(false, |inputs| inputs.identity = identity);
    }

    /// Replace filter, mode and identity together. Starts at most one cycle.
    pub fn set_inputs(&self, filter: FilterSpec, mode: QueryMode, identity: IdentityState) {
        self.inner.trigger(false, |inputs| {
            *inputs = CycleInputs {
                filter,
                mode,
                identity,
            };
        });
    }

    /// Re-run the current query even though nothing changed (retry).
    pub fn refresh(&self) {
        self.inner.trigger(true, |_| {});
    }

    /// Track `identity` from now on: its current state is applied right away
    /// and every later change triggers a cycle.
    pub fn follow_identity(&self, identity: &dyn IdentityContext) {
        let mut changes = identity.changes();
        let current = changes.borrow_and_update().clone();
        self.set_identity(current);

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let next = changes.borrow_and_update().clone();
                inner.trigger(false, |inputs| inputs.identity = next);
            }
        });

        if let Some(previous) = self.inner.follower.lock().replace(task) {
            previous.abort();
        }
    }

    /// Current filter.
    #[must_use]
    pub fn filter(&self) -> FilterSpec {
        self.inner.state.lock().inputs.filter.clone()
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> QueryMode {
        self.inner.state.lock().inputs.mode
    }

    /// Generation of the newest cycle (0 before the first one).
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.inner.state.lock().epoch
    }

    /// Snapshot of the current outcome.
    #[must_use]
    pub fn outcome(&self) -> QueryOutcome {
        self.inner.outcome.borrow().clone()
    }

    /// Snapshot of the `{items, loading, error}` read model.
    #[must_use]
    pub fn view(&self) -> ItemsView {
        self.inner.outcome.borrow().view()
    }

    /// Subscribe to outcome changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryOutcome> {
        self.inner.outcome.subscribe()
    }

    /// Wait for the first outcome that is not [`QueryOutcome::Loading`].
    pub async fn settled(&self) -> QueryOutcome {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|outcome| !outcome.is_loading()).await;
        match settled {
            Ok(outcome) => outcome.clone(),
            Err(_) => self.outcome(),
        }
    }

    /// Tear the controller down. Pending cycles can no longer commit.
    pub fn dispose(&self) {
        {
            let mut state = self.inner.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.epoch += 1;
            debug!(epoch = state.epoch, "orchestrator disposed");
        }
        if let Some(task) = self.inner.follower.lock().take() {
            task.abort();
        }
    }

    /// True after [`dispose`](Self::dispose).
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.state.lock().disposed
    }
}

impl Drop for ItemQueryOrchestrator {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for ItemQueryOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ItemQueryOrchestrator")
            .field("inputs", &state.inputs)
            .field("epoch", &state.epoch)
            .field("disposed", &state.disposed)
            .finish_non_exhaustive()
    }
}
