//! Mock [`CatalogGateway`] with test-controlled completion.
//!
//! Every gateway call is parked as a [`PendingCall`] on a [`CallQueue`]. The
//! test pulls calls off the queue and answers them whenever (and in whatever
//! order) it likes, which is what epoch and teardown tests need.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{CatalogItem, FilterSpec, ItemId, Principal, SubjectId};
use crate::error::GatewayError;
use crate::port::{CatalogGateway, GatewayResult};

/// Which gateway operation was invoked, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKind {
    Filter(FilterSpec),
    All,
    Ids(Vec<ItemId>),
    Profile(SubjectId),
}

enum Reply {
    Items(GatewayResult<Vec<CatalogItem>>),
    Principal(GatewayResult<Principal>),
}

/// A gateway call waiting for the test to answer it.
///
/// Dropping it unanswered makes the call fail with a network error.
pub struct PendingCall {
    kind: CallKind,
    reply: oneshot::Sender<Reply>,
}

impl PendingCall {
    pub fn kind(&self) -> &CallKind {
        &self.kind
    }

    /// Answer an item-returning call.
    pub fn resolve_items(self, items: Vec<CatalogItem>) {
        let _ = self.reply.send(Reply::Items(Ok(items)));
    }

    /// Answer a profile call.
    pub fn resolve_principal(self, principal: Principal) {
        let _ = self.reply.send(Reply::Principal(Ok(principal)));
    }

    /// Fail the call with `error`, whatever its kind.
    pub fn fail(self, error: GatewayError) {
        let reply = match self.kind {
            CallKind::Profile(_) => Reply::Principal(Err(error)),
            _ => Reply::Items(Err(error)),
        };
        let _ = self.reply.send(reply);
    }
}

/// Receiving end of a [`ScriptedGateway`].
pub struct CallQueue {
    rx: mpsc::UnboundedReceiver<PendingCall>,
}

impl CallQueue {
    /// Wait for the next call.
    ///
    /// # Panics
    ///
    /// Panics if the gateway was dropped.
    pub async fn next(&mut self) -> PendingCall {
        self.rx.recv().await.expect("scripted gateway dropped")
    }

    /// Next call if one is already queued.
    pub fn try_next(&mut self) -> Option<PendingCall> {
        self.rx.try_recv().ok()
    }
}

/// Gateway whose calls complete only when the test says so.
#[derive(Clone)]
pub struct ScriptedGateway {
    tx: mpsc::UnboundedSender<PendingCall>,
    calls: Arc<AtomicU32>,
}

impl ScriptedGateway {
    pub fn new() -> (Self, CallQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                calls: Arc::new(AtomicU32::new(0)),
            },
            CallQueue { rx },
        )
    }

    /// Total number of gateway calls made so far.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn park(&self, kind: CallKind) -> Option<Reply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (reply, rx) = oneshot::channel();
        self.tx.send(PendingCall { kind, reply }).ok()?;
        rx.await.ok()
    }

    async fn items(&self, kind: CallKind) -> GatewayResult<Vec<CatalogItem>> {
        match self.park(kind).await {
            Some(Reply::Items(result)) => result,
            Some(Reply::Principal(_)) => Err(GatewayError::Decode(
                "scripted principal for an item call".into(),
            )),
            None => Err(GatewayError::network("scripted call dropped")),
        }
    }
}

#[async_trait]
impl CatalogGateway for ScriptedGateway {
    async fn list_by_filter(&self, spec: &FilterSpec) -> GatewayResult<Vec<CatalogItem>> {
        self.items(CallKind::Filter(spec.clone())).await
    }

    async fn list_all(&self) -> GatewayResult<Vec<CatalogItem>> {
        self.items(CallKind::All).await
    }

    async fn list_by_ids(&self, ids: &[ItemId]) -> GatewayResult<Vec<CatalogItem>> {
        self.items(CallKind::Ids(ids.to_vec())).await
    }

    async fn fetch_principal_profile(&self, subject: &SubjectId) -> GatewayResult<Principal> {
        match self.park(CallKind::Profile(subject.clone())).await {
            Some(Reply::Principal(result)) => result,
            Some(Reply::Items(_)) => Err(GatewayError::Decode(
                "scripted items for a profile call".into(),
            )),
            None => Err(GatewayError::network("scripted call dropped")),
        }
    }
}
