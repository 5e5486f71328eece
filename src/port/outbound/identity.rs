//! Identity port: who is logged in and which credential to present.
//!
//! The session itself (login, token refresh) is owned elsewhere. The client
//! only reads the current state and follows its changes.

use tokio::sync::watch;

use crate::domain::IdentityState;

/// Read-only view of the current session.
pub trait IdentityContext: Send + Sync {
    /// Bearer credential to attach to outbound requests, if any.
    fn credential(&self) -> Option<String>;

    /// Current identity snapshot.
    fn identity(&self) -> IdentityState;

    /// Receiver that observes every identity change.
    fn changes(&self) -> watch::Receiver<IdentityState>;
}
