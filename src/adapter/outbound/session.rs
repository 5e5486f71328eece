//! In-process session holder.
//!
//! Stands in for the authentication layer: it stores the bearer token and
//! broadcasts identity changes to whoever follows them.

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::info;

use crate::domain::{IdentityState, SubjectId};
use crate::port::IdentityContext;

/// Mutable session shared by the gateway (credential) and the orchestrator
/// (identity changes).
pub struct SessionIdentity {
    token: RwLock<Option<String>>,
    state: watch::Sender<IdentityState>,
}

impl SessionIdentity {
    /// Session whose lookup has not finished yet.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(IdentityState::Resolving);
        Self {
            token: RwLock::new(None),
            state,
        }
    }

    /// Session known to have no logged-in user.
    #[must_use]
    pub fn anonymous() -> Self {
        let session = Self::new();
        session.logout();
        session
    }

    /// Session already logged in as `subject`.
    #[must_use]
    pub fn authenticated(subject: SubjectId, token: impl Into<String>) -> Self {
        let session = Self::new();
        session.login(subject, token);
        session
    }

    /// Resolved session from externally supplied values.
    ///
    /// A subject makes the session authenticated; the token, if any, is sent
    /// as bearer credential either way.
    #[must_use]
    pub fn resolved(subject: Option<SubjectId>, token: Option<String>) -> Self {
        let session = Self::new();
        *session.token.write() = token;
        let state = subject.map_or(IdentityState::Anonymous, IdentityState::Authenticated);
        session.state.send_replace(state);
        session
    }

    /// Log in as `subject`. The token is stored before followers are notified,
    /// so the first request of the resulting cycle already carries it.
    pub fn login(&self, subject: SubjectId, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
        info!(subject = %subject, "session authenticated");
        self.state.send_replace(IdentityState::Authenticated(subject));
    }

    /// Drop the credential and become anonymous.
    pub fn logout(&self) {
        *self.token.write() = None;
        self.state.send_replace(IdentityState::Anonymous);
    }

    /// Go back to the unresolved state, e.g. while a token is refreshed.
    pub fn mark_resolving(&self) {
        self.state.send_replace(IdentityState::Resolving);
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityContext for SessionIdentity {
    fn credential(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn identity(&self) -> IdentityState {
        self.state.borrow().clone()
    }

    fn changes(&self) -> watch::Receiver<IdentityState> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdentity")
            .field("identity", &*self.state.borrow())
            .field("has_token", &self.token.read().is_some())
            .finish()
    }
}
