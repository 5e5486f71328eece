//! Identity contexts for tests.

use tokio::sync::watch;

use crate::domain::IdentityState;
use crate::port::IdentityContext;

/// Identity that never changes, with an optional bearer token.
pub struct FixedIdentity {
    token: Option<String>,
    tx: watch::Sender<IdentityState>,
}

impl FixedIdentity {
    pub fn new(identity: IdentityState, token: Option<&str>) -> Self {
        let (tx, _) = watch::channel(identity);
        Self {
            token: token.map(ToOwned::to_owned),
            tx,
        }
    }

    /// Anonymous caller without credentials.
    pub fn anonymous() -> Self {
        Self::new(IdentityState::Anonymous, None)
    }
}

impl IdentityContext for FixedIdentity {
    fn credential(&self) -> Option<String> {
        self.token.clone()
    }

    fn identity(&self) -> IdentityState {
        self.tx.borrow().clone()
    }

    fn changes(&self) -> watch::Receiver<IdentityState> {
        self.tx.subscribe()
    }
}
