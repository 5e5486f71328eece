//! Composition root: wires config, session, gateway and orchestrator.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::http::HttpCatalogGateway;
use crate::adapter::outbound::session::SessionIdentity;
use crate::application::catalog::ItemQueryOrchestrator;
use crate::domain::{FilterSpec, QueryMode, SubjectId};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{CatalogAdmin, CatalogGateway, IdentityContext};

/// Long-lived components shared by every command.
pub struct CatalogRuntime {
    config: Config,
    session: Arc<SessionIdentity>,
    gateway: Arc<HttpCatalogGateway>,
}

impl CatalogRuntime {
    /// Build the runtime from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP gateway cannot be constructed.
    pub fn build(config: Config) -> Result<Self> {
        let session = Arc::new(SessionIdentity::resolved(
            config.session.subject.clone().map(SubjectId::new),
            config.session.token.clone(),
        ));
        let identity: Arc<dyn IdentityContext> = session.clone();
        let gateway = Arc::new(HttpCatalogGateway::new(
            &config.api.base_url,
            config.api.timeout(),
            identity,
        )?);

        debug!(
            base_url = %config.api.base_url,
            identity = ?session.identity(),
            "catalog runtime ready"
        );
        Ok(Self {
            config,
            session,
            gateway,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The session the gateway reads its credential from.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionIdentity> {
        &self.session
    }

    #[must_use]
    pub fn gateway(&self) -> Arc<dyn CatalogGateway> {
        self.gateway.clone()
    }

    #[must_use]
    pub fn admin(&self) -> Arc<dyn CatalogAdmin> {
        self.gateway.clone()
    }

    /// Orchestrator running its first cycle for `filter` and `mode`, then
    /// following this runtime's session.
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn orchestrator(&self, filter: FilterSpec, mode: QueryMode) -> ItemQueryOrchestrator {
        let orchestrator = ItemQueryOrchestrator::new(
            self.gateway(),
            self.config.catalog.orchestrator_options(),
        );
        orchestrator.set_inputs(filter, mode, self.session.identity());
        orchestrator.follow_identity(self.session.as_ref());
        orchestrator
    }
}
