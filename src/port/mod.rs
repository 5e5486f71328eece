//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            │  application::catalog        │
//!            │  (ItemQueryOrchestrator)     │
//!            └──────┬───────────────┬───────┘
//!                   │               │
//!                   ▼               ▼
//!         ┌────────────────┐  ┌──────────────────┐
//!         │ CatalogGateway │  │ IdentityContext  │
//!         │  (HTTP adapter)│  │ (session adapter)│
//!         └────────────────┘  └──────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`CatalogGateway`] - Read access to the remote catalog
//! - [`CatalogAdmin`] - Item and account administration
//! - [`IdentityContext`] - Current session subject and bearer credential

pub mod outbound;

pub use outbound::admin::CatalogAdmin;
pub use outbound::catalog::{CatalogGateway, GatewayResult};
pub use outbound::identity::IdentityContext;
