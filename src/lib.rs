//! vkm-catalog - Terminal client for the VKM choice-module catalog.
//!
//! The heart of the crate is [`ItemQueryOrchestrator`](application::catalog::ItemQueryOrchestrator):
//! it turns the selected filters, the listing/recommendation mode and the
//! session identity into gateway calls, drops results of superseded calls and
//! publishes a stable `{items, loading, error}` view.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Filters, catalog items, user accounts, query outcomes
//! - [`port`] - Gateway, admin and identity traits
//! - [`application`] - The epoch-guarded query orchestrator
//! - [`adapter`] - REST gateway, session holder and the `vkm` CLI
//! - [`infrastructure`] - Configuration and the composition root
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Export [`testkit`] (scripted gateway, builders) for integration tests
//!
//! # Example
//!
//! ```no_run
//! use vkm_catalog::domain::{FilterSpec, QueryMode};
//! use vkm_catalog::infrastructure::bootstrap::CatalogRuntime;
//! use vkm_catalog::infrastructure::config::settings::Config;
//!
//! # async fn run() -> vkm_catalog::error::Result<()> {
//! let runtime = CatalogRuntime::build(Config::load("config.toml")?)?;
//! let filter = FilterSpec::clear().with_location(Some("Breda"));
//! let orchestrator = runtime.orchestrator(filter, QueryMode::Listing);
//! let outcome = orchestrator.settled().await;
//! println!("{} modules", outcome.items().len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
