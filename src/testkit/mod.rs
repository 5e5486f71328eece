//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`gateway`] - [`ScriptedGateway`](gateway::ScriptedGateway), a
//!   [`CatalogGateway`](crate::port::CatalogGateway) whose calls stay pending
//!   until the test answers them, in any order.
//! - [`domain`] - Builders for catalog items, principals and filters.
//! - [`identity`] - Fixed identity contexts.

pub mod domain;
pub mod gateway;
pub mod identity;

/// Let spawned tasks on the current-thread test runtime run to completion.
pub async fn drain_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
