//! Item query orchestration.
//!
//! [`ItemQueryOrchestrator`] turns filter, mode and identity changes into
//! gateway calls and publishes a single [`QueryOutcome`](crate::domain::QueryOutcome).
//! Every cycle is tagged with an epoch; only the newest epoch may commit.

mod cycle;
mod orchestrator;

pub use orchestrator::{ItemQueryOrchestrator, OrchestratorOptions};
