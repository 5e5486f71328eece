//! Infrastructure configuration modules.

pub mod api;
pub mod catalog;
pub mod logging;
pub mod settings;
