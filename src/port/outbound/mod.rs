//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod admin;
pub mod catalog;
pub mod identity;
