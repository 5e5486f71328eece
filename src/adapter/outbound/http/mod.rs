//! REST adapter for the catalog service.
//!
//! Implements [`CatalogGateway`](crate::port::CatalogGateway) and
//! [`CatalogAdmin`](crate::port::CatalogAdmin) over `reqwest`.

pub mod client;
mod dto;
pub mod query;

pub use client::HttpCatalogGateway;
