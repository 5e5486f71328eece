//! Catalog read port used by the item query layer.

use async_trait::async_trait;

use crate::domain::{CatalogItem, FilterSpec, ItemId, Principal, SubjectId};
use crate::error::GatewayError;

/// Result type for gateway calls.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Stateless access to the remote catalog service.
///
/// Each call is one network round trip (one per id for
/// [`list_by_ids`](Self::list_by_ids)); implementations do not cache.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the orchestrator calls them from
/// spawned tasks.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// List items matching `spec`. Absent fields are not sent at all.
    ///
    /// # Errors
    ///
    /// [`GatewayError::NetworkFailure`] when the service is unreachable,
    /// [`GatewayError::ServiceFailure`] on a non-success status.
    async fn list_by_filter(&self, spec: &FilterSpec) -> GatewayResult<Vec<CatalogItem>>;

    /// List the whole catalog without any constraint.
    async fn list_all(&self) -> GatewayResult<Vec<CatalogItem>>;

    /// Fetch the items with the given ids.
    ///
    /// The result is the subset of `ids` that exists, in no particular order.
    async fn list_by_ids(&self, ids: &[ItemId]) -> GatewayResult<Vec<CatalogItem>>;

    /// Load the profile of `subject` including its recommendation list.
    ///
    /// # Errors
    ///
    /// [`GatewayError::NotFound`] when the subject no longer exists.
    async fn fetch_principal_profile(&self, subject: &SubjectId) -> GatewayResult<Principal>;
}
