//! Administration port for catalog items and user accounts.

use async_trait::async_trait;

use super::catalog::GatewayResult;
use crate::domain::{CatalogItem, ItemId, ItemInput, SubjectId, UserAccount, UserPatch};

/// Write access to the catalog service, used by the admin commands.
#[async_trait]
pub trait CatalogAdmin: Send + Sync {
    async fn get_item(&self, id: &ItemId) -> GatewayResult<CatalogItem>;

    async fn create_item(&self, input: &ItemInput) -> GatewayResult<CatalogItem>;

    async fn update_item(&self, id: &ItemId, input: &ItemInput) -> GatewayResult<CatalogItem>;

    async fn delete_item(&self, id: &ItemId) -> GatewayResult<()>;

    async fn list_users(&self) -> GatewayResult<Vec<UserAccount>>;

    async fn create_user(&self, patch: &UserPatch) -> GatewayResult<UserAccount>;

    async fn update_user(&self, id: &SubjectId, patch: &UserPatch) -> GatewayResult<UserAccount>;

    async fn delete_user(&self, id: &SubjectId) -> GatewayResult<()>;
}
