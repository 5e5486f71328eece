//! reqwest-backed catalog gateway.
//!
//! Implements both [`CatalogGateway`] and [`CatalogAdmin`] against the
//! catalog REST service. Requests carry a bearer token whenever the
//! [`IdentityContext`] has one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use super::dto::{UserDto, VkmDto, VkmInputDto};
use super::query::filter_pairs;
use crate::domain::{
    CatalogItem, FilterSpec, ItemId, ItemInput, Principal, SubjectId, UserAccount, UserPatch,
};
use crate::error::{ConfigError, Error, GatewayError, Result};
use crate::port::{CatalogAdmin, CatalogGateway, GatewayResult, IdentityContext};

/// Gateway to the remote catalog service.
pub struct HttpCatalogGateway {
    client: Client,
    base_url: Url,
    identity: Arc<dyn IdentityContext>,
}

impl HttpCatalogGateway {
    /// Build a gateway rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        identity: Arc<dyn IdentityContext>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: format!("{base_url} is not an http(s) base URL"),
            }));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            identity,
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::network(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.identity.credential() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send `builder`, turning non-success statuses into [`GatewayError::ServiceFailure`].
    async fn send(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "catalog service rejected request");
        Err(GatewayError::ServiceFailure {
            status: status.as_u16(),
            body,
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> GatewayResult<T> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "GET");
        let response = self.send(self.request(Method::GET, url)).await?;
        decode(response).await
    }

    async fn write<B, T>(&self, method: Method, segments: &[&str], body: &B) -> GatewayResult<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(method = %method, url = %url, "sending");
        let response = self.send(self.request(method, url).json(body)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    async fn delete(&self, segments: &[&str]) -> GatewayResult<()> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "DELETE");
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn fetch_item(&self, id: &ItemId) -> GatewayResult<CatalogItem> {
        self.get::<VkmDto>(&["vkm", id.as_str()])
            .await
            .map(CatalogItem::from)
            .map_err(|err| or_not_found(err, || format!("item {id}")))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let bytes = response.bytes().await.map_err(GatewayError::network)?;
    serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
}

fn or_not_found(err: GatewayError, resource: impl FnOnce() -> String) -> GatewayError {
    match err {
        GatewayError::ServiceFailure { status: 404, .. } => GatewayError::NotFound {
            resource: resource(),
        },
        other => other,
    }
}

fn into_items(dtos: Vec<VkmDto>) -> Vec<CatalogItem> {
    dtos.into_iter().map(CatalogItem::from).collect()
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn list_by_filter(&self, spec: &FilterSpec) -> GatewayResult<Vec<CatalogItem>> {
        let mut url = self.endpoint(&["vkm", "filter"])?;
        let pairs = filter_pairs(spec);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        debug!(url = %url, filter = %spec, "GET");

        let response = self.send(self.request(Method::GET, url)).await?;
        decode::<Vec<VkmDto>>(response).await.map(into_items)
    }

    async fn list_all(&self) -> GatewayResult<Vec<CatalogItem>> {
        self.get::<Vec<VkmDto>>(&["vkm"]).await.map(into_items)
    }

    async fn list_by_ids(&self, ids: &[ItemId]) -> GatewayResult<Vec<CatalogItem>> {
        let lookups = ids.iter().map(|id| async move {
            match self.fetch_item(id).await {
                Ok(item) => Ok(Some(item)),
                Err(GatewayError::NotFound { .. }) => {
                    debug!(id = %id, "recommended item no longer exists");
                    Ok(None)
                }
                Err(err) => Err(err),
            }
        });
        let found = try_join_all(lookups).await?;
        Ok(found.into_iter().flatten().collect())
    }

    async fn fetch_principal_profile(&self, subject: &SubjectId) -> GatewayResult<Principal> {
        self.get::<UserDto>(&["users", subject.as_str()])
            .await
            .map(|dto| Principal::from(UserAccount::from(dto)))
            .map_err(|err| or_not_found(err, || format!("user {subject}")))
    }
}

#[async_trait]
impl CatalogAdmin for HttpCatalogGateway {
    async fn get_item(&self, id: &ItemId) -> GatewayResult<CatalogItem> {
        self.fetch_item(id).await
    }

    async fn create_item(&self, input: &ItemInput) -> GatewayResult<CatalogItem> {
        let created: Option<VkmDto> = self
            .write(Method::POST, &["vkm"], &VkmInputDto::from(input))
            .await?;
        let item = created
            .map(CatalogItem::from)
            .ok_or_else(|| GatewayError::Decode("service returned no created item".into()))?;
        info!(id = %item.id, name = %item.name, "item created");
        Ok(item)
    }

    async fn update_item(&self, id: &ItemId, input: &ItemInput) -> GatewayResult<CatalogItem> {
        let updated: Option<VkmDto> = self
            .write(Method::PUT, &["vkm", id.as_str()], &VkmInputDto::from(input))
            .await
            .map_err(|err| or_not_found(err, || format!("item {id}")))?;
        info!(id = %id, "item updated");
        match updated {
            Some(dto) => Ok(dto.into()),
            None => self.fetch_item(id).await,
        }
    }

    async fn delete_item(&self, id: &ItemId) -> GatewayResult<()> {
        self.delete(&["vkm", id.as_str()])
            .await
            .map_err(|err| or_not_found(err, || format!("item {id}")))?;
        info!(id = %id, "item deleted");
        Ok(())
    }

    async fn list_users(&self) -> GatewayResult<Vec<UserAccount>> {
        let users: Vec<UserDto> = self.get(&["users"]).await?;
        Ok(users.into_iter().map(UserAccount::from).collect())
    }

    async fn create_user(&self, patch: &UserPatch) -> GatewayResult<UserAccount> {
        let created: Option<UserDto> = self.write(Method::POST, &["users"], patch).await?;
        let account = created
            .map(UserAccount::from)
            .ok_or_else(|| GatewayError::Decode("service returned no created user".into()))?;
        info!(id = %account.id, username = %account.username, "user created");
        Ok(account)
    }

    async fn update_user(&self, id: &SubjectId, patch: &UserPatch) -> GatewayResult<UserAccount> {
        let updated: Option<UserDto> = self
            .write(Method::PUT, &["users", id.as_str()], patch)
            .await
            .map_err(|err| or_not_found(err, || format!("user {id}")))?;
        info!(id = %id, "user updated");
        match updated {
            Some(dto) => Ok(dto.into()),
            None => self
                .get::<UserDto>(&["users", id.as_str()])
                .await
                .map(UserAccount::from)
                .map_err(|err| or_not_found(err, || format!("user {id}"))),
        }
    }

    async fn delete_user(&self, id: &SubjectId) -> GatewayResult<()> {
        self.delete(&["users", id.as_str()])
            .await
            .map_err(|err| or_not_found(err, || format!("user {id}")))?;
        info!(id = %id, "user deleted");
        Ok(())
    }
}

impl std::fmt::Debug for HttpCatalogGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogGateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
