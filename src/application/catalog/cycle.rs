//! A single fetch cycle: decide what to ask the gateway, then ask it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use super::orchestrator::{CycleInputs, Inner};
use crate::domain::{
    CatalogItem, FilterSpec, IdentityState, ItemId, QueryMode, QueryOutcome, SubjectId,
};

/// Gateway work a cycle has to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum CycleRequest {
    Listing(FilterSpec),
    Recommendation(SubjectId),
}

/// What a freshly started cycle does right after publishing `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum CyclePlan {
    /// Identity not known yet; stay `Loading` until it is.
    Wait,
    /// Outcome is known without touching the network.
    Settle(QueryOutcome),
    /// Spawn a task for the gateway call.
    Fetch(CycleRequest),
}

pub(super) fn plan(inputs: &CycleInputs) -> CyclePlan {
    match inputs.mode {
        QueryMode::Listing => CyclePlan::Fetch(CycleRequest::Listing(inputs.filter.clone())),
        QueryMode::Recommendation => match &inputs.identity {
            IdentityState::Resolving => CyclePlan::Wait,
            IdentityState::Anonymous => {
                CyclePlan::Settle(QueryOutcome::Ready { items: Vec::new() })
            }
            IdentityState::Authenticated(subject) => {
                CyclePlan::Fetch(CycleRequest::Recommendation(subject.clone()))
            }
        },
    }
}

/// Run `request` and commit its outcome under `epoch`.
pub(super) async fn run(inner: Arc<Inner>, epoch: u64, request: CycleRequest) {
    let Some(outcome) = fetch(&inner, epoch, request).await else {
        return;
    };
    if inner.commit(epoch, outcome) {
        debug!(epoch, "fetch cycle committed");
    }
}

/// Returns `None` when the cycle was superseded half way.
async fn fetch(inner: &Inner, epoch: u64, request: CycleRequest) -> Option<QueryOutcome> {
    let result = match request {
        CycleRequest::Listing(filter) => inner.gateway.list_by_filter(&filter).await,
        CycleRequest::Recommendation(subject) => {
            let principal = match inner.gateway.fetch_principal_profile(&subject).await {
                Ok(principal) => principal,
                Err(err) => {
                    if inner.is_current(epoch) {
                        warn!(
                            epoch,
                            subject = %subject,
                            error = %err,
                            "principal profile unavailable"
                        );
                    }
                    return Some(QueryOutcome::Failed {
                        message: err.user_message(),
                    });
                }
            };

            if !principal.has_recommendations() {
                return Some(QueryOutcome::Ready { items: Vec::new() });
            }
            if !inner.is_current(epoch) {
                debug!(epoch, "cycle superseded before item lookup");
                return None;
            }

            let ids = unique_ids(principal.recommended_item_ids);
            inner
                .gateway
                .list_by_ids(&ids)
                .await
                .map(|items| rank_and_cap(items, &ids, inner.options.recommendation_limit))
        }
    };

    Some(match result {
        Ok(items) => QueryOutcome::Ready { items },
        Err(err) => QueryOutcome::Failed {
            message: err.user_message(),
        },
    })
}

/// Drop repeated ids, keeping the first occurrence of each.
pub(super) fn unique_ids(ids: Vec<ItemId>) -> Vec<ItemId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Order `items` by their position in `ids`, drop repeated items, then keep
/// the first `limit`.
///
/// The gateway gives no ordering guarantee, so the cap only means
/// "most relevant first" after re-ranking.
pub(super) fn rank_and_cap(
    mut items: Vec<CatalogItem>,
    ids: &[ItemId],
    limit: Option<usize>,
) -> Vec<CatalogItem> {
    let mut rank: HashMap<&ItemId, usize> = HashMap::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        rank.entry(id).or_insert(i);
    }
    items.sort_by_key(|item| rank.get(&item.id).copied().unwrap_or(usize::MAX));

    let mut seen = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.id.clone()));
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
