//! Observable state of the item query layer.

use serde::Serialize;

use super::item::CatalogItem;

/// What the front end is showing: the full catalog or personal recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Filtered listing of the whole catalog.
    #[default]
    Listing,
    /// Items recommended to the logged-in principal.
    Recommendation,
}

impl QueryMode {
    /// Map the `recommendation` flag used by front ends onto a mode.
    #[must_use]
    pub const fn from_flag(recommendation: bool) -> Self {
        if recommendation {
            Self::Recommendation
        } else {
            Self::Listing
        }
    }

    #[must_use]
    pub const fn is_recommendation(self) -> bool {
        matches!(self, Self::Recommendation)
    }
}

/// Result of the current fetch cycle. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryOutcome {
    /// A cycle is in flight (or waiting on the identity lookup).
    #[default]
    Loading,
    /// The last committed result for the current inputs.
    Ready { items: Vec<CatalogItem> },
    /// The current cycle failed.
    Failed { message: String },
}

impl QueryOutcome {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Items of a ready outcome; empty otherwise.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        match self {
            Self::Ready { items } => items,
            _ => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Flatten into the `{items, loading, error}` read model.
    #[must_use]
    pub fn view(&self) -> ItemsView {
        ItemsView::from(self)
    }
}

/// Consumer-facing read model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemsView {
    pub items: Vec<CatalogItem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<&QueryOutcome> for ItemsView {
    fn from(outcome: &QueryOutcome) -> Self {
        Self {
            items: outcome.items().to_vec(),
            loading: outcome.is_loading(),
            error: outcome.error().map(ToOwned::to_owned),
        }
    }
}
