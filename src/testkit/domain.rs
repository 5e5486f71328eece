//! Builders for domain primitives.

use crate::domain::{CatalogItem, FilterSpec, ItemId, Principal, SubjectId};

/// Item with `id` and a name derived from it.
pub fn item(id: &str) -> CatalogItem {
    CatalogItem::new(id, format!("Module {id}"))
}

/// Item placed at `location` with `credits` EC.
pub fn item_at(id: &str, location: &str, credits: u32) -> CatalogItem {
    CatalogItem {
        location: Some(location.to_string()),
        study_credit: Some(credits),
        ..item(id)
    }
}

/// Items for each id, in order.
pub fn items(ids: &[&str]) -> Vec<CatalogItem> {
    ids.iter().copied().map(item).collect()
}

/// Ids as domain values.
pub fn ids(raw: &[&str]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId::from).collect()
}

/// Principal `subject` with the given recommendations.
pub fn principal(subject: &str, recommended: &[&str]) -> Principal {
    Principal::new(SubjectId::new(subject), ids(recommended))
}

/// Filter on location only.
pub fn location(value: &str) -> FilterSpec {
    FilterSpec::clear().with_location(Some(value))
}
