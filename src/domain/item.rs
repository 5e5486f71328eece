//! Catalog items (VKM choice modules).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// A choice module as listed by the catalog.
///
/// Only [`id`](Self::id) carries meaning for the query layer; everything else
/// is display payload passed through to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_credit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Fields the client does not model, kept verbatim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl CatalogItem {
    /// Minimal item with just an id and a display name.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_description: None,
            description: None,
            study_credit: None,
            location: None,
            level: None,
            attributes: BTreeMap::new(),
        }
    }
}

/// Payload for creating or replacing a catalog item.
///
/// Absent fields are left out of the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_credit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl ItemInput {
    /// True when the payload would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.short_description.is_none()
            && self.description.is_none()
            && self.study_credit.is_none()
            && self.location.is_none()
            && self.level.is_none()
            && self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_detected() {
        assert!(ItemInput::default().is_empty());
        let input = ItemInput {
            level: Some("NLQF5".into()),
            ..ItemInput::default()
        };
        assert!(!input.is_empty());
    }

    #[test]
    fn input_parses_partial_json() {
        let input: ItemInput =
            serde_json::from_str(r#"{"name": "Data Science", "study_credit": 30}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Data Science"));
        assert_eq!(input.study_credit, Some(30));
        assert!(input.location.is_none());
    }
}
