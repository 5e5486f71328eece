//! Query-string encoding for catalog filters.

use crate::domain::FilterSpec;

/// Query parameters for `GET /vkm/filter`.
///
/// Only present, non-blank fields are encoded; an unconstrained filter yields
/// no parameters at all.
pub fn filter_pairs(spec: &FilterSpec) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(3);
    if let Some(credit) = spec.study_credit {
        pairs.push(("studyCredit", credit.to_string()));
    }
    if let Some(location) = spec.location.as_deref().filter(|v| !v.is_empty()) {
        pairs.push(("location", location.to_string()));
    }
    if let Some(level) = spec.level.as_deref().filter(|v| !v.is_empty()) {
        pairs.push(("level", level.to_string()));
    }
    pairs
}
