//! Catalog filter value.
//!
//! A [`FilterSpec`] is replaced wholesale on every change. Callers that want
//! to change a single constraint read the current value, derive a new one
//! with the `with_*`/`toggle_*` helpers and hand the whole value back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selected catalog constraints. Absent fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Credit value (EC) of the module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_credit: Option<u32>,
    /// Campus location, e.g. "Breda" or "Den Bosch".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Qualification level, e.g. "NLQF5".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl FilterSpec {
    /// The unconstrained filter.
    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }

    /// Replace `self` with `next`. Nothing of the previous value survives.
    #[must_use]
    pub fn apply(self, next: FilterSpec) -> FilterSpec {
        next
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.study_credit.is_none() && self.location.is_none() && self.level.is_none()
    }

    /// Copy with the credit constraint replaced.
    #[must_use]
    pub fn with_study_credit(&self, study_credit: Option<u32>) -> Self {
        Self {
            study_credit,
            ..self.clone()
        }
    }

    /// Copy with the location constraint replaced. Blank values clear it.
    #[must_use]
    pub fn with_location(&self, location: Option<&str>) -> Self {
        Self {
            location: non_blank(location),
            ..self.clone()
        }
    }

    /// Copy with the level constraint replaced. Blank values clear it.
    #[must_use]
    pub fn with_level(&self, level: Option<&str>) -> Self {
        Self {
            level: non_blank(level),
            ..self.clone()
        }
    }

    /// Select `value` as the credit constraint, or clear it if already selected.
    #[must_use]
    pub fn toggle_study_credit(&self, value: u32) -> Self {
        if self.study_credit == Some(value) {
            self.with_study_credit(None)
        } else {
            self.with_study_credit(Some(value))
        }
    }

    /// Select `value` as the location, or clear it if already selected.
    #[must_use]
    pub fn toggle_location(&self, value: &str) -> Self {
        if self.location.as_deref() == Some(value) {
            self.with_location(None)
        } else {
            self.with_location(Some(value))
        }
    }

    /// Select `value` as the level, or clear it if already selected.
    #[must_use]
    pub fn toggle_level(&self, value: &str) -> Self {
        if self.level.as_deref() == Some(value) {
            self.with_level(None)
        } else {
            self.with_level(Some(value))
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconstrained() {
            return write!(f, "unconstrained");
        }
        let mut parts = Vec::with_capacity(3);
        if let Some(credit) = self.study_credit {
            parts.push(format!("studyCredit={credit}"));
        }
        if let Some(location) = &self.location {
            parts.push(format!("location={location}"));
        }
        if let Some(level) = &self.level {
            parts.push(format!("level={level}"));
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_wholesale() {
        let current = FilterSpec::clear()
            .with_location(Some("Breda"))
            .with_level(Some("NLQF6"));
        let next = FilterSpec::clear().with_study_credit(Some(15));

        let applied = current.apply(next.clone());

        assert_eq!(applied, next);
        assert!(applied.location.is_none());
        assert!(applied.level.is_none());
    }

    #[test]
    fn clear_resets_every_field() {
        let cleared = FilterSpec::clear();
        assert!(cleared.is_unconstrained());
        assert_eq!(cleared, FilterSpec::default());
    }

    #[test]
    fn equality_is_structural() {
        let a = FilterSpec::clear().with_location(Some("Breda"));
        let b = FilterSpec {
            location: Some("Breda".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(a, b);
        assert_ne!(a, b.with_level(Some("NLQF5")));
    }

    #[test]
    fn helpers_leave_receiver_untouched() {
        let base = FilterSpec::clear().with_location(Some("Tilburg"));
        let derived = base.with_study_credit(Some(30));

        assert_eq!(base.study_credit, None);
        assert_eq!(derived.location.as_deref(), Some("Tilburg"));
        assert_eq!(derived.study_credit, Some(30));
    }

    #[test]
    fn toggle_selects_then_clears() {
        let once = FilterSpec::clear().toggle_location("Breda");
        assert_eq!(once.location.as_deref(), Some("Breda"));

        let twice = once.toggle_location("Breda");
        assert!(twice.is_unconstrained());

        let switched = once.toggle_location("Den Bosch");
        assert_eq!(switched.location.as_deref(), Some("Den Bosch"));
    }

    #[test]
    fn toggle_credit_and_level() {
        let spec = FilterSpec::clear().toggle_study_credit(15).toggle_level("NLQF5");
        assert_eq!(spec.study_credit, Some(15));
        assert_eq!(spec.level.as_deref(), Some("NLQF5"));
        assert_eq!(spec.toggle_study_credit(15).study_credit, None);
    }

    #[test]
    fn blank_values_clear_the_field() {
        let spec = FilterSpec::clear()
            .with_location(Some("Breda"))
            .with_location(Some("   "));
        assert!(spec.location.is_none());
    }

    #[test]
    fn display_lists_present_fields() {
        assert_eq!(FilterSpec::clear().to_string(), "unconstrained");
        let spec = FilterSpec::clear()
            .with_study_credit(Some(30))
            .with_level(Some("NLQF6"));
        assert_eq!(spec.to_string(), "studyCredit=30, level=NLQF6");
    }
}
