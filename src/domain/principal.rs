//! The authenticated principal and its recommendation list.

use super::ids::{ItemId, SubjectId};
use super::user::UserAccount;

/// The logged-in user as seen by the query layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject_id: SubjectId,
    /// Precomputed recommendations, most relevant first.
    pub recommended_item_ids: Vec<ItemId>,
}

impl Principal {
    pub fn new(subject_id: impl Into<SubjectId>, recommended_item_ids: Vec<ItemId>) -> Self {
        Self {
            subject_id: subject_id.into(),
            recommended_item_ids,
        }
    }

    /// True when there is nothing to recommend.
    #[must_use]
    pub fn has_recommendations(&self) -> bool {
        !self.recommended_item_ids.is_empty()
    }
}

impl From<UserAccount> for Principal {
    fn from(account: UserAccount) -> Self {
        Self {
            subject_id: account.id,
            recommended_item_ids: account.recommended_vkms,
        }
    }
}

/// Who is on the other side of the session, as far as the client knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentityState {
    /// Session lookup still in progress.
    #[default]
    Resolving,
    /// Lookup finished without a logged-in user.
    Anonymous,
    /// A user is logged in; their profile is fetched on demand.
    Authenticated(SubjectId),
}

impl IdentityState {
    /// Subject of an authenticated session.
    #[must_use]
    pub fn subject(&self) -> Option<&SubjectId> {
        match self {
            Self::Authenticated(subject) => Some(subject),
            _ => None,
        }
    }

    /// True once the identity lookup has finished either way.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Resolving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Profile;

    #[test]
    fn principal_from_account_keeps_recommendation_order() {
        let account = UserAccount {
            id: SubjectId::new("u1"),
            username: "jan".into(),
            email: "jan@example.nl".into(),
            created_at: None,
            is_admin: false,
            is_student: true,
            group: "INF1B".into(),
            profile: Profile::default(),
            recommended_vkms: vec![ItemId::new("b"), ItemId::new("a")],
        };
        let principal = Principal::from(account);
        assert_eq!(principal.subject_id.as_str(), "u1");
        assert_eq!(
            principal.recommended_item_ids,
            vec![ItemId::new("b"), ItemId::new("a")]
        );
        assert!(principal.has_recommendations());
    }

    #[test]
    fn identity_state_accessors() {
        assert!(!IdentityState::Resolving.is_resolved());
        assert!(IdentityState::Anonymous.is_resolved());
        let auth = IdentityState::Authenticated(SubjectId::new("u1"));
        assert_eq!(auth.subject().map(SubjectId::as_str), Some("u1"));
        assert_eq!(IdentityState::Anonymous.subject(), None);
    }
}
