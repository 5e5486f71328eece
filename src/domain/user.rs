//! User accounts managed through the admin surface.

use serde::{Deserialize, Serialize};

use super::ids::{ItemId, SubjectId};

/// Display profile attached to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl Profile {
    /// "First Last", trimmed when either part is missing.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A user account as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: SubjectId,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub recommended_vkms: Vec<ItemId>,
}

impl UserAccount {
    /// Role label shown in listings.
    #[must_use]
    pub fn role_label(&self) -> &'static str {
        match (self.is_admin, self.is_student) {
            (true, true) => "admin, student",
            (true, false) => "admin, staff",
            (false, true) => "student",
            (false, false) => "staff",
        }
    }
}

/// Partial profile used in create and update payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Partial account used to create or update users.
///
/// Only present fields are sent; nested profile fields follow the same rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_student: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfilePatch>,
}

impl UserPatch {
    /// Check the fields the service requires on creation.
    ///
    /// Returns the name of the first missing field.
    pub fn missing_for_create(&self) -> Option<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        if blank(&self.username) {
            return Some("username");
        }
        if blank(&self.email) {
            return Some("email");
        }
        if blank(&self.password) {
            return Some("password");
        }
        None
    }
}
