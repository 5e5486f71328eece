//! Wire formats of the catalog service.
//!
//! Documents carry their id as `_id`; module fields use the service's
//! lowercase names (`studycredit`, `shortdescription`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogItem, ItemId, ItemInput, Profile, SubjectId, UserAccount};

#[derive(Debug, Deserialize)]
pub(super) struct VkmDto {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    shortdescription: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "studyCredit", alias = "study_credit")]
    studycredit: Option<u32>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl From<VkmDto> for CatalogItem {
    fn from(dto: VkmDto) -> Self {
        let mut attributes = dto.rest;
        attributes.remove("__v");
        Self {
            id: ItemId::new(dto.id),
            name: dto.name,
            short_description: dto.shortdescription,
            description: dto.description,
            study_credit: dto.studycredit,
            location: dto.location,
            level: dto.level,
            attributes,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct VkmInputDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shortdescription: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    studycredit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'a str>,
    #[serde(flatten)]
    rest: &'a BTreeMap<String, serde_json::Value>,
}

impl<'a> From<&'a ItemInput> for VkmInputDto<'a> {
    fn from(input: &'a ItemInput) -> Self {
        Self {
            name: input.name.as_deref(),
            shortdescription: input.short_description.as_deref(),
            description: input.description.as_deref(),
            studycredit: input.study_credit,
            location: input.location.as_deref(),
            level: input.level.as_deref(),
            rest: &input.attributes,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProfileDto {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    avatar_url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    is_admin: bool,
    #[serde(default)]
    is_student: bool,
    #[serde(default)]
    group: String,
    #[serde(default)]
    profile: ProfileDto,
    #[serde(default)]
    recommended_vkms: Vec<String>,
}

impl From<UserDto> for UserAccount {
    fn from(dto: UserDto) -> Self {
        Self {
            id: SubjectId::new(dto.id),
            username: dto.username,
            email: dto.email,
            created_at: dto.created_at,
            is_admin: dto.is_admin,
            is_student: dto.is_student,
            group: dto.group,
            profile: Profile {
                first_name: dto.profile.first_name,
                last_name: dto.profile.last_name,
                avatar_url: dto.profile.avatar_url,
            },
            recommended_vkms: dto.recommended_vkms.into_iter().map(ItemId::new).collect(),
        }
    }
}
