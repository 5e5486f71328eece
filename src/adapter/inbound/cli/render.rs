//! Table and detail rendering for catalog records.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{CatalogItem, UserAccount};

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "EC")]
    credit: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Level")]
    level: String,
}

impl From<&CatalogItem> for ItemRow {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            credit: item.study_credit.map_or_else(|| "-".into(), |c| c.to_string()),
            location: item.location.clone().unwrap_or_else(|| "-".into()),
            level: item.level.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Role")]
    role: &'static str,
}

impl From<&UserAccount> for UserRow {
    fn from(user: &UserAccount) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            name: user.profile.display_name(),
            email: user.email.clone(),
            group: user.group.clone(),
            role: user.role_label(),
        }
    }
}

/// Render items as a table, or `None` when there is nothing to show.
#[must_use]
pub fn items_table(items: &[CatalogItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut table = Table::new(items.iter().map(ItemRow::from));
    table.with(Style::rounded());
    Some(table.to_string())
}

/// Render user accounts as a table, or `None` when there is nothing to show.
#[must_use]
pub fn users_table(users: &[UserAccount]) -> Option<String> {
    if users.is_empty() {
        return None;
    }
    let mut table = Table::new(users.iter().map(UserRow::from));
    table.with(Style::rounded());
    Some(table.to_string())
}

/// Print one item field by field.
pub fn item_details(item: &CatalogItem) {
    output::section(&item.name);
    output::field("Id", output::highlight(&item.id));
    if let Some(short) = &item.short_description {
        output::field("Summary", short);
    }
    if let Some(credit) = item.study_credit {
        output::field("Study credit", format!("{credit} EC"));
    }
    if let Some(location) = &item.location {
        output::field("Location", location);
    }
    if let Some(level) = &item.level {
        output::field("Level", level);
    }
    for (key, value) in &item.attributes {
        output::field(key, output::muted(value));
    }
    if let Some(description) = &item.description {
        output::section("Description");
        output::block(description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_render_as_dash() {
        let row = ItemRow::from(&CatalogItem::new("a1", "Robotics"));
        assert_eq!(row.credit, "-");
        assert_eq!(row.location, "-");
    }

    #[test]
    fn table_lists_every_item() {
        let mut item = CatalogItem::new("a1", "Robotics");
        item.study_credit = Some(30);
        let table = items_table(&[item, CatalogItem::new("b2", "Ethics")]).unwrap();
        assert!(table.contains("Robotics"));
        assert!(table.contains("Ethics"));
        assert!(table.contains("30"));
    }

    #[test]
    fn empty_collections_have_no_table() {
        assert!(items_table(&[]).is_none());
        assert!(users_table(&[]).is_none());
    }
}
