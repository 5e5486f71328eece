//! Handlers for the `users` command group.

use std::path::Path;

use serde_json::json;

use super::input::{confirm_delete, read_json};
use super::{output, render};
use crate::domain::{SubjectId, UserPatch};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::CatalogRuntime;

/// Execute `users list`.
pub async fn execute_list(runtime: &CatalogRuntime) -> Result<()> {
    let pb = output::spinner("Loading users");
    let users = match runtime.admin().list_users().await {
        Ok(users) => users,
        Err(err) => {
            output::spinner_fail(&pb, &err.user_message());
            return Err(err.into());
        }
    };
    output::spinner_success(&pb, &format!("{} user(s)", users.len()));

    if output::is_json() {
        output::json_output(json!({ "command": "users.list", "users": users }));
        return Ok(());
    }

    output::section("Users");
    match render::users_table(&users) {
        Some(table) => output::block(&table),
        None => output::note("No users"),
    }
    Ok(())
}

/// Execute `users create`.
pub async fn execute_create(runtime: &CatalogRuntime, file: &Path) -> Result<()> {
    let patch: UserPatch = read_json(file)?;
    if let Some(field) = patch.missing_for_create() {
        return Err(Error::Input(format!("user payload needs a non-empty \"{field}\"")));
    }

    let user = runtime.admin().create_user(&patch).await?;
    if output::is_json() {
        output::json_output(json!({ "command": "users.create", "user": user }));
        return Ok(());
    }
    output::success(&format!("Created user {}", user.username));
    output::field("Id", output::highlight(&user.id));
    Ok(())
}

/// Execute `users update`.
pub async fn execute_update(runtime: &CatalogRuntime, id: &str, file: &Path) -> Result<()> {
    let patch: UserPatch = read_json(file)?;
    if patch == UserPatch::default() {
        return Err(Error::Input("user payload contains no fields to update".into()));
    }

    let user = runtime
        .admin()
        .update_user(&SubjectId::new(id), &patch)
        .await?;
    if output::is_json() {
        output::json_output(json!({ "command": "users.update", "user": user }));
        return Ok(());
    }
    output::success(&format!("Updated user {}", user.username));
    Ok(())
}

/// Execute `users delete`.
pub async fn execute_delete(runtime: &CatalogRuntime, id: &str, yes: bool) -> Result<()> {
    let id = SubjectId::new(id);
    if !confirm_delete(&format!("user {id}"), yes)? {
        output::note("Cancelled");
        return Ok(());
    }

    runtime.admin().delete_user(&id).await?;
    if output::is_json() {
        output::json_output(json!({ "command": "users.delete", "id": id }));
        return Ok(());
    }
    output::success(&format!("Deleted user {id}"));
    Ok(())
}
