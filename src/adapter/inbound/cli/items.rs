//! Handlers for the `items` command group.

use std::path::Path;

use serde_json::json;

use super::command::FilterArgs;
use super::input::{confirm_delete, prompt, read_json};
use super::{output, render};
use crate::application::catalog::ItemQueryOrchestrator;
use crate::domain::{
    CatalogItem, FilterSpec, IdentityState, ItemId, ItemInput, QueryMode, QueryOutcome,
};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::CatalogRuntime;
use crate::port::IdentityContext;

/// Wait for the orchestrator to settle, with a spinner while it loads.
async fn settled_items(
    orchestrator: &ItemQueryOrchestrator,
    label: &str,
) -> Result<Vec<CatalogItem>> {
    let pb = output::spinner(label);
    match orchestrator.settled().await {
        QueryOutcome::Ready { items } => {
            output::spinner_success(&pb, &format!("{} module(s)", items.len()));
            Ok(items)
        }
        QueryOutcome::Failed { message } => {
            output::spinner_fail(&pb, &message);
            Err(Error::Query(message))
        }
        QueryOutcome::Loading => {
            output::spinner_fail(&pb, "query was abandoned");
            Err(Error::Query("query was abandoned before it settled".into()))
        }
    }
}

fn print_items(items: &[CatalogItem], empty: &str) {
    match render::items_table(items) {
        Some(table) => output::block(&table),
        None => output::note(empty),
    }
}

/// Execute `items list`.
pub async fn execute_list(runtime: &CatalogRuntime, args: &FilterArgs) -> Result<()> {
    let filter = args.to_filter();
    let orchestrator = runtime.orchestrator(filter.clone(), QueryMode::Listing);
    let items = settled_items(&orchestrator, "Loading modules").await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "items.list",
            "filter": filter,
            "items": items,
        }));
        return Ok(());
    }

    output::section(&format!("Modules ({filter})"));
    print_items(&items, "No modules match these filters");
    Ok(())
}

/// Execute `items recommended`.
pub async fn execute_recommended(runtime: &CatalogRuntime) -> Result<()> {
    let identity = runtime.session().identity();
    let orchestrator = runtime.orchestrator(FilterSpec::clear(), QueryMode::Recommendation);
    let items = settled_items(&orchestrator, "Loading recommendations").await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "items.recommended",
            "subject": identity.subject(),
            "items": items,
        }));
        return Ok(());
    }

    output::section("Recommended for you");
    print_items(&items, "No recommendations yet");
    if identity == IdentityState::Anonymous {
        output::hint("set VKM_SUBJECT (and VKM_API_TOKEN) to see personal recommendations");
    }
    Ok(())
}

const BROWSE_ACTIONS: &[&str] = &[
    "Study credit",
    "Location",
    "Level",
    "Toggle recommendations",
    "Clear filters",
    "Refresh",
    "Quit",
];

async fn ask_value(label: &'static str) -> Result<String> {
    prompt(move || {
        dialoguer::Input::<String>::new()
            .with_prompt(format!("{label} (same value or blank clears)"))
            .allow_empty(true)
            .interact_text()
    })
    .await
}

/// Blank clears the credit constraint.
fn parse_credit(raw: &str) -> Result<Option<u32>> {
    match raw.trim() {
        "" => Ok(None),
        value => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| Error::Input(format!("not a credit value: {value}"))),
    }
}

/// Execute `items browse`: every answer replaces the filter and the listing
/// follows.
pub async fn execute_browse(runtime: &CatalogRuntime) -> Result<()> {
    if output::is_json() {
        return Err(Error::Input("browse is interactive and has no JSON output".into()));
    }

    let orchestrator = runtime.orchestrator(FilterSpec::clear(), QueryMode::Listing);
    loop {
        let mode = orchestrator.mode();
        let filter = orchestrator.filter();
        match settled_items(&orchestrator, "Loading modules").await {
            Ok(items) => {
                let title = if mode.is_recommendation() {
                    "Recommended for you".to_string()
                } else {
                    format!("Modules ({filter})")
                };
                output::section(&title);
                print_items(&items, "Nothing to show");
            }
            Err(err) => output::error(&err.to_string()),
        }

        let choice = prompt(|| {
            dialoguer::Select::new()
                .with_prompt("Change")
                .items(BROWSE_ACTIONS)
                .default(0)
                .interact()
        })
        .await?;

        match choice {
            0 => {
                let raw = ask_value("Study credit").await?;
                match parse_credit(&raw) {
                    Ok(None) => orchestrator.set_filter(filter.with_study_credit(None)),
                    Ok(Some(credit)) => {
                        orchestrator.set_filter(filter.toggle_study_credit(credit));
                    }
                    Err(err) => output::error(&err.to_string()),
                }
            }
            1 => {
                let raw = ask_value("Location").await?;
                orchestrator.set_filter(match raw.trim() {
                    "" => filter.with_location(None),
                    value => filter.toggle_location(value),
                });
            }
            2 => {
                let raw = ask_value("Level").await?;
                orchestrator.set_filter(match raw.trim() {
                    "" => filter.with_level(None),
                    value => filter.toggle_level(value),
                });
            }
            3 => orchestrator.set_mode(QueryMode::from_flag(!mode.is_recommendation())),
            4 => orchestrator.set_filter(FilterSpec::clear()),
            5 => orchestrator.refresh(),
            _ => break,
        }
    }
    Ok(())
}

/// Execute `items show`.
pub async fn execute_show(runtime: &CatalogRuntime, id: &str) -> Result<()> {
    let item = runtime.admin().get_item(&ItemId::new(id)).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "items.show", "item": item }));
        return Ok(());
    }
    render::item_details(&item);
    Ok(())
}

/// Execute `items create`.
pub async fn execute_create(runtime: &CatalogRuntime, file: &Path) -> Result<()> {
    let input: ItemInput = read_json(file)?;
    if input.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
        return Err(Error::Input("item payload needs a non-empty \"name\"".into()));
    }

    let item = runtime.admin().create_item(&input).await?;
    if output::is_json() {
        output::json_output(json!({ "command": "items.create", "item": item }));
        return Ok(());
    }
    output::success(&format!("Created {}", item.name));
    output::field("Id", output::highlight(&item.id));
    Ok(())
}

/// Execute `items update`.
pub async fn execute_update(runtime: &CatalogRuntime, id: &str, file: &Path) -> Result<()> {
    let input: ItemInput = read_json(file)?;
    if input.is_empty() {
        return Err(Error::Input("item payload contains no fields to update".into()));
    }

    let item = runtime.admin().update_item(&ItemId::new(id), &input).await?;
    if output::is_json() {
        output::json_output(json!({ "command": "items.update", "item": item }));
        return Ok(());
    }
    output::success(&format!("Updated {}", item.name));
    Ok(())
}

/// Execute `items delete`.
pub async fn execute_delete(runtime: &CatalogRuntime, id: &str, yes: bool) -> Result<()> {
    let id = ItemId::new(id);
    if !confirm_delete(&format!("item {id}"), yes)? {
        output::note("Cancelled");
        return Ok(());
    }

    runtime.admin().delete_item(&id).await?;
    if output::is_json() {
        output::json_output(json!({ "command": "items.delete", "id": id }));
        return Ok(());
    }
    output::success(&format!("Deleted item {id}"));
    Ok(())
}
