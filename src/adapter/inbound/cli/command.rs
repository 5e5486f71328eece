//! Command-line interface definitions.
//!
//! Defines the `vkm` CLI with `clap`: browsing and filtering the catalog,
//! personal recommendations, and item/user administration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::FilterSpec;

/// Browse, filter and administer the VKM choice-module catalog
#[derive(Parser, Debug)]
#[command(name = "vkm")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.vkm/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the vkm CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse and manage catalog items
    #[command(subcommand)]
    Items(ItemsCommand),

    /// Manage user accounts
    #[command(subcommand)]
    Users(UsersCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `vkm items`.
#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// List items matching the given filters
    List(FilterArgs),
    /// Show the items recommended to the configured subject
    Recommended,
    /// Interactively toggle filters and watch the listing update
    Browse,
    /// Show a single item
    Show {
        /// Item id
        id: String,
    },
    /// Create an item from a JSON file
    Create {
        /// JSON file with the item fields
        file: PathBuf,
    },
    /// Update an item from a JSON file
    Update {
        /// Item id
        id: String,
        /// JSON file with the fields to change
        file: PathBuf,
    },
    /// Delete an item
    Delete(DeleteArgs),
}

/// Subcommands for `vkm users`.
#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List user accounts
    List,
    /// Create a user from a JSON file
    Create {
        /// JSON file with username, email, password and optional profile
        file: PathBuf,
    },
    /// Update a user from a JSON file
    Update {
        /// User id
        id: String,
        /// JSON file with the fields to change
        file: PathBuf,
    },
    /// Delete a user
    Delete(DeleteArgs),
}

/// Subcommands for `vkm config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied
    Show,
}

/// Catalog filter flags. Omitted flags leave the field unconstrained.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Study credit (EC), e.g. 15 or 30
    #[arg(long)]
    pub credit: Option<u32>,

    /// Campus location, e.g. "Den Bosch"
    #[arg(long)]
    pub location: Option<String>,

    /// Qualification level, e.g. NLQF6
    #[arg(long)]
    pub level: Option<String>,
}

impl FilterArgs {
    #[must_use]
    pub fn to_filter(&self) -> FilterSpec {
        FilterSpec::clear()
            .with_study_credit(self.credit)
            .with_location(self.location.as_deref())
            .with_level(self.level.as_deref())
    }
}

/// Arguments shared by the delete commands.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the record to delete
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
