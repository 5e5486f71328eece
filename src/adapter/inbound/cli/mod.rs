//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod input;
pub mod items;
pub mod output;
pub mod paths;
pub mod render;
pub mod users;

use std::path::PathBuf;

use self::command::{Cli, Commands, ConfigCommand, ItemsCommand, UsersCommand};
use self::output::OutputConfig;
use crate::error::Result;
use crate::infrastructure::bootstrap::CatalogRuntime;
use crate::infrastructure::config::settings::Config;

/// Apply the global output flags.
pub fn configure_output(cli: &Cli) {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
}

/// Config file the command runs against.
#[must_use]
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(paths::default_config)
}

/// Load config, initialise logging and run the selected command.
///
/// An explicit `--config` must exist; the default path may be absent.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let path = config_path(&cli);
    let config = if cli.config.is_some() {
        Config::load(&path)?
    } else {
        Config::load_or_default(&path)?
    };

    let logging = match output::verbosity() {
        0 => config.logging.clone(),
        1 => config.logging.with_level("debug"),
        _ => config.logging.with_level("trace"),
    };
    logging.init();

    match cli.command {
        Commands::Config(ConfigCommand::Show) => config::execute_show(&path, &config),
        Commands::Items(command) => {
            let runtime = CatalogRuntime::build(config)?;
            match command {
                ItemsCommand::List(args) => items::execute_list(&runtime, &args).await,
                ItemsCommand::Recommended => items::execute_recommended(&runtime).await,
                ItemsCommand::Browse => items::execute_browse(&runtime).await,
                ItemsCommand::Show { id } => items::execute_show(&runtime, &id).await,
                ItemsCommand::Create { file } => items::execute_create(&runtime, &file).await,
                ItemsCommand::Update { id, file } => {
                    items::execute_update(&runtime, &id, &file).await
                }
                ItemsCommand::Delete(args) => {
                    items::execute_delete(&runtime, &args.id, args.yes).await
                }
            }
        }
        Commands::Users(command) => {
            let runtime = CatalogRuntime::build(config)?;
            match command {
                UsersCommand::List => users::execute_list(&runtime).await,
                UsersCommand::Create { file } => users::execute_create(&runtime, &file).await,
                UsersCommand::Update { id, file } => {
                    users::execute_update(&runtime, &id, &file).await
                }
                UsersCommand::Delete(args) => {
                    users::execute_delete(&runtime, &args.id, args.yes).await
                }
            }
        }
    }
}
