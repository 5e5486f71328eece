use clap::Parser;

use vkm_catalog::adapter::inbound::cli::command::Cli;
use vkm_catalog::adapter::inbound::cli::{config_path, configure_output, diagnostic, dispatch};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    configure_output(&cli);
    let path = config_path(&cli);

    dispatch(cli)
        .await
        .map_err(|err| diagnostic::report(err, Some(&path)))
}
