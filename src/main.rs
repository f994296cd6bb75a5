//! Entry point wiring CLI dispatch to pipeline modules.

mod cli;

use anyhow::Result;
use cli::Cli;
use pathminer::{config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_directive())?;
    let settings = Settings::load()?;

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
