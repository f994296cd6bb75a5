//! CLI entry-point for corpus statistics.

use anyhow::Result;
use clap::Args as ClapArgs;
use pathminer::{
    config::{Settings, Split},
    data, stats,
};
use tracing::instrument;

/// Args for the `stats` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Split to describe.
    #[arg(long, value_enum, default_value = "train")]
    pub split: Split,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let corpus = data::load_split(&settings, args.split)?;
    let report = stats::compute(&corpus);
    print!("{report}");
    Ok(())
}
