//! Command-line interface wiring for pathminer.

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pathminer::config::Settings;

pub mod bio;
pub mod patterns;
pub mod stats;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Relation path mining for biomedical corpora", long_about = None)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Patterns(args) => patterns::run(args, settings).await,
            Commands::Bio(args) => bio::run(args, settings).await,
            Commands::Stats(args) => stats::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mine frequency-ranked dependency-path patterns between related entities.
    Patterns(patterns::Args),
    /// Convert annotated passages into BIO-tagged token files.
    Bio(bio::Args),
    /// Print descriptive statistics for one split.
    Stats(stats::Args),
}

/// Per-document progress bar, hidden unless requested.
pub fn progress_bar(len: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
