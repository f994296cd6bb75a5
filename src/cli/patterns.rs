//! CLI entry-point for dependency-path pattern mining.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use pathminer::{
    config::{Settings, Split},
    data,
    nlp::CoreNlpClient,
    patterns::{self, aggregate, PatternCounter},
};
use tracing::{info, instrument, warn};

use super::progress_bar;

/// Args for the `patterns` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Splits pooled into one frequency table.
    #[arg(long, value_delimiter = ',', value_enum, default_values_t = Split::ALL)]
    pub splits: Vec<Split>,
    /// Report path; defaults to `patterns.tsv` under the outputs dir.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Show a per-document progress bar.
    #[arg(long)]
    pub progress: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let pipeline = CoreNlpClient::from_settings(&settings).context("building CoreNLP client")?;
    let mut counter = PatternCounter::new();
    let mut skipped = Vec::new();

    for split in &args.splits {
        info!(%split, "processing split");
        let corpus = data::load_split(&settings, *split)?;
        let pb = progress_bar(corpus.documents.len(), args.progress);
        let summary = patterns::mine_corpus(&corpus, &pipeline, &mut counter, &pb)
            .await
            .with_context(|| format!("mining {split} split"))?;
        pb.finish_and_clear();
        skipped.extend(summary.skipped);
    }

    if !skipped.is_empty() {
        warn!(count = skipped.len(), ?skipped, "documents skipped after parser timeout");
    }

    let rows = counter.finalize();
    let output = args
        .output
        .unwrap_or_else(|| settings.join_output("patterns.tsv"));
    aggregate::write_report(&rows, &output)?;
    info!(
        distinct = counter.len(),
        total = counter.total(),
        "pattern mining complete"
    );
    Ok(())
}
