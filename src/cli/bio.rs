//! CLI entry-point for BIO conversion.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use pathminer::{
    bio,
    config::{Settings, Split},
    data,
    nlp::CoreNlpClient,
};
use tracing::{info, instrument};

use super::progress_bar;

/// Args for the `bio` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Splits to convert, one output file each.
    #[arg(long, value_delimiter = ',', value_enum, default_values_t = Split::ALL)]
    pub splits: Vec<Split>,
    /// Override the maximum tokens per sequence.
    #[arg(long)]
    pub max_tokens: Option<usize>,
    /// Also write `{"text", "ner"}` JSON next to each BIO file.
    #[arg(long)]
    pub json: bool,
    /// Show a per-document progress bar.
    #[arg(long)]
    pub progress: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let limit = args.max_tokens.unwrap_or(settings.bio_max_tokens);
    let pipeline = CoreNlpClient::from_settings(&settings).context("building CoreNLP client")?;
    let short_name = settings.short_name();

    for split in &args.splits {
        info!(%split, limit, "converting split");
        let corpus = data::load_split(&settings, *split)?;
        let pb = progress_bar(corpus.documents.len(), args.progress);
        let conversion = bio::convert_corpus(&corpus, &pipeline, limit, &pb).await?;
        pb.finish_and_clear();

        bio::write_bio(
            &conversion.sequences,
            &settings.join_output(format!("{short_name}.{split}.bio")),
        )?;
        if args.json {
            bio::write_json(
                &conversion.sequences,
                &settings.join_output(format!("{short_name}.{split}.json")),
            )?;
        }
        info!(%split, oversized = conversion.oversized, "split converted");
    }
    Ok(())
}
