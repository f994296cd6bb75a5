//! BIO tagging of annotated passages for NER training.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    data::{Corpus, Passage},
    nlp::{NlpPipeline, Token},
};

pub const OUTSIDE: &str = "O";

/// A token and its BIO label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedToken {
    pub text: String,
    #[serde(rename = "ner")]
    pub label: String,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }

    fn is_boundary(&self) -> bool {
        self.text == "." && self.label == OUTSIDE
    }
}

/// Label passage tokens against the passage annotations.
///
/// `tokens` carry passage-relative character offsets. Later annotations win
/// over earlier ones. A token running past the end of the annotation that
/// labels it is cut there, the remainder following as an `O` token.
pub fn label_passage(doc_id: &str, passage: &Passage, tokens: &[Token]) -> Vec<TaggedToken> {
    let mut sample = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token_start = token.start as i64;
        let token_end = token.end as i64;
        let mut tagged = TaggedToken::new(token.text.clone(), OUTSIDE);
        let mut extra: Option<TaggedToken> = None;
        for annotation in &passage.annotations {
            for location in &annotation.locations {
                let (start, end) = location.relative_to(passage.offset);
                if token_start < start || token_start >= end {
                    continue;
                }
                let prefix = if token_start == start { "B" } else { "I" };
                tagged.label = format!("{prefix}-{}", annotation.infons.kind);
                if token_end > end {
                    warn!(
                        %doc_id,
                        identifier = %annotation.infons.identifier,
                        token = %token.text,
                        token_start = token.start,
                        annotation_end = end,
                        "token split by an annotation"
                    );
                    let split_point = (end - token_start) as usize;
                    let head: String = token.text.chars().take(split_point).collect();
                    let rest: String = token.text.chars().skip(split_point).collect();
                    tagged.text = head;
                    extra = Some(TaggedToken::new(rest, OUTSIDE));
                }
            }
        }
        sample.push(tagged);
        if let Some(extra) = extra {
            sample.push(extra);
        }
    }
    sample
}

/// Split an oversized sequence after sentence-final periods and repack the
/// pieces greedily, never exceeding `limit`.
pub fn enforce_limit(doc_id: &str, sample: Vec<TaggedToken>, limit: usize) -> Vec<Vec<TaggedToken>> {
    if sample.len() <= limit {
        return if sample.is_empty() { Vec::new() } else { vec![sample] };
    }
    let limit = limit.max(1);

    let mut segments: Vec<Vec<TaggedToken>> = Vec::new();
    let mut current = Vec::new();
    for token in sample {
        let boundary = token.is_boundary();
        current.push(token);
        if boundary {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    // a single run without periods still has to fit
    let segments: Vec<Vec<TaggedToken>> = segments
        .into_iter()
        .flat_map(|segment| {
            if segment.len() <= limit {
                vec![segment]
            } else {
                segment.chunks(limit).map(<[TaggedToken]>::to_vec).collect()
            }
        })
        .collect();
    let before: Vec<usize> = segments.iter().map(Vec::len).collect();

    let mut packed: Vec<Vec<TaggedToken>> = Vec::new();
    let mut current: Vec<TaggedToken> = Vec::new();
    for segment in segments {
        if current.len() + segment.len() > limit && !current.is_empty() {
            packed.push(std::mem::take(&mut current));
        }
        current.extend(segment);
    }
    if !current.is_empty() {
        packed.push(current);
    }
    let after: Vec<usize> = packed.iter().map(Vec::len).collect();
    warn!(%doc_id, limit, ?before, ?after, "token number exceeds limit; resegmented");
    packed
}

/// BIO sequences for one corpus split.
#[derive(Debug, Clone, Default)]
pub struct BioConversion {
    pub sequences: Vec<Vec<TaggedToken>>,
    /// Passages that had to be resegmented.
    pub oversized: usize,
}

/// Tokenize and label every passage of `corpus`.
pub async fn convert_corpus<P: NlpPipeline>(
    corpus: &Corpus,
    pipeline: &P,
    limit: usize,
    progress: &ProgressBar,
) -> Result<BioConversion> {
    let mut conversion = BioConversion::default();
    for doc in &corpus.documents {
        progress.set_message(doc.id.clone());
        for passage in &doc.passages {
            let tokens = pipeline
                .tokenize(&passage.text)
                .await
                .with_context(|| format!("tokenize document {}", doc.id))?;
            let sample = label_passage(&doc.id, passage, &tokens);
            if sample.len() > limit {
                conversion.oversized += 1;
            }
            conversion
                .sequences
                .extend(enforce_limit(&doc.id, sample, limit));
        }
        progress.inc(1);
    }
    info!(
        sequences = conversion.sequences.len(),
        oversized = conversion.oversized,
        "converted corpus to BIO"
    );
    Ok(conversion)
}

/// `token<TAB>label` lines, one blank line after each sequence.
pub fn write_bio_to<W: Write>(sequences: &[Vec<TaggedToken>], mut writer: W) -> Result<()> {
    for sequence in sequences {
        for token in sequence {
            writeln!(writer, "{}\t{}", token.text, token.label)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_bio(sequences: &[Vec<TaggedToken>], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    write_bio_to(sequences, BufWriter::new(file))?;
    info!(path = %path.display(), sequences = sequences.len(), "wrote BIO file");
    Ok(())
}

/// Sequences as a JSON array of `{"text", "ner"}` token arrays.
pub fn write_json(sequences: &[Vec<TaggedToken>], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, sequences)?;
    writer.flush()?;
    info!(path = %path.display(), sequences = sequences.len(), "wrote NER json");
    Ok(())
}
