//! Dependency-path pattern mining.
//!
//! Per document: entity mentions are replaced by placeholders, the rewritten
//! text is parsed once, and every relation's head/tail placeholders are
//! connected through the shortest paths of the document graph. Each path's
//! interior is rendered as a pattern and counted in a [`PatternCounter`]
//! shared across the whole run.

pub mod aggregate;
pub mod canonical;
pub mod graph;
pub mod mention;
pub mod paths;
pub mod rewrite;

use indicatif::ProgressBar;
use tracing::{debug, error, info, warn};

use crate::{
    data::{Corpus, Document},
    error::MiningError,
    nlp::{NlpPipeline, ParsedDoc},
};

pub use aggregate::{PatternCounter, PatternFrequency};
pub use graph::DocGraph;
pub use mention::{MentionIndex, MentionNormalizer};

/// A document after placeholder substitution.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub text: String,
    pub normalizer: MentionNormalizer,
}

/// Substitute every recognised mention of `doc`.
pub fn prepare(doc: &Document) -> Result<PreparedDocument, MiningError> {
    let mut normalizer = MentionNormalizer::new();
    let text = rewrite::rewrite_document(doc, &mut normalizer)?;
    Ok(PreparedDocument { text, normalizer })
}

/// Patterns of every relation of `doc`, in relation order, given the parse
/// of its rewritten text.
pub fn mine_parsed(
    doc: &Document,
    prepared: &PreparedDocument,
    parsed: &ParsedDoc,
) -> Result<Vec<String>, MiningError> {
    let graph = DocGraph::build(parsed).map_err(|source| MiningError::Pipeline {
        doc_id: doc.id.clone(),
        source,
    })?;
    let index = MentionIndex::build(parsed, &prepared.normalizer);
    debug!(
        doc_id = %doc.id,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        mentions = index.len(),
        "built document graph"
    );

    let resolve = |identifier: &str| {
        index
            .nodes(identifier)
            .ok_or_else(|| MiningError::UnresolvedEntity {
                doc_id: doc.id.clone(),
                identifier: identifier.to_string(),
            })
    };

    let mut patterns = Vec::new();
    for relation in &doc.relations {
        let head = &relation.infons.entity1;
        let tail = &relation.infons.entity2;
        let heads = resolve(head)?;
        let tails = resolve(tail)?;
        let found = paths::relation_paths(&graph, heads, tails).ok_or_else(|| {
            MiningError::Disconnected {
                doc_id: doc.id.clone(),
                head: head.clone(),
                tail: tail.clone(),
            }
        })?;
        for path in &found.paths {
            patterns.push(canonical::canonicalize(path, &graph, &prepared.normalizer));
        }
    }
    Ok(patterns)
}

/// Rewrite, parse and mine one document into `counter`. Returns the number
/// of patterns recorded.
pub async fn mine_document<P: NlpPipeline>(
    doc: &Document,
    pipeline: &P,
    counter: &mut PatternCounter,
) -> Result<usize, MiningError> {
    let prepared = prepare(doc)?;
    if doc.relations.is_empty() {
        return Ok(0);
    }
    let parsed = pipeline
        .parse(&prepared.text)
        .await
        .map_err(|source| MiningError::Pipeline {
            doc_id: doc.id.clone(),
            source,
        })?;
    let patterns = mine_parsed(doc, &prepared, &parsed)?;
    let recorded = patterns.len();
    for pattern in patterns {
        counter.record(pattern);
    }
    Ok(recorded)
}

/// Outcome of mining one corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiningSummary {
    pub documents: usize,
    pub relations: usize,
    pub patterns: usize,
    /// Documents whose parse exceeded the pipeline timeout.
    pub skipped: Vec<String>,
}

/// Mine every document of `corpus` in order. A parser timeout skips the
/// document; any other error aborts.
pub async fn mine_corpus<P: NlpPipeline>(
    corpus: &Corpus,
    pipeline: &P,
    counter: &mut PatternCounter,
    progress: &ProgressBar,
) -> Result<MiningSummary, MiningError> {
    let mut summary = MiningSummary::default();
    for doc in &corpus.documents {
        progress.set_message(doc.id.clone());
        match mine_document(doc, pipeline, counter).await {
            Ok(recorded) => {
                summary.documents += 1;
                summary.relations += doc.relations.len();
                summary.patterns += recorded;
            }
            Err(MiningError::Pipeline { doc_id, source }) if source.is_timeout() => {
                warn!(%doc_id, "parser timed out; skipping document");
                summary.skipped.push(doc_id);
            }
            Err(err) => {
                error!(doc_id = %doc.id, error = %err, "pattern mining failed");
                return Err(err);
            }
        }
        progress.inc(1);
    }
    info!(
        documents = summary.documents,
        relations = summary.relations,
        patterns = summary.patterns,
        skipped = summary.skipped.len(),
        "mined corpus"
    );
    Ok(summary)
}
