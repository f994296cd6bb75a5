//! Per-document identifier normalisation and mention lookup.

use std::collections::{BTreeSet, HashMap};

use indexmap::{IndexMap, IndexSet};

use crate::{data::EntityType, nlp::ParsedDoc};

/// Assigns short symbolic ids to raw identifiers and remembers every
/// placeholder produced for a document.
///
/// Symbolic ids are the decimal first-seen position of the raw identifier,
/// which keeps placeholders such as `GENE_0_3` in one piece through
/// tokenisation.
#[derive(Debug, Clone, Default)]
pub struct MentionNormalizer {
    ids: IndexSet<String>,
    placeholders: IndexMap<String, IndexSet<String>>,
    known: IndexSet<String>,
}

impl MentionNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbolic id for `raw`, allocating the next one on first sight.
    pub fn normalize(&mut self, raw: &str) -> String {
        let (position, _) = self.ids.insert_full(raw.to_string());
        position.to_string()
    }

    /// Build the placeholder for an annotation of `kind` whose identifier may
    /// be a comma-joined composite.
    pub fn placeholder(&mut self, kind: EntityType, identifier: &str) -> String {
        let components: Vec<&str> = identifier.split(',').collect();
        let mut parts = Vec::with_capacity(components.len() + 1);
        parts.push(kind.tag().to_string());
        for raw in &components {
            parts.push(self.normalize(raw));
        }
        let placeholder = parts.join("_");
        for raw in components {
            self.placeholders
                .entry(raw.to_string())
                .or_default()
                .insert(placeholder.clone());
        }
        self.known.insert(placeholder.clone());
        placeholder
    }

    pub fn is_placeholder(&self, text: &str) -> bool {
        self.known.contains(text)
    }

    /// Raw identifier behind a symbolic id.
    pub fn resolve(&self, symbolic: &str) -> Option<&str> {
        let position: usize = symbolic.parse().ok()?;
        self.ids.get_index(position).map(String::as_str)
    }

    /// Raw identifiers that received a placeholder, in first-seen order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.placeholders.keys().map(String::as_str)
    }

    /// Placeholders produced so far for `raw`, in first-produced order.
    pub fn placeholders_for(&self, raw: &str) -> impl Iterator<Item = &str> {
        self.placeholders
            .get(raw)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Raw identifier to the token positions of its placeholder occurrences.
#[derive(Debug, Clone, Default)]
pub struct MentionIndex {
    nodes: HashMap<String, BTreeSet<usize>>,
}

impl MentionIndex {
    /// Locate every placeholder occurrence in `parsed` and file it under the
    /// raw identifiers it was produced for. A composite placeholder lands
    /// under each of its components.
    pub fn build(parsed: &ParsedDoc, normalizer: &MentionNormalizer) -> Self {
        let mut occurrences: HashMap<&str, BTreeSet<usize>> = HashMap::new();
        for token in parsed.tokens() {
            if normalizer.is_placeholder(&token.text) {
                occurrences
                    .entry(token.text.as_str())
                    .or_default()
                    .insert(token.index);
            }
        }
        let nodes = normalizer
            .identifiers()
            .map(|raw| {
                let positions: BTreeSet<usize> = normalizer
                    .placeholders_for(raw)
                    .filter_map(|placeholder| occurrences.get(placeholder))
                    .flatten()
                    .copied()
                    .collect();
                (raw.to_string(), positions)
            })
            .collect();
        Self { nodes }
    }

    pub fn nodes(&self, raw: &str) -> Option<&BTreeSet<usize>> {
        self.nodes.get(raw).filter(|set| !set.is_empty())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
