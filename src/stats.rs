//! Descriptive statistics over an annotated corpus split.

use std::{collections::HashSet, fmt};

use indexmap::IndexMap;

use crate::data::Corpus;

/// Max, min and mean of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spread {
    pub max: usize,
    pub min: usize,
    pub mean: f64,
}

impl Spread {
    pub fn of(values: &[usize]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let max = values.iter().copied().max().unwrap_or_default();
        let min = values.iter().copied().min().unwrap_or_default();
        let mean = values.iter().sum::<usize>() as f64 / values.len() as f64;
        Self { max, min, mean }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    pub passages: usize,
    /// Passage length in characters.
    pub text_length: Spread,
    /// Passage length in whitespace-separated words.
    pub word_count: Spread,
    /// Distinct mention surface strings per raw entity type, first-seen order.
    pub mentions_by_type: IndexMap<String, usize>,
}

pub fn compute(corpus: &Corpus) -> CorpusStats {
    let mut lengths = Vec::new();
    let mut words = Vec::new();
    let mut mentions: IndexMap<String, HashSet<&str>> = IndexMap::new();
    for doc in &corpus.documents {
        for passage in &doc.passages {
            lengths.push(passage.text.chars().count());
            words.push(passage.text.split_whitespace().count());
            for annotation in &passage.annotations {
                mentions
                    .entry(annotation.infons.kind.clone())
                    .or_default()
                    .insert(annotation.text.as_str());
            }
        }
    }
    CorpusStats {
        passages: lengths.len(),
        text_length: Spread::of(&lengths),
        word_count: Spread::of(&words),
        mentions_by_type: mentions
            .into_iter()
            .map(|(kind, set)| (kind, set.len()))
            .collect(),
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "passages\t{}", self.passages)?;
        writeln!(
            f,
            "characters\tmax {}\tmin {}\tmean {:.2}",
            self.text_length.max, self.text_length.min, self.text_length.mean
        )?;
        writeln!(
            f,
            "words\tmax {}\tmin {}\tmean {:.2}",
            self.word_count.max, self.word_count.min, self.word_count.mean
        )?;
        writeln!(f, "entity types\t{}", self.mentions_by_type.len())?;
        for (kind, count) in &self.mentions_by_type {
            writeln!(f, "{kind}\t{count}")?;
        }
        Ok(())
    }
}
