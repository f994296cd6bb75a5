//! Corpus-wide pattern frequency table and report output.

use std::{collections::HashMap, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use tracing::info;

/// Running pattern counts shared by every document and split of a run.
#[derive(Debug, Clone, Default)]
pub struct PatternCounter {
    counts: HashMap<String, u64>,
    total: u64,
}

/// One row of the frequency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFrequency {
    pub pattern: String,
    pub count: u64,
}

impl PatternCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pattern: impl Into<String>) {
        *self.counts.entry(pattern.into()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, pattern: &str) -> u64 {
        self.counts.get(pattern).copied().unwrap_or(0)
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of recorded occurrences.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Rows sorted by count descending, then pattern ascending.
    pub fn finalize(&self) -> Vec<PatternFrequency> {
        let mut rows: Vec<PatternFrequency> = self
            .counts
            .iter()
            .map(|(pattern, &count)| PatternFrequency {
                pattern: pattern.clone(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pattern.cmp(&b.pattern)));
        rows
    }
}

/// Write `rows` as tab-separated `pattern<TAB>count` lines.
pub fn write_report_to<W: Write>(rows: &[PatternFrequency], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    for row in rows {
        let count = row.count.to_string();
        writer.write_record([row.pattern.as_str(), count.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_report(rows: &[PatternFrequency], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    write_report_to(rows, file)?;
    info!(path = %path.display(), rows = rows.len(), "wrote pattern report");
    Ok(())
}
