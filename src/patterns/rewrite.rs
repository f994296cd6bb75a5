//! Placeholder substitution over passage text.
//!
//! Edits are applied right to left so that every not-yet-applied span still
//! addresses the untouched prefix of the text. Overlapping spans are applied
//! in the same order and yield garbled but deterministic output.

use crate::{
    data::{Document, Passage},
    error::MiningError,
};

use super::mention::MentionNormalizer;

/// One span substitution, in passage-relative characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub placeholder: String,
}

/// Substitute every recognised annotation of `passage`.
pub fn rewrite_passage(
    doc_id: &str,
    passage: &Passage,
    normalizer: &mut MentionNormalizer,
) -> Result<String, MiningError> {
    let len = passage.text.chars().count();
    let mut edits = Vec::new();
    for annotation in &passage.annotations {
        let Some(kind) = annotation.entity_type() else {
            continue;
        };
        let placeholder = normalizer.placeholder(kind, &annotation.infons.identifier);
        for location in &annotation.locations {
            let (start, end) = location.relative_to(passage.offset);
            if start < 0 || end < start || end as usize > len {
                return Err(MiningError::InvalidSpan {
                    doc_id: doc_id.to_string(),
                    start,
                    end,
                    len,
                });
            }
            edits.push(Edit {
                start: start as usize,
                end: end as usize,
                placeholder: placeholder.clone(),
            });
        }
    }
    Ok(apply_edits(&passage.text, edits))
}

/// Apply `edits` highest offset first, then collapse whitespace runs.
pub fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_unstable_by(|a, b| b.cmp(a));
    let mut chars: Vec<char> = text.chars().collect();
    for edit in edits {
        // earlier overlapping edits may have shortened the text
        let start = edit.start.min(chars.len());
        let end = edit.end.clamp(start, chars.len());
        let replacement = format!(" {} ", edit.placeholder);
        chars.splice(start..end, replacement.chars());
    }
    collapse_whitespace(&chars.into_iter().collect::<String>())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite all passages of `doc` and join them with single spaces.
pub fn rewrite_document(
    doc: &Document,
    normalizer: &mut MentionNormalizer,
) -> Result<String, MiningError> {
    let mut rewritten = Vec::with_capacity(doc.passages.len());
    for passage in &doc.passages {
        rewritten.push(rewrite_passage(&doc.id, passage, normalizer)?);
    }
    Ok(rewritten.join(" "))
}
