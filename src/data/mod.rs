//! Corpus ingestion layer.

pub mod corpus;

use anyhow::{Context, Result};

use crate::config::{Settings, Split};

pub use corpus::{Annotation, Corpus, Document, EntityType, Location, Passage, Relation};

/// Load the corpus file configured for `split`.
pub fn load_split(settings: &Settings, split: Split) -> Result<Corpus> {
    let path = settings.split_path(split);
    corpus::load(&path).with_context(|| format!("loading {split} split"))
}
