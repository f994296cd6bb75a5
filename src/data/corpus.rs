//! BioC-style annotated corpus model.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::CorpusError;

/// Top-level corpus file.
#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    pub passages: Vec<Passage>,
    pub relations: Vec<Relation>,
}

/// A block of document text with its own annotations.
#[derive(Debug, Clone, Deserialize)]
pub struct Passage {
    pub text: String,
    /// Start of this passage in the document-wide character numbering.
    pub offset: i64,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    pub infons: AnnotationInfons,
    pub locations: Vec<Location>,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationInfons {
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw identifier; comma-joined for composite mentions.
    pub identifier: String,
}

/// Half-open span `[offset, offset + length)` in document characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub offset: i64,
    pub length: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relation {
    pub infons: RelationInfons,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationInfons {
    pub entity1: String,
    pub entity2: String,
}

/// Entity categories that take part in pattern mining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Gene,
    Disease,
    Chemical,
    Variant,
}

impl EntityType {
    /// Recognise either the short tag or the BioRED long label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "GENE" | "GeneOrGeneProduct" => Some(Self::Gene),
            "DISEASE" | "DiseaseOrPhenotypicFeature" => Some(Self::Disease),
            "CHEMICAL" | "ChemicalEntity" => Some(Self::Chemical),
            "VARIANT" | "SequenceVariant" => Some(Self::Variant),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Gene => "GENE",
            Self::Disease => "DISEASE",
            Self::Chemical => "CHEMICAL",
            Self::Variant => "VARIANT",
        }
    }
}

impl Annotation {
    pub fn entity_type(&self) -> Option<EntityType> {
        EntityType::from_label(&self.infons.kind)
    }
}

impl Location {
    /// Span relative to a passage starting at `base`.
    pub fn relative_to(&self, base: i64) -> (i64, i64) {
        let start = self.offset - base;
        (start, start + self.length)
    }
}

impl Corpus {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Read and decode one corpus file. Any schema violation is fatal.
pub fn load(path: &Path) -> Result<Corpus, CorpusError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let corpus = Corpus::from_json(&raw).map_err(|source| CorpusError::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), documents = corpus.documents.len(), "loaded corpus");
    Ok(corpus)
}
