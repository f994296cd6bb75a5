//! Error types for corpus loading, NLP calls and pattern mining.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or decoding an annotated corpus file.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema violation in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure talking to the external tokenizer/parser.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("parser request timed out")]
    Timeout,

    #[error("parser transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("parser returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed parser response: {0}")]
    Malformed(String),
}

impl PipelineError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

/// Fatal pattern-mining failure for one document.
#[derive(Error, Debug)]
pub enum MiningError {
    /// An annotation location does not fit inside its passage.
    #[error("document {doc_id}: location [{start}, {end}) outside passage of length {len}")]
    InvalidSpan {
        doc_id: String,
        start: i64,
        end: i64,
        len: usize,
    },

    /// A relation names an identifier with no placeholder occurrence in the document.
    #[error("document {doc_id}: relation identifier {identifier:?} has no mention")]
    UnresolvedEntity { doc_id: String, identifier: String },

    /// No head node reaches any tail node.
    #[error("document {doc_id}: no path between {head:?} and {tail:?}")]
    Disconnected {
        doc_id: String,
        head: String,
        tail: String,
    },

    #[error("document {doc_id}: {source}")]
    Pipeline {
        doc_id: String,
        #[source]
        source: PipelineError,
    },
}
