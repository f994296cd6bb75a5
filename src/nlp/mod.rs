//! External tokenizer/dependency-parser capability.

pub mod corenlp;

use crate::error::PipelineError;

pub use corenlp::CoreNlpClient;

/// One token of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Position in the whole document, counting from zero.
    pub index: usize,
    pub text: String,
    /// Character offsets into the text handed to the pipeline.
    pub start: usize,
    pub end: usize,
    pub dep: String,
    /// Document-level index of the syntactic parent; `None` for a root.
    pub head: Option<usize>,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Designated root of the sentence's dependency tree.
    pub fn root(&self) -> Option<&Token> {
        self.tokens.iter().find(|t| t.is_root())
    }
}

/// Sentences of a parsed document, token indices running across sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub sentences: Vec<Sentence>,
}

impl ParsedDoc {
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }
}

/// Tokenizer and dependency parser, consumed as a black box.
#[allow(async_fn_in_trait)]
pub trait NlpPipeline {
    /// Tokenize `text` as a single segment, without sentence splitting.
    async fn tokenize(&self, text: &str) -> Result<Vec<Token>, PipelineError>;

    /// Split `text` into sentences and dependency-parse each of them.
    async fn parse(&self, text: &str) -> Result<ParsedDoc, PipelineError>;
}
