#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use pathminer::{
    data::Document,
    error::PipelineError,
    nlp::{NlpPipeline, ParsedDoc, Sentence, Token},
};
use serde_json::{json, Value};

/// Whitespace tokens with character offsets.
pub fn whitespace_tokens(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();
    for (pos, ch) in chars.iter().enumerate() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(token(tokens.len(), &current, s, pos));
                current.clear();
            }
        } else {
            if start.is_none() {
                start = Some(pos);
            }
            current.push(*ch);
        }
    }
    if let Some(s) = start {
        tokens.push(token(tokens.len(), &current, s, chars.len()));
    }
    tokens
}

fn token(index: usize, text: &str, start: usize, end: usize) -> Token {
    Token {
        index,
        text: text.to_string(),
        start,
        end,
        dep: String::new(),
        head: None,
    }
}

/// Split whitespace tokens into sentences after every `.` and attach heads.
/// Without explicit heads each sentence is a chain rooted at its first token.
pub fn parse_with(text: &str, heads: Option<&[Option<usize>]>) -> ParsedDoc {
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for mut token in whitespace_tokens(text) {
        token.head = match heads {
            Some(heads) => heads[token.index],
            None if current.is_empty() => None,
            None => Some(token.index - 1),
        };
        token.dep = if token.head.is_none() { "ROOT" } else { "dep" }.to_string();
        let boundary = token.text == ".";
        current.push(token);
        if boundary {
            sentences.push(Sentence {
                tokens: std::mem::take(&mut current),
            });
        }
    }
    if !current.is_empty() {
        sentences.push(Sentence { tokens: current });
    }
    ParsedDoc { sentences }
}

/// Deterministic stand-in for the external parser.
#[derive(Debug, Default)]
pub struct FakePipeline {
    heads: HashMap<String, Vec<Option<usize>>>,
    slow: HashSet<String>,
}

impl FakePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `heads` (document token positions) when asked to parse `text`.
    pub fn with_heads(mut self, text: &str, heads: Vec<Option<usize>>) -> Self {
        self.heads.insert(text.to_string(), heads);
        self
    }

    /// Report a timeout when asked to parse `text`.
    pub fn timing_out_on(mut self, text: &str) -> Self {
        self.slow.insert(text.to_string());
        self
    }
}

impl NlpPipeline for FakePipeline {
    async fn tokenize(&self, text: &str) -> Result<Vec<Token>, PipelineError> {
        Ok(whitespace_tokens(text))
    }

    async fn parse(&self, text: &str) -> Result<ParsedDoc, PipelineError> {
        if self.slow.contains(text) {
            return Err(PipelineError::Timeout);
        }
        Ok(parse_with(text, self.heads.get(text).map(Vec::as_slice)))
    }
}

pub fn annotation(kind: &str, identifier: &str, offset: i64, text: &str) -> Value {
    json!({
        "infons": {"type": kind, "identifier": identifier},
        "locations": [{"offset": offset, "length": text.chars().count()}],
        "text": text,
    })
}

pub fn relation(entity1: &str, entity2: &str) -> Value {
    json!({"infons": {"entity1": entity1, "entity2": entity2}})
}

pub fn document(id: &str, passages: Vec<Value>, relations: Vec<Value>) -> Document {
    serde_json::from_value(json!({
        "id": id,
        "passages": passages,
        "relations": relations,
    }))
    .expect("valid document")
}

pub fn passage(text: &str, offset: i64, annotations: Vec<Value>) -> Value {
    json!({"text": text, "offset": offset, "annotations": annotations})
}

/// "Gene A causes Disease B." with one gene and one disease related.
pub fn causes_document() -> Document {
    document(
        "doc-1",
        vec![passage(
            "Gene A causes Disease B.",
            0,
            vec![
                annotation("GeneOrGeneProduct", "g1", 0, "Gene A"),
                annotation("DiseaseOrPhenotypicFeature", "d1", 14, "Disease B"),
            ],
        )],
        vec![relation("g1", "d1")],
    )
}

/// Heads for "GENE_0 causes DISEASE_1 ." rooted at "causes".
pub fn causes_heads() -> Vec<Option<usize>> {
    vec![Some(1), None, Some(1), Some(1)]
}
