//! Stanford CoreNLP server client.
//!
//! The server is driven over its HTTP API: the text is POSTed as the request
//! body and the annotator configuration travels in the `properties` query
//! parameter. Responses use the JSON output format.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{NlpPipeline, ParsedDoc, Sentence, Token};
use crate::{config::Settings, error::PipelineError};

const PARSE_ANNOTATORS: &str = "tokenize,ssplit,pos,depparse";
const TOKENIZE_ANNOTATORS: &str = "tokenize,ssplit";

/// HTTP-backed [`NlpPipeline`].
#[derive(Debug, Clone)]
pub struct CoreNlpClient {
    client: Client,
    base_url: String,
}

impl CoreNlpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .user_agent("pathminer/0.1")
            .timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, PipelineError> {
        Self::new(settings.corenlp_url.clone(), settings.parse_timeout)
    }

    async fn annotate(
        &self,
        text: &str,
        properties: serde_json::Value,
    ) -> Result<CoreNlpDocument, PipelineError> {
        let resp = self
            .client
            .post(&self.base_url)
            .query(&[("properties", properties.to_string())])
            .body(text.to_string())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PipelineError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let payload: CoreNlpDocument = resp.json().await?;
        debug!(sentences = payload.sentences.len(), "corenlp response");
        Ok(payload)
    }
}

impl NlpPipeline for CoreNlpClient {
    async fn tokenize(&self, text: &str) -> Result<Vec<Token>, PipelineError> {
        let properties = json!({
            "annotators": TOKENIZE_ANNOTATORS,
            "ssplit.isOneSentence": "true",
            "outputFormat": "json",
        });
        let doc = self.annotate(text, properties).await?;
        let mut tokens = Vec::new();
        for sentence in doc.sentences {
            for raw in sentence.tokens {
                let index = tokens.len();
                tokens.push(raw.into_token(index, None, String::new()));
            }
        }
        Ok(tokens)
    }

    async fn parse(&self, text: &str) -> Result<ParsedDoc, PipelineError> {
        let properties = json!({
            "annotators": PARSE_ANNOTATORS,
            "outputFormat": "json",
        });
        let doc = self.annotate(text, properties).await?;
        into_parsed(doc)
    }
}

/// Re-index sentence-local, 1-based CoreNLP positions into document positions.
fn into_parsed(doc: CoreNlpDocument) -> Result<ParsedDoc, PipelineError> {
    let mut sentences = Vec::with_capacity(doc.sentences.len());
    let mut base = 0usize;
    for sentence in doc.sentences {
        let len = sentence.tokens.len();
        let mut heads: Vec<Option<usize>> = vec![None; len];
        let mut labels: Vec<String> = vec![String::new(); len];
        for dep in sentence.basic_dependencies {
            if dep.dependent == 0 || dep.dependent > len || dep.governor > len {
                return Err(PipelineError::malformed(format!(
                    "dependency {}->{} outside sentence of {len} tokens",
                    dep.governor, dep.dependent
                )));
            }
            let slot = dep.dependent - 1;
            heads[slot] = dep.governor.checked_sub(1).map(|g| base + g);
            labels[slot] = dep.dep;
        }
        let tokens = sentence
            .tokens
            .into_iter()
            .zip(heads.into_iter().zip(labels))
            .enumerate()
            .map(|(offset, (raw, (head, label)))| raw.into_token(base + offset, head, label))
            .collect();
        sentences.push(Sentence { tokens });
        base += len;
    }
    Ok(ParsedDoc { sentences })
}

#[derive(Debug, Deserialize)]
struct CoreNlpDocument {
    #[serde(default)]
    sentences: Vec<CoreNlpSentence>,
}

#[derive(Debug, Deserialize)]
struct CoreNlpSentence {
    #[serde(default)]
    tokens: Vec<CoreNlpToken>,
    #[serde(rename = "basicDependencies", default)]
    basic_dependencies: Vec<CoreNlpDependency>,
}

#[derive(Debug, Deserialize)]
struct CoreNlpToken {
    word: String,
    #[serde(rename = "originalText")]
    original_text: Option<String>,
    #[serde(rename = "characterOffsetBegin")]
    begin: usize,
    #[serde(rename = "characterOffsetEnd")]
    end: usize,
}

impl CoreNlpToken {
    fn into_token(self, index: usize, head: Option<usize>, dep: String) -> Token {
        Token {
            index,
            text: self.original_text.unwrap_or(self.word),
            start: self.begin,
            end: self.end,
            dep,
            head,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoreNlpDependency {
    dep: String,
    governor: usize,
    dependent: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reindexes_heads_across_sentences() {
        let raw = r#"{"sentences": [
            {"tokens": [
                {"word": "Aspirin", "originalText": "Aspirin", "characterOffsetBegin": 0, "characterOffsetEnd": 7},
                {"word": "works", "originalText": "works", "characterOffsetBegin": 8, "characterOffsetEnd": 13}
             ],
             "basicDependencies": [
                {"dep": "ROOT", "governor": 0, "dependent": 2},
                {"dep": "nsubj", "governor": 2, "dependent": 1}
             ]},
            {"tokens": [
                {"word": "Yes", "originalText": "Yes", "characterOffsetBegin": 14, "characterOffsetEnd": 17}
             ],
             "basicDependencies": [{"dep": "ROOT", "governor": 0, "dependent": 1}]}
        ]}"#;
        let doc: CoreNlpDocument = serde_json::from_str(raw).unwrap();
        let parsed = into_parsed(doc).unwrap();

        let heads: Vec<Option<usize>> = parsed.tokens().map(|t| t.head).collect();
        assert_eq!(heads, vec![Some(1), None, None]);
        assert_eq!(parsed.sentences[1].root().map(|t| t.index), Some(2));
        assert_eq!(parsed.sentences[0].tokens[0].dep, "nsubj");
    }

    #[test]
    fn rejects_out_of_range_dependency() {
        let raw = r#"{"sentences": [{"tokens": [
            {"word": "x", "characterOffsetBegin": 0, "characterOffsetEnd": 1}
        ], "basicDependencies": [{"dep": "dep", "governor": 1, "dependent": 4}]}]}"#;
        let doc: CoreNlpDocument = serde_json::from_str(raw).unwrap();
        assert!(matches!(into_parsed(doc), Err(PipelineError::Malformed(_))));
    }
}
