//! Runtime configuration utilities for pathminer.

use std::{
    env, fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;

/// Named dataset split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Dev,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder holding the annotated split files.
    pub dataset_dir: PathBuf,
    /// Dataset short name, used for BIO output file names.
    pub dataset_name: String,
    /// Language prefix for BIO output file names.
    pub dataset_lang: String,
    pub train_file: String,
    pub dev_file: String,
    pub test_file: String,
    /// Root folder for generated artefacts.
    pub outputs_dir: PathBuf,
    /// Base URL of the CoreNLP server.
    pub corenlp_url: String,
    /// Per-document parser timeout.
    pub parse_timeout: Duration,
    /// Maximum tokens per BIO sequence.
    pub bio_max_tokens: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("./data"),
            dataset_name: "BioRED".to_string(),
            dataset_lang: "en".to_string(),
            train_file: "Train.BioC.JSON".to_string(),
            dev_file: "Dev.BioC.JSON".to_string(),
            test_file: "Test.BioC.JSON".to_string(),
            outputs_dir: PathBuf::from("./outputs"),
            corenlp_url: "http://localhost:9000".to_string(),
            parse_timeout: Duration::from_secs(120),
            bio_max_tokens: 256,
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let dataset_dir = env::var("DATASET_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_dir);
        let dataset_name = env::var("DATASET_NAME").unwrap_or(defaults.dataset_name);
        let dataset_lang = env::var("DATASET_LANG").unwrap_or(defaults.dataset_lang);
        let train_file = env::var("TRAIN_FILE").unwrap_or(defaults.train_file);
        let dev_file = env::var("DEV_FILE").unwrap_or(defaults.dev_file);
        let test_file = env::var("TEST_FILE").unwrap_or(defaults.test_file);
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.outputs_dir);
        let corenlp_url = env::var("CORENLP_URL").unwrap_or(defaults.corenlp_url);
        let parse_timeout = env::var("PARSE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.parse_timeout);
        let bio_max_tokens = env::var("BIO_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.bio_max_tokens);

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            dataset_dir,
            dataset_name,
            dataset_lang,
            train_file,
            dev_file,
            test_file,
            outputs_dir,
            corenlp_url,
            parse_timeout,
            bio_max_tokens,
        })
    }

    /// Location of the file backing `split`.
    pub fn split_path(&self, split: Split) -> PathBuf {
        let file = match split {
            Split::Train => &self.train_file,
            Split::Dev => &self.dev_file,
            Split::Test => &self.test_file,
        };
        self.dataset_dir.join(file)
    }

    /// Lowercased `<lang>_<dataset>` prefix for BIO artefacts.
    pub fn short_name(&self) -> String {
        format!("{}_{}", self.dataset_lang, self.dataset_name).to_lowercase()
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
