//! Dependency-path pattern mining and BIO conversion for biomedical relation
//! corpora.

pub mod bio;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod patterns;
pub mod stats;
