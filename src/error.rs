//! Error types.
//!
//! Only dataset and I/O problems are errors. An attack the grammar does not
//! recognize is a normal outcome (`CompiledEffect::Unimplemented`) and never
//! surfaces here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected dataset document: {0}")]
    Document(String),

    /// Card metadata that does not fit the schema. Fatal for the whole run.
    #[error("malformed card {card}: {reason}")]
    Malformed { card: String, reason: MalformedReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("no evolution stage among subtypes {subtypes:?}")]
    MissingStage { subtypes: Vec<String> },

    #[error("evolved card without a predecessor name")]
    MissingPredecessor,

    #[error("missing hit points")]
    MissingHitPoints,

    #[error("{0}")]
    Shape(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
