//! Error types for refvocab.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Concept node #{index} in @graph has no usable @id")]
    MissingNodeIdentifier { index: usize },

    #[error("Malformed {relation} relation on {uri}: unexpected {found}")]
    MalformedRelationShape {
        uri: String,
        relation: String,
        found: String,
    },

    #[error("Malformed {field} literal on {uri}: {reason}")]
    MalformedLiteral {
        uri: String,
        field: String,
        reason: String,
    },

    #[error("Document has no @graph array")]
    MissingGraph,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;
