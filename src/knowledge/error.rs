use std::path::PathBuf;
use thiserror::Error;

/// Structural problems found while loading a knowledge base. All of them are
/// fatal at startup.
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed knowledge base: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("knowledge base declares no brands")]
    NoBrands,

    #[error("brand #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("duplicate brand key `{0}`")]
    DuplicateBrand(String),

    #[error("brand `{0}` has no display name")]
    MissingName(String),

    #[error("brand `{0}` has an empty error-code table")]
    EmptyCodeTable(String),
}
