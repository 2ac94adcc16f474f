use thiserror::Error;

use tabulon_core::schema::DataType;

/// Problems with a query document (never with evaluation; see `tabulon_core::Error`).
#[derive(Debug, Error)]
pub enum DslError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pointer path is empty; it must end in a column ordinal")]
    EmptyPointer,

    #[error("{query} expects a {expected} literal but got {found}")]
    LiteralType {
        query: &'static str,
        expected: DataType,
        found: DataType,
    },
}
