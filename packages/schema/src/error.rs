//! Error types for catalog loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Alias '{alias}' points at unknown type '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("Sub-component '{name}' refers to unknown schema '{parent}.{schema}'")]
    UnknownSubSchema {
        name: String,
        parent: String,
        schema: String,
    },
}
