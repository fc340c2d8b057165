use thiserror::Error;

/// Error type for the fallible edges of the engine (loading catalogs and config).
///
/// The core operations never return it: malformed generator output degrades
/// to skip, repair or report instead.
#[derive(Error, Debug)]
pub enum GenuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<String> for GenuiError {
    fn from(s: String) -> Self {
        GenuiError::Config(s)
    }
}

impl From<&str> for GenuiError {
    fn from(s: &str) -> Self {
        GenuiError::Config(s.to_string())
    }
}
