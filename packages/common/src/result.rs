use crate::error::GenuiError;

/// Common Result type alias
pub type GenuiResult<T> = Result<T, GenuiError>;
