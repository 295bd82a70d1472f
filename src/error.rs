use thiserror::Error;

/// Errors raised at the configuration boundary.
///
/// Shape violations inside the numeric core are programmer errors and panic
/// at the offending matrix operation instead.
#[derive(Debug, Error)]
pub enum SubstrateError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SubstrateError>;
