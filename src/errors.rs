use thiserror::Error;

/// Errors raised by the I/O facing parts of the crate (env files, options, the CLI).
/// The substitution pass itself never fails.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("command error: {0}")]
    Command(String),
}

pub type Result<T> = std::result::Result<T, EnvError>;
