use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwissverseError {
    #[error("not initialized: run 'swissverse init'")]
    NotInitialized,

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("backend rejected request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("swap left '{table}' inconsistent: {reason}")]
    SwapInconsistent { table: String, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwissverseError>;
