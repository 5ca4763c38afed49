use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not permitted: {0}")]
    Denied(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid: {0}")]
    Invalid(String),
    #[error("db error: {0}")]
    Db(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => Self::Conflict(err.to_string()),
            _ => Self::Db(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Db(format!("bad json column: {err}"))
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Db(format!("storage task failed: {err}"))
    }
}

/// Failure of the outbound completion call. Never retried; the caller turns
/// it into a flagged message for the single request.
#[derive(Error, Debug, Clone)]
pub enum CompletionError {
    #[error("no API key configured for the caddie")]
    NotConfigured,
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("round {0} is not complete")]
    Incomplete(i64),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum CaddieError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("{0}")]
    Other(String),
}

impl From<String> for CaddieError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for CaddieError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
