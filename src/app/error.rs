use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl ContentError {
    /// The resource does not exist, as opposed to being unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::ResourceNotFound(_) | ContentError::Status { status: 404, .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
