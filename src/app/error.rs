use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status} for {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    /// The server does not implement the endpoint at all.
    #[error("Endpoint not supported by this instance: {0}")]
    Unsupported(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Status not found: {0}")]
    StatusNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl TuskError {
    /// True when the failure means "this server lacks the endpoint", as opposed
    /// to a transient transport or decoding problem.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TuskError::Unsupported(_))
    }
}

pub type Result<T> = std::result::Result<T, TuskError>;
