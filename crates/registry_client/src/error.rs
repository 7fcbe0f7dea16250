use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx answer. `error`/`message` come from the JSON error body when
    /// the server sent one.
    #[error("server returned {status}: {error}")]
    Status {
        status: u16,
        error: String,
        message: Option<String>,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }
}
