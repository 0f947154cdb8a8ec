use thiserror::Error as ThisError;

/// Failure classes for a backend call. `Validation` is raised before any
/// network I/O happens; `Backend` carries the backend's own error string
/// verbatim. No error here is fatal to the process, each one only
/// terminates the action that triggered it.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("bad response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("{0}")]
    Backend(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
