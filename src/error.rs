use thiserror::Error;

/// Why a Trello call produced nothing.
///
/// Read operations attach one of these to their (empty) result instead of
/// failing, so callers can tell "no cards" apart from "Trello unreachable".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("{0}")]
    Configuration(String),
    #[error("Trello responded with status {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("Failed to decode Trello response: {0}")]
    Decode(String),
    #[error("Invalid Trello URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<reqwest::Error> for SyncError {
    /// The request URL carries the key and token as query parameters, so it
    /// is stripped before the error is turned into text.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            SyncError::Decode(err.to_string())
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}

/// Outcome tags for task creation. The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateTaskError {
    #[error("{0}")]
    Configuration(String),
    #[error("Could not create the task in Trello. Check the API configuration.")]
    Rejected { status: Option<u16> },
    #[error("Connection error to Trello: {0}")]
    Connection(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<SyncError> for CreateTaskError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Configuration(msg) => CreateTaskError::Configuration(msg),
            SyncError::Status { status } => CreateTaskError::Rejected {
                status: Some(status),
            },
            SyncError::Transport(msg) => CreateTaskError::Connection(msg),
            other => CreateTaskError::Unexpected(other.to_string()),
        }
    }
}
