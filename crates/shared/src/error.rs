use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ContentUnavailable,
    TransportFailure,
}

/// Failure surfaced by a content provider. Callers degrade to "nothing
/// available" for every variant.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no usable content available")]
    Unavailable,
    #[error("content request failed: {0}")]
    Transport(String),
    #[error("content response could not be parsed: {0}")]
    Malformed(String),
}

impl ContentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ContentError::Unavailable => ErrorCode::ContentUnavailable,
            ContentError::Transport(_) | ContentError::Malformed(_) => {
                ErrorCode::TransportFailure
            }
        }
    }
}
