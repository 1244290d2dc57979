//! Error types for session handling and batch validation.

use thiserror::Error;

/// Errors surfaced by the quiz service.
#[derive(Debug, Error)]
pub enum QuizError {
    /// No session is registered under this identifier.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The question source failed; nothing was stored.
    #[error("unable to generate questions: {0:#}")]
    Generation(anyhow::Error),

    /// The session store failed.
    #[error("session store error: {0:#}")]
    Store(anyhow::Error),
}

impl QuizError {
    /// Returns `true` if the caller asked for something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuizError::SessionNotFound(_))
    }
}

/// Reasons an externally sourced question batch is rejected.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The content is not JSON.
    #[error("batch is not valid JSON: {0}")]
    InvalidJson(String),

    /// The top-level JSON value is not an array.
    #[error("batch is not a JSON array")]
    NotAnArray,

    /// The array holds the wrong number of entries.
    #[error("expected {expected} questions, received {actual}")]
    WrongCount { expected: usize, actual: usize },

    /// An entry is missing a field or has the wrong shape.
    #[error("question {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Two entries share an identifier.
    #[error("question {index} reuses id `{id}`")]
    DuplicateId { index: usize, id: String },
}
