//! Provider error types.

use mathdrill_core::BatchError;
use thiserror::Error;

/// Errors that can occur when fetching questions from a remote model.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured for the provider.
    #[error("{0} API key is not configured")]
    MissingApiKey(&'static str),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response carried no message content.
    #[error("model returned no content")]
    EmptyResponse,

    /// The returned questions failed validation.
    #[error(transparent)]
    InvalidBatch(#[from] BatchError),
}
