//! Error types for gateway operations.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while talking to the execution backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP call itself failed (connect, timeout, non-JSON body, ...).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response entry carried a correlation id that matches no test case
    /// of the request batch.
    #[error("response references unknown correlation id {id}")]
    UnknownCorrelationId { id: usize },

    /// Two response entries carried the same correlation id.
    #[error("response contains duplicate correlation id {id}")]
    DuplicateCorrelationId { id: usize },

    /// A response entry carried neither a result nor an error.
    #[error("response entry {id} carries neither result nor error")]
    EmptyResponseEntry { id: usize },

    /// The batch response left at least one test case unanswered.
    #[error("no response entry for test case {id}")]
    MissingResponseEntry { id: usize },
}
