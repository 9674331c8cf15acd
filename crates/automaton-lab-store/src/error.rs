//! Error types for store operations.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while mutating or persisting the collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An automaton with this name already exists in the collection.
    #[error("an automaton named '{name}' already exists")]
    DuplicateName { name: String },

    /// A start or accept state was set to a state that appears in no
    /// transition of the automaton.
    #[error("state '{state}' does not appear in any transition of '{automaton}'")]
    UnknownState { automaton: String, state: String },

    /// Serialization of the collection failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The key-value backend failed.
    #[error("persistence error: {0}")]
    Io(#[from] std::io::Error),
}
