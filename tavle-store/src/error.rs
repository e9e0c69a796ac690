//! Error types for the board store.

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by store operations and the backend behind them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or backend failure
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// A backend call exceeded the configured deadline
    #[error("request timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// Mutation attempted without a signed-in user
    #[error("not authenticated: mutation requires a signed-in user")]
    AuthRequired,

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// List not found
    #[error("list not found: {id}")]
    ListNotFound { id: String },
}

impl StoreError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a task not found error
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::TaskNotFound { id: id.into() }
    }

    /// Create a list not found error
    pub fn list_not_found(id: impl Into<String>) -> Self {
        Self::ListNotFound { id: id.into() }
    }

    /// Whether a retry of the same call could plausibly succeed.
    ///
    /// Transient transport and deadline failures are retryable; auth and
    /// not-found failures describe a state a retry cannot change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}
