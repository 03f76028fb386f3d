//! Store error types.

use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced from the data-access collaborator.
///
/// Validation errors never originate here — the store holds records, the
/// engine holds the invariants. `Unavailable` is the only retryable
/// variant, and retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity does not exist in the store.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"workflow template"`.
        entity: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// The remote store could not be reached or answered with a failure.
    #[error("store unavailable: {source}")]
    Unavailable {
        /// Underlying transport or backend error.
        #[source]
        source: BoxedError,
    },
}

impl StoreError {
    /// Creates a `NotFound` error for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates an `Unavailable` error from any underlying error.
    pub fn unavailable(source: impl Into<BoxedError>) -> Self {
        StoreError::Unavailable {
            source: source.into(),
        }
    }

    /// Returns whether retrying the operation could succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}
