//! Error taxonomy for the engine. One enum per failure domain, plus the
//! umbrella [`LexisError`] every public operation returns.

mod provider_error;
mod store_error;

pub use provider_error::ProviderError;
pub use store_error::StoreError;

/// Umbrella error for all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum LexisError {
    /// Unknown concept id. Surfaced to the caller, not retried.
    #[error("concept not found: {id}")]
    NotFound { id: String },

    /// English-term collision on insert. Surfaced, not retried.
    #[error("concept with english term '{term}' already exists")]
    DuplicateTerm { term: String },

    /// Malformed input, rejected before any mutation.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A single-flight guard rejected a manual trigger.
    #[error("job '{job}' is already running")]
    JobAlreadyRunning { job: &'static str },
}

pub type LexisResult<T> = Result<T, LexisError>;

impl From<serde_json::Error> for LexisError {
    fn from(e: serde_json::Error) -> Self {
        LexisError::Store(StoreError::Corrupt {
            details: e.to_string(),
        })
    }
}
