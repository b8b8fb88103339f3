//! # lexis-store
//!
//! SQLite-backed concept store. Concepts are stored document-style: scalar
//! fields in columns for querying/ranking, nested fields (translations,
//! categories) as JSON. Every mutator is a single statement, which is what
//! gives the engine its per-document atomic-update contract.

pub mod engine;
pub mod queries;
pub mod schema;

pub use engine::ConceptStore;

use lexis_core::errors::{LexisError, StoreError};

/// Map any SQLite-level failure into the store error domain.
pub(crate) fn to_store_err(e: impl ToString) -> LexisError {
    LexisError::Store(StoreError::Sqlite {
        message: e.to_string(),
    })
}
