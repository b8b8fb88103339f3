//! ConceptStore — owns the SQLite connection and implements the
//! [`IConceptStore`] contract.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::Connection;

use lexis_core::errors::LexisResult;
use lexis_core::traits::{ActiveKeyword, IConceptStore};
use lexis_core::{Concept, ConceptUpdate, Language};

use crate::{queries, schema, to_store_err};

/// SQLite-backed concept store.
///
/// A single serialized connection: the population is small and every
/// contract operation is one statement, so writer/reader pooling buys
/// nothing here.
pub struct ConceptStore {
    conn: Mutex<Connection>,
}

impl ConceptStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> LexisResult<Self> {
        let conn = Connection::open(path).map_err(to_store_err)?;
        Self::initialize(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> LexisResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_store_err)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> LexisResult<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(to_store_err)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(to_store_err)?;
        schema::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock only means another thread panicked mid-query;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl IConceptStore for ConceptStore {
    fn find_by_english_term(&self, term: &str) -> LexisResult<Option<Concept>> {
        queries::concept_crud::get_concept_by_english_term(&self.conn(), term)
    }

    fn find_by_id(&self, id: &str) -> LexisResult<Option<Concept>> {
        queries::concept_crud::get_concept(&self.conn(), id)
    }

    fn insert(&self, concept: &Concept) -> LexisResult<()> {
        queries::concept_crud::insert_concept(&self.conn(), concept)
    }

    fn update(&self, id: &str, update: &ConceptUpdate) -> LexisResult<()> {
        queries::concept_crud::update_concept(&self.conn(), id, update, Utc::now())
    }

    fn list(&self, skip: u64, limit: u64) -> LexisResult<Vec<Concept>> {
        queries::concept_crud::list_concepts(&self.conn(), skip, limit)
    }

    fn list_active_keywords(
        &self,
        language: Language,
        min_score: f64,
        limit: u64,
    ) -> LexisResult<Vec<ActiveKeyword>> {
        queries::keyword_query::active_keywords(&self.conn(), language, min_score, limit)
    }

    fn count(&self) -> LexisResult<u64> {
        queries::concept_crud::count_concepts(&self.conn())
    }
}
