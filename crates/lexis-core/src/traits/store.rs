use crate::concept::{Concept, ConceptUpdate, Language};
use crate::constants::SCAN_PAGE_SIZE;
use crate::errors::LexisResult;

/// One row of a keyword fetch: the term in the requested language plus the
/// concept it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveKeyword {
    pub term: String,
    pub concept_id: String,
    pub english_term: String,
}

/// The persistence contract the engine depends on. Backed by a
/// document-oriented store with per-document atomic partial updates.
pub trait IConceptStore: Send + Sync {
    /// Case-insensitive lookup by canonical English term.
    fn find_by_english_term(&self, term: &str) -> LexisResult<Option<Concept>>;

    fn find_by_id(&self, id: &str) -> LexisResult<Option<Concept>>;

    /// Insert a new concept. Fails with `DuplicateTerm` if the English term
    /// already exists (case-insensitive).
    fn insert(&self, concept: &Concept) -> LexisResult<()>;

    /// Apply a partial update atomically. Fails with `NotFound` if the id
    /// does not exist.
    fn update(&self, id: &str, update: &ConceptUpdate) -> LexisResult<()>;

    /// Paginated listing, sorted by `created_at` descending.
    fn list(&self, skip: u64, limit: u64) -> LexisResult<Vec<Concept>>;

    /// Ranked keyword fetch: active concepts whose slot for `language` is
    /// translated and whose confidence score is at least `min_score`.
    /// Sorted by confidence score descending, ties broken by `created_at`
    /// descending.
    fn list_active_keywords(
        &self,
        language: Language,
        min_score: f64,
        limit: u64,
    ) -> LexisResult<Vec<ActiveKeyword>>;

    /// Total number of concepts. Also doubles as the reachability probe for
    /// the health signal.
    fn count(&self) -> LexisResult<u64>;
}

/// Lazy, restartable scan over the whole population, pulling one page at a
/// time so large populations never sit in memory at once.
///
/// Concepts inserted while a scan is in flight may be missed by that pass;
/// the next pass sees them.
pub struct ConceptScan<'a> {
    store: &'a dyn IConceptStore,
    page_size: u64,
    offset: u64,
    buffer: std::vec::IntoIter<Concept>,
    done: bool,
    failed: bool,
}

impl<'a> ConceptScan<'a> {
    pub fn new(store: &'a dyn IConceptStore) -> Self {
        Self::with_page_size(store, SCAN_PAGE_SIZE)
    }

    pub fn with_page_size(store: &'a dyn IConceptStore, page_size: u64) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
            offset: 0,
            buffer: Vec::new().into_iter(),
            done: false,
            failed: false,
        }
    }
}

impl Iterator for ConceptScan<'_> {
    type Item = LexisResult<Concept>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(concept) = self.buffer.next() {
            return Some(Ok(concept));
        }
        if self.done || self.failed {
            return None;
        }
        match self.store.list(self.offset, self.page_size) {
            Ok(page) => {
                if (page.len() as u64) < self.page_size {
                    self.done = true;
                }
                self.offset += page.len() as u64;
                self.buffer = page.into_iter();
                self.buffer.next().map(Ok)
            }
            Err(e) => {
                // Stop after surfacing the error once.
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
