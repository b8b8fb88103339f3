//! The concept model: the sole persisted entity and its value types.

mod score;
mod translation;
mod update;

pub use score::Score;
pub use translation::{Language, Translation, TranslationSet, TranslationStatus};
pub use update::ConceptUpdate;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Active/inactive status, derived from the confidence score.
/// Never set independently — always recomputed via [`ConceptStatus::for_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptStatus {
    Active,
    Inactive,
}

impl ConceptStatus {
    /// Active iff `score ≥ deactivation_threshold`.
    pub fn for_score(score: Score, deactivation_threshold: f64) -> Self {
        if score.value() >= deactivation_threshold {
            ConceptStatus::Active
        } else {
            ConceptStatus::Inactive
        }
    }
}

/// How a concept entered the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptOrigin {
    /// Manual API insertion.
    Manual,
    /// Discovered by the generation pipeline.
    Generated,
    /// Discovered by the generation pipeline with category context text.
    GeneratedWithContext,
}

/// A health-topic keyword cluster with one canonical English term and
/// parallel translations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    /// UUID v4 identifier, assigned at creation, immutable.
    pub id: String,
    /// Canonical English term. Lowercased; unique across all concepts.
    pub english_term: String,
    /// One slot per supported language.
    pub translations: TranslationSet,
    /// Category keys this concept was discovered under. May be empty.
    pub categories: Vec<String>,
    pub origin: ConceptOrigin,
    /// Fast-moving relevance signal; drives ranking and status.
    pub confidence_score: Score,
    /// Slow-moving average of all relevance feedback ever received.
    pub historical_yield: Score,
    /// Feedback events received. Only ever increases.
    pub usage_count: u64,
    /// Derived from `confidence_score` vs the deactivation threshold.
    pub status: ConceptStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Most recent feedback event, any relevance value.
    pub last_used_at: Option<DateTime<Utc>>,
    /// Most recent feedback above the positivity threshold. Drives decay
    /// eligibility.
    pub last_positive_feedback_at: Option<DateTime<Utc>>,
    /// Most recent decay application; makes repeated decay runs within one
    /// period a no-op.
    pub last_decay_at: Option<DateTime<Utc>>,
}

impl Concept {
    /// Create a new concept anchored on the given English term.
    ///
    /// The term is lowercased; non-anchor translation slots start pending;
    /// status is derived from the initial score.
    pub fn new(
        english_term: &str,
        categories: Vec<String>,
        origin: ConceptOrigin,
        initial_score: f64,
        deactivation_threshold: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let english_term = english_term.trim().to_lowercase();
        let score = Score::new(initial_score);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            translations: TranslationSet::seeded(english_term.clone()),
            english_term,
            categories,
            origin,
            confidence_score: score,
            historical_yield: Score::default(),
            usage_count: 0,
            status: ConceptStatus::for_score(score, deactivation_threshold),
            created_at: now,
            updated_at: now,
            last_used_at: None,
            last_positive_feedback_at: None,
            last_decay_at: None,
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// The reference instant decay elapsed-time is measured from:
    /// the latest of positive feedback, previous decay, and creation.
    pub fn decay_reference(&self) -> DateTime<Utc> {
        let mut reference = self.created_at;
        if let Some(t) = self.last_positive_feedback_at {
            reference = reference.max(t);
        }
        if let Some(t) = self.last_decay_at {
            reference = reference.max(t);
        }
        reference
    }
}

/// Identity equality: two concepts are equal if they have the same ID.
impl PartialEq for Concept {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
