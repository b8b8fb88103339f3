use chrono::{DateTime, Utc};

use super::{ConceptStatus, Language, Score, Translation};

/// A partial update applied atomically to one concept document.
///
/// All mutators in the engine (feedback, decay, generation merge) express
/// their writes through this payload; the store applies the whole thing in a
/// single statement so racing writers interleave at document granularity.
#[derive(Debug, Clone, Default)]
pub struct ConceptUpdate {
    pub confidence_score: Option<Score>,
    pub historical_yield: Option<Score>,
    pub status: Option<ConceptStatus>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub last_positive_feedback_at: Option<DateTime<Utc>>,
    pub last_decay_at: Option<DateTime<Utc>>,
    /// Increment `usage_count` by one, in place. Never decrements.
    pub increment_usage: bool,
    /// Add a category key if not already present.
    pub add_category: Option<String>,
    /// Overwrite a single translation slot.
    pub set_translations: Vec<(Language, Translation)>,
}

impl ConceptUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confidence_score(mut self, score: Score) -> Self {
        self.confidence_score = Some(score);
        self
    }

    pub fn historical_yield(mut self, score: Score) -> Self {
        self.historical_yield = Some(score);
        self
    }

    pub fn status(mut self, status: ConceptStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn last_used_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_used_at = Some(at);
        self
    }

    pub fn last_positive_feedback_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_positive_feedback_at = Some(at);
        self
    }

    pub fn last_decay_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_decay_at = Some(at);
        self
    }

    pub fn increment_usage(mut self) -> Self {
        self.increment_usage = true;
        self
    }

    pub fn add_category(mut self, category: impl Into<String>) -> Self {
        self.add_category = Some(category.into());
        self
    }

    pub fn set_translation(mut self, language: Language, translation: Translation) -> Self {
        self.set_translations.push((language, translation));
        self
    }

    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.confidence_score.is_none()
            && self.historical_yield.is_none()
            && self.status.is_none()
            && self.last_used_at.is_none()
            && self.last_positive_feedback_at.is_none()
            && self.last_decay_at.is_none()
            && !self.increment_usage
            && self.add_category.is_none()
            && self.set_translations.is_empty()
    }
}
