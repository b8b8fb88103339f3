//! FeedbackEngine — exponential score blending, usage accounting, and
//! status recomputation for a single feedback event.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use lexis_core::errors::{LexisError, LexisResult};
use lexis_core::{Concept, ConceptStatus, ConceptUpdate, EngineConfig, IConceptStore, Language};

pub struct FeedbackEngine {
    store: Arc<dyn IConceptStore>,
    config: EngineConfig,
}

impl FeedbackEngine {
    pub fn new(store: Arc<dyn IConceptStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Apply one feedback event and return the updated concept.
    ///
    /// `relevance` is validated into [0, 1] before anything is touched.
    /// The confidence score moves by the fast blend (α), the historical
    /// yield by the slow blend (α_h); relevance at or above the positivity
    /// threshold also resets decay eligibility.
    pub fn apply_feedback(
        &self,
        concept_id: &str,
        language: Language,
        relevance: f64,
        source: &str,
        now: DateTime<Utc>,
    ) -> LexisResult<Concept> {
        if !(0.0..=1.0).contains(&relevance) {
            return Err(LexisError::Validation {
                reason: format!("relevance must be in [0.0, 1.0], got {relevance}"),
            });
        }

        let concept = self
            .store
            .find_by_id(concept_id)?
            .ok_or_else(|| LexisError::NotFound {
                id: concept_id.to_string(),
            })?;

        // An ingester may legitimately report on a term it observed before
        // the slot finished translating. Accept, but flag it.
        let slot = concept.translations.get(language);
        if !slot.is_translated() {
            tracing::warn!(
                concept_id,
                %language,
                status = ?slot.status,
                source,
                "feedback for an untranslated language slot"
            );
        }

        let new_score = concept
            .confidence_score
            .blend(relevance, self.config.blend_weight);
        let new_yield = concept
            .historical_yield
            .blend(relevance, self.config.yield_blend_weight);
        let new_status = ConceptStatus::for_score(new_score, self.config.deactivation_threshold);
        let is_positive = relevance >= self.config.positivity_threshold;

        let mut update = ConceptUpdate::new()
            .confidence_score(new_score)
            .historical_yield(new_yield)
            .status(new_status)
            .last_used_at(now)
            .increment_usage();
        if is_positive {
            update = update.last_positive_feedback_at(now);
        }

        self.store.update(concept_id, &update)?;

        if new_status != concept.status {
            tracing::info!(
                concept_id,
                term = %concept.english_term,
                score = %new_score,
                from = ?concept.status,
                to = ?new_status,
                "feedback flipped concept status"
            );
        }
        tracing::debug!(
            concept_id,
            %language,
            relevance,
            score = %new_score,
            yield_ = %new_yield,
            positive = is_positive,
            source,
            "feedback applied"
        );

        self.store
            .find_by_id(concept_id)?
            .ok_or_else(|| LexisError::NotFound {
                id: concept_id.to_string(),
            })
    }
}
