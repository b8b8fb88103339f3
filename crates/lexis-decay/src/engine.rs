//! DecayEngine — full-population scan applying per-period geometric decay.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use lexis_core::errors::LexisResult;
use lexis_core::traits::ConceptScan;
use lexis_core::{Concept, ConceptStatus, ConceptUpdate, EngineConfig, IConceptStore};

use crate::formula;

pub struct DecayEngine {
    store: Arc<dyn IConceptStore>,
    config: EngineConfig,
}

impl DecayEngine {
    pub fn new(store: Arc<dyn IConceptStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Scan every concept and decay those with at least one full period
    /// since the last positive feedback, previous decay, or creation —
    /// whichever is latest. Returns the number of concepts decayed.
    ///
    /// Inactive concepts are scanned and decay too: reactivation requires
    /// new positive feedback, not the passage of time.
    pub fn apply_decay(&self, now: DateTime<Utc>) -> LexisResult<u64> {
        let period = self.config.decay_period();
        let mut scanned: u64 = 0;
        let mut decayed: u64 = 0;

        for concept in ConceptScan::new(self.store.as_ref()) {
            let concept = concept?;
            scanned += 1;
            if self.decay_one(&concept, now)? {
                decayed += 1;
            }
        }

        tracing::info!(
            scanned,
            decayed,
            period_secs = period.num_seconds(),
            rate = self.config.decay_rate,
            "decay pass finished"
        );
        Ok(decayed)
    }

    /// Decay a single concept if due. Returns whether a decay was written.
    fn decay_one(&self, concept: &Concept, now: DateTime<Utc>) -> LexisResult<bool> {
        let elapsed = now - concept.decay_reference();
        let periods = formula::elapsed_periods(elapsed, self.config.decay_period());
        if periods == 0 {
            return Ok(false);
        }

        let new_score = formula::decayed(concept.confidence_score, self.config.decay_rate, periods);
        let new_status = ConceptStatus::for_score(new_score, self.config.deactivation_threshold);

        let update = ConceptUpdate::new()
            .confidence_score(new_score)
            .status(new_status)
            .last_decay_at(now);

        if let Err(e) = self.store.update(&concept.id, &update) {
            // One failed document must not abort the whole pass.
            tracing::warn!(
                concept_id = %concept.id,
                term = %concept.english_term,
                error = %e,
                "decay update failed, skipping concept"
            );
            return Ok(false);
        }

        if new_status != concept.status {
            tracing::info!(
                concept_id = %concept.id,
                term = %concept.english_term,
                score = %new_score,
                "decay deactivated concept"
            );
        }
        tracing::debug!(
            concept_id = %concept.id,
            periods,
            from = %concept.confidence_score,
            to = %new_score,
            "decay applied"
        );
        Ok(true)
    }
}
