//! Operator-driven concept creation, bypassing the LLM entirely.

use chrono::{DateTime, Utc};

use lexis_core::errors::LexisResult;
use lexis_core::{
    Concept, ConceptOrigin, EngineConfig, IConceptStore, Language, LexisError, Translation,
};

/// Payload for manual concept creation. Translations not supplied start
/// pending and can be filled by later generation merges.
#[derive(Debug, Clone, Default)]
pub struct ManualConcept {
    pub english_term: String,
    pub french_term: Option<String>,
    pub arabic_term: Option<String>,
    pub categories: Vec<String>,
}

/// Insert a manually curated concept.
///
/// Terms are lowercased; a colliding English term fails with
/// [`LexisError::DuplicateTerm`]. Initial score and status come from config,
/// same as generated concepts.
pub fn create_manual(
    store: &dyn IConceptStore,
    config: &EngineConfig,
    request: &ManualConcept,
    now: DateTime<Utc>,
) -> LexisResult<Concept> {
    let english_term = request.english_term.trim();
    if english_term.is_empty() {
        return Err(LexisError::Validation {
            reason: "english_term must not be empty".to_string(),
        });
    }

    let mut concept = Concept::new(
        english_term,
        request.categories.clone(),
        ConceptOrigin::Manual,
        config.initial_score,
        config.deactivation_threshold,
        now,
    );
    for (language, provided) in [
        (Language::Fr, &request.french_term),
        (Language::Ar, &request.arabic_term),
    ] {
        if let Some(term) = provided {
            let term = term.trim().to_lowercase();
            if term.is_empty() {
                return Err(LexisError::Validation {
                    reason: format!("{language} term, when given, must not be empty"),
                });
            }
            concept
                .translations
                .set(language, Translation::translated(term));
        }
    }

    store.insert(&concept)?;
    tracing::info!(concept_id = %concept.id, term = %concept.english_term, "manual concept created");
    Ok(concept)
}
