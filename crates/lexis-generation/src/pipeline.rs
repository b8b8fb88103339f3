//! GenerationPipeline — LLM-backed discovery of new concepts, deduplicated
//! against the store by English anchor term.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

use lexis_core::errors::{LexisResult, ProviderError, StoreError};
use lexis_core::{
    Concept, ConceptOrigin, ConceptUpdate, EngineConfig, IConceptStore, Language, LexisError,
    Translation,
};
use lexis_gateway::LlmGateway;

use crate::catalog::CategoryCatalog;

/// Outcome counts of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub category: String,
    pub language: Language,
    /// Raw candidate terms the provider produced.
    pub terms_generated: usize,
    /// New concepts inserted.
    pub created: usize,
    /// Existing concepts reinforced (category and/or translation slots).
    pub merged: usize,
    /// Candidates dropped: anchor translation or store write failed.
    pub failed: usize,
    /// Ids of every concept created or merged, in processing order.
    pub concept_ids: Vec<String>,
}

impl GenerationReport {
    fn new(category: &str, language: Language, terms_generated: usize) -> Self {
        Self {
            category: category.to_string(),
            language,
            terms_generated,
            created: 0,
            merged: 0,
            failed: 0,
            concept_ids: Vec::new(),
        }
    }
}

enum Outcome {
    Created(String),
    Merged(String),
}

pub struct GenerationPipeline {
    store: Arc<dyn IConceptStore>,
    gateway: Arc<LlmGateway>,
    catalog: CategoryCatalog,
    config: EngineConfig,
}

impl GenerationPipeline {
    pub fn new(
        store: Arc<dyn IConceptStore>,
        gateway: Arc<LlmGateway>,
        catalog: CategoryCatalog,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            catalog,
            config,
        }
    }

    /// Run one generation cycle for the given category (random when absent),
    /// in a randomly chosen target language.
    pub async fn generate_for_category(
        &self,
        category: Option<&str>,
        now: DateTime<Utc>,
    ) -> LexisResult<GenerationReport> {
        let language = *Language::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Language::En);
        self.generate_in_language(category, language, now).await
    }

    /// As [`generate_for_category`](Self::generate_for_category), with the
    /// target language fixed by the caller.
    pub async fn generate_in_language(
        &self,
        category: Option<&str>,
        language: Language,
        now: DateTime<Utc>,
    ) -> LexisResult<GenerationReport> {
        let entry = match category {
            Some(key) => self.catalog.get(key).ok_or_else(|| LexisError::Validation {
                reason: format!("unknown category '{key}'"),
            })?,
            None => {
                let mut rng = rand::thread_rng();
                self.catalog
                    .pick(&mut rng)
                    .ok_or_else(|| LexisError::Validation {
                        reason: "category catalog is empty".to_string(),
                    })?
            }
        };
        let context = self.catalog.context(entry.key);
        let origin = if context.is_some() {
            ConceptOrigin::GeneratedWithContext
        } else {
            ConceptOrigin::Generated
        };

        tracing::info!(
            category = entry.key,
            %language,
            with_context = context.is_some(),
            "generation run started"
        );

        let candidates = match self
            .gateway
            .generate_terms(entry.description, language, context)
            .await
        {
            Ok(terms) => terms,
            Err(ProviderError::EmptyResult) => {
                tracing::warn!(category = entry.key, %language, "provider returned no terms");
                Vec::new()
            }
            // Total provider failure aborts this run; the next scheduled
            // tick is the retry.
            Err(e) => {
                tracing::error!(category = entry.key, %language, error = %e, "generation run aborted");
                return Err(e.into());
            }
        };

        let mut report = GenerationReport::new(entry.key, language, candidates.len());
        let mut seen: HashSet<String> = HashSet::new();

        for candidate in &candidates {
            let anchor = if language == Language::En {
                candidate.clone()
            } else {
                match self
                    .gateway
                    .translate_term(candidate, language, Language::En)
                    .await
                {
                    Ok(term) => term,
                    Err(e) => {
                        tracing::warn!(term = %candidate, %language, error = %e, "anchor translation failed, dropping candidate");
                        report.failed += 1;
                        continue;
                    }
                }
            };
            if !seen.insert(anchor.clone()) {
                tracing::debug!(term = %anchor, "duplicate anchor within batch, already handled");
                continue;
            }

            match self
                .process_candidate(&anchor, candidate, language, entry.key, origin, now)
                .await
            {
                Ok(Outcome::Created(id)) => {
                    report.created += 1;
                    report.concept_ids.push(id);
                }
                Ok(Outcome::Merged(id)) => {
                    report.merged += 1;
                    report.concept_ids.push(id);
                }
                Err(e) => {
                    tracing::warn!(term = %anchor, error = %e, "candidate processing failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            category = entry.key,
            %language,
            terms = report.terms_generated,
            created = report.created,
            merged = report.merged,
            failed = report.failed,
            "generation run finished"
        );
        Ok(report)
    }

    /// Find-or-create for one deduplicated anchor term.
    async fn process_candidate(
        &self,
        anchor: &str,
        source_term: &str,
        source_language: Language,
        category: &str,
        origin: ConceptOrigin,
        now: DateTime<Utc>,
    ) -> LexisResult<Outcome> {
        if let Some(existing) = self.store.find_by_english_term(anchor)? {
            let id = self
                .merge(&existing, source_term, source_language, category)
                .await?;
            return Ok(Outcome::Merged(id));
        }

        let mut concept = Concept::new(
            anchor,
            vec![category.to_string()],
            origin,
            self.config.initial_score,
            self.config.deactivation_threshold,
            now,
        );
        for target in Language::ALL {
            if target == Language::En {
                continue;
            }
            let translation = if target == source_language {
                Translation::translated(source_term)
            } else {
                match self
                    .gateway
                    .translate_term(anchor, Language::En, target)
                    .await
                {
                    Ok(term) => Translation::translated(term),
                    // Recorded as failed; keyword fetch skips this slot
                    // until a later run repairs it.
                    Err(e) => {
                        tracing::warn!(term = %anchor, %target, error = %e, "translation failed");
                        Translation::failed()
                    }
                }
            };
            concept.translations.set(target, translation);
        }

        match self.store.insert(&concept) {
            Ok(()) => {
                tracing::info!(concept_id = %concept.id, term = %anchor, category, "concept created");
                Ok(Outcome::Created(concept.id))
            }
            // Lost an insert race to a concurrent writer: fall back to merge.
            Err(LexisError::DuplicateTerm { .. }) => {
                let existing = self.store.find_by_english_term(anchor)?.ok_or_else(|| {
                    LexisError::Store(StoreError::Corrupt {
                        details: format!(
                            "term '{anchor}' rejected as duplicate but not found on refetch"
                        ),
                    })
                })?;
                let id = self
                    .merge(&existing, source_term, source_language, category)
                    .await?;
                Ok(Outcome::Merged(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Reinforce an existing concept: attach the category if absent and fill
    /// any translation slot still pending or failed. Scores are untouched.
    async fn merge(
        &self,
        existing: &Concept,
        source_term: &str,
        source_language: Language,
        category: &str,
    ) -> LexisResult<String> {
        let mut update = ConceptUpdate::new();
        if !existing.has_category(category) {
            update = update.add_category(category);
        }

        for (target, slot) in existing.translations.iter() {
            if target == Language::En || slot.is_translated() {
                continue;
            }
            if target == source_language {
                update = update.set_translation(target, Translation::translated(source_term));
                continue;
            }
            match self
                .gateway
                .translate_term(&existing.english_term, Language::En, target)
                .await
            {
                Ok(term) => {
                    update = update.set_translation(target, Translation::translated(term));
                }
                // Leave the slot as it was; the next run gets another try.
                Err(e) => {
                    tracing::warn!(term = %existing.english_term, %target, error = %e, "translation repair failed");
                }
            }
        }

        if update.is_empty() {
            return Ok(existing.id.clone());
        }
        self.store.update(&existing.id, &update)?;
        tracing::debug!(concept_id = %existing.id, category, "concept merged");
        Ok(existing.id.clone())
    }
}
