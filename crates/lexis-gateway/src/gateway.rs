//! LlmGateway — the uniform interface the pipeline calls. Exactly one
//! rate-limiter-gated provider request per invocation.

use std::sync::Arc;

use lexis_core::config::LlmConfig;
use lexis_core::errors::ProviderError;
use lexis_core::{EngineConfig, ILanguageModel, Language};

use crate::prompts;
use crate::rate_limiter::RateLimiter;

pub struct LlmGateway {
    model: Arc<dyn ILanguageModel>,
    limiter: RateLimiter,
    llm: LlmConfig,
}

impl LlmGateway {
    pub fn new(model: Arc<dyn ILanguageModel>, config: &EngineConfig) -> Self {
        Self {
            model,
            limiter: RateLimiter::new(config.rate_limit_rpm),
            llm: config.llm.clone(),
        }
    }

    /// Whether the underlying provider is usable. Feeds the health signal.
    pub fn is_available(&self) -> bool {
        self.model.is_available()
    }

    /// Discover candidate terms for a topic in the given language.
    ///
    /// One provider call (batched generation still counts as one). Fails
    /// with `EmptyResult` when the response parses to zero terms — callers
    /// treat that as zero candidates, not as a run abort.
    pub async fn generate_terms(
        &self,
        topic_description: &str,
        language: Language,
        context: Option<&str>,
    ) -> Result<Vec<String>, ProviderError> {
        let prompt = prompts::generation_prompt(topic_description, language, context);
        self.limiter.acquire().await;
        let raw = self
            .model
            .complete(&prompt, self.llm.max_tokens_generation)
            .await?;

        let terms = parse_terms(&raw);
        if terms.is_empty() {
            return Err(ProviderError::EmptyResult);
        }
        tracing::debug!(
            count = terms.len(),
            language = %language,
            "generation call produced candidate terms"
        );
        Ok(terms)
    }

    /// Translate one term between supported languages. One provider call.
    pub async fn translate_term(
        &self,
        term: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ProviderError> {
        let prompt = prompts::translation_prompt(term, source, target);
        self.limiter.acquire().await;
        let raw = self
            .model
            .complete(&prompt, self.llm.max_tokens_translation)
            .await?;

        let translation = normalize_term(&raw);
        if translation.is_empty() {
            return Err(ProviderError::EmptyResult);
        }
        if translation == term.to_lowercase() && source != target {
            // Loanwords and proper nouns legitimately survive translation
            // unchanged; accept them.
            tracing::debug!(term, %source, %target, "translation identical to source");
        }
        Ok(translation)
    }
}

/// Lowercase, strip surrounding quotes and bullet markers.
fn normalize_term(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(['-', '*', '•'])
        .trim()
        .trim_matches(['"', '\''])
        .to_lowercase()
}

/// One term per response line; blanks and one-character fragments dropped.
fn parse_terms(raw: &str) -> Vec<String> {
    raw.lines()
        .map(normalize_term)
        .filter(|t| t.chars().count() > 1)
        .collect()
}
