use async_trait::async_trait;

use crate::errors::ProviderError;

/// Raw completion interface over a generative-language provider.
///
/// The gateway owns prompting and parsing; implementations only move text.
/// One call to [`ILanguageModel::complete`] is exactly one billable/ratable
/// provider request.
#[async_trait]
pub trait ILanguageModel: Send + Sync {
    /// Run one completion. The returned string is the raw model text.
    async fn complete(&self, prompt: &str, max_output_tokens: u32)
        -> Result<String, ProviderError>;

    /// Whether the provider is usable at all (e.g. credentials configured).
    /// Feeds the health signal; never performs a network call.
    fn is_available(&self) -> bool {
        true
    }
}
