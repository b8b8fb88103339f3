//! Gemini REST provider (`generativeContent` endpoint).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lexis_core::config::LlmConfig;
use lexis_core::errors::ProviderError;
use lexis_core::ILanguageModel;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// HTTP client for the Gemini generative-language API.
pub struct GeminiProvider {
    http: reqwest::Client,
    model: String,
    api_key: String,
    temperature: f64,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different endpoint (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ILanguageModel for GeminiProvider {
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Auth {
                reason: "no API key configured".into(),
            });
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens,
            },
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::Auth {
                reason: format!("provider rejected credentials ({status})"),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::Transport {
                reason: format!("provider returned {status}"),
            });
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            // Safety-blocked prompts come back with no candidate text.
            return Err(ProviderError::EmptyResult);
        }
        Ok(text)
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}
