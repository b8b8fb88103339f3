//! Scripted in-memory provider for tests across the workspace.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use lexis_core::errors::ProviderError;
use lexis_core::ILanguageModel;

/// A provider that replays a fixed script of responses in order and records
/// every prompt it was asked.
#[derive(Default)]
pub struct ScriptedModel {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn push_ok(&self, text: impl Into<String>) {
        self.script
            .lock()
            .expect("script lock")
            .push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub fn push_err(&self, err: ProviderError) {
        self.script.lock().expect("script lock").push_back(Err(err));
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("prompt lock").len()
    }
}

#[async_trait]
impl ILanguageModel for ScriptedModel {
    async fn complete(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, ProviderError> {
        self.prompts
            .lock()
            .expect("prompt lock")
            .push(prompt.to_string());
        self.script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ProviderError::Transport {
                    reason: "scripted model exhausted".into(),
                })
            })
    }
}
