//! Engine configuration. Every tunable the scoring/decay state machine and
//! the provider plumbing depend on lives here; all fields have serde
//! defaults so a partial TOML file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::{LexisError, LexisResult};

/// Built-in defaults. Operators override via TOML; tests rely on these
/// exact values for deterministic scenarios.
pub mod defaults {
    /// Provider requests-per-minute ceiling (free-tier Gemini pacing).
    pub const RATE_LIMIT_RPM: u32 = 15;
    /// Interval between periodic generation runs (seconds).
    pub const GENERATION_INTERVAL_SECS: u64 = 3600;
    /// Interval between periodic decay runs (seconds).
    pub const DECAY_INTERVAL_SECS: u64 = 3600;
    /// Concepts below this confidence score go inactive.
    pub const DEACTIVATION_THRESHOLD: f64 = 0.6;
    /// Feedback at or above this relevance counts as positive.
    pub const POSITIVITY_THRESHOLD: f64 = 0.5;
    /// Geometric decay multiplier per elapsed period.
    pub const DECAY_RATE: f64 = 0.95;
    /// Length of one decay period (seconds). Defaults to one decay interval.
    pub const DECAY_PERIOD_SECS: u64 = DECAY_INTERVAL_SECS;
    /// Blend weight α for the confidence score.
    pub const BLEND_WEIGHT: f64 = 0.3;
    /// Blend weight α_h for the historical yield.
    pub const YIELD_BLEND_WEIGHT: f64 = 0.05;
    /// Confidence score a freshly discovered concept starts at.
    pub const INITIAL_SCORE: f64 = 0.5;

    pub const LLM_MODEL: &str = "gemini-1.5-flash-latest";
    pub const LLM_TEMPERATURE: f64 = 0.3;
    pub const LLM_MAX_TOKENS_GENERATION: u32 = 150;
    pub const LLM_MAX_TOKENS_TRANSLATION: u32 = 50;
}

/// Provider (generative-language API) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_tokens_generation: u32,
    pub max_tokens_translation: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: defaults::LLM_MODEL.to_string(),
            api_key: String::new(),
            temperature: defaults::LLM_TEMPERATURE,
            max_tokens_generation: defaults::LLM_MAX_TOKENS_GENERATION,
            max_tokens_translation: defaults::LLM_MAX_TOKENS_TRANSLATION,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rate_limit_rpm: u32,
    pub generation_interval_secs: u64,
    pub decay_interval_secs: u64,
    pub deactivation_threshold: f64,
    pub positivity_threshold: f64,
    pub decay_rate: f64,
    pub decay_period_secs: u64,
    pub blend_weight: f64,
    pub yield_blend_weight: f64,
    pub initial_score: f64,
    pub llm: LlmConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rate_limit_rpm: defaults::RATE_LIMIT_RPM,
            generation_interval_secs: defaults::GENERATION_INTERVAL_SECS,
            decay_interval_secs: defaults::DECAY_INTERVAL_SECS,
            deactivation_threshold: defaults::DEACTIVATION_THRESHOLD,
            positivity_threshold: defaults::POSITIVITY_THRESHOLD,
            decay_rate: defaults::DECAY_RATE,
            decay_period_secs: defaults::DECAY_PERIOD_SECS,
            blend_weight: defaults::BLEND_WEIGHT,
            yield_blend_weight: defaults::YIELD_BLEND_WEIGHT,
            initial_score: defaults::INITIAL_SCORE,
            llm: LlmConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from a TOML string. Unknown keys are rejected by serde only if
    /// present under known tables; missing keys take defaults.
    pub fn from_toml_str(s: &str) -> LexisResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| LexisError::Validation {
            reason: format!("config parse error: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> LexisResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| LexisError::Validation {
            reason: format!("cannot read config {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Reject configurations the state machine cannot run on.
    pub fn validate(&self) -> LexisResult<()> {
        fn unit_interval(name: &str, v: f64) -> LexisResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(LexisError::Validation {
                    reason: format!("{name} must be in [0.0, 1.0], got {v}"),
                })
            }
        }

        if self.rate_limit_rpm == 0 {
            return Err(LexisError::Validation {
                reason: "rate_limit_rpm must be positive".into(),
            });
        }
        if self.generation_interval_secs == 0 || self.decay_interval_secs == 0 {
            return Err(LexisError::Validation {
                reason: "scheduler intervals must be positive".into(),
            });
        }
        if self.decay_period_secs == 0 {
            return Err(LexisError::Validation {
                reason: "decay_period_secs must be positive".into(),
            });
        }
        if !(self.decay_rate > 0.0 && self.decay_rate < 1.0) {
            return Err(LexisError::Validation {
                reason: format!("decay_rate must be in (0.0, 1.0), got {}", self.decay_rate),
            });
        }
        unit_interval("deactivation_threshold", self.deactivation_threshold)?;
        unit_interval("positivity_threshold", self.positivity_threshold)?;
        unit_interval("blend_weight", self.blend_weight)?;
        unit_interval("yield_blend_weight", self.yield_blend_weight)?;
        unit_interval("initial_score", self.initial_score)?;
        Ok(())
    }

    /// Minimum interval between provider calls implied by the RPM ceiling.
    pub fn min_call_interval(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.rate_limit_rpm as f64)
    }

    pub fn decay_period(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.decay_period_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_takes_defaults() {
        let config = EngineConfig::from_toml_str("rate_limit_rpm = 30\n").unwrap();
        assert_eq!(config.rate_limit_rpm, 30);
        assert_eq!(config.decay_rate, defaults::DECAY_RATE);
        assert_eq!(config.min_call_interval(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_out_of_range_decay_rate() {
        let err = EngineConfig::from_toml_str("decay_rate = 1.5\n").unwrap_err();
        assert!(matches!(err, LexisError::Validation { .. }));
    }
}
