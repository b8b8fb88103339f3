//! # lexis-gateway
//!
//! Everything between the engine and the external generative-language
//! provider: the rate limiter that paces outbound calls, the gateway that
//! owns prompting and response parsing, and the Gemini REST provider.

pub mod gateway;
pub mod gemini;
pub mod prompts;
pub mod rate_limiter;
pub mod testing;

pub use gateway::LlmGateway;
pub use gemini::GeminiProvider;
pub use rate_limiter::RateLimiter;
