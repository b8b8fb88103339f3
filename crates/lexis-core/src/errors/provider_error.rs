/// Errors from the external generative-language provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider transport failure: {reason}")]
    Transport { reason: String },

    #[error("provider authentication failure: {reason}")]
    Auth { reason: String },

    /// The provider answered, but no parseable terms came back.
    /// Not fatal to a generation run — treated as zero terms.
    #[error("provider returned no parseable result")]
    EmptyResult,

    #[error("malformed provider response: {reason}")]
    MalformedResponse { reason: String },
}
