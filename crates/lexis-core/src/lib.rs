//! # lexis-core
//!
//! Foundation crate for the Lexis concept engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod concept;
pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use concept::{
    Concept, ConceptOrigin, ConceptStatus, ConceptUpdate, Language, Score, Translation,
    TranslationSet, TranslationStatus,
};
pub use config::EngineConfig;
pub use errors::{LexisError, LexisResult};
pub use traits::{ActiveKeyword, ConceptScan, IConceptStore, ILanguageModel};
