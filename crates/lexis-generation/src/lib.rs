//! # lexis-generation
//!
//! LLM-backed concept discovery: pick a health topic, ask the provider for
//! candidate terms in a target language, anchor every candidate on its
//! English translation, then create new concepts or reinforce existing ones.

pub mod catalog;
pub mod manual;
pub mod pipeline;

pub use catalog::{CategoryCatalog, CategoryEntry};
pub use manual::{create_manual, ManualConcept};
pub use pipeline::{GenerationPipeline, GenerationReport};
