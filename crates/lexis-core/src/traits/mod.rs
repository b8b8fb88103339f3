//! Seams between the engine and its collaborators: the document store and
//! the generative-language provider.

mod language_model;
mod store;

pub use language_model::ILanguageModel;
pub use store::{ActiveKeyword, ConceptScan, IConceptStore};
