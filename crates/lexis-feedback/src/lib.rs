//! # lexis-feedback
//!
//! The only path by which a concept's confidence score increases: one
//! feedback event from a downstream ingestion service, blended into the
//! score/usage state.

pub mod engine;

pub use engine::FeedbackEngine;
