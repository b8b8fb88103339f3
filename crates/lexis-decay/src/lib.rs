//! # lexis-decay
//!
//! Scheduled geometric reduction of confidence scores for concepts that
//! have gone without positive feedback. Idempotent per decay period.

pub mod engine;
pub mod formula;

pub use engine::DecayEngine;
