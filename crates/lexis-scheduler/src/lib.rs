//! # lexis-scheduler
//!
//! The process-wide supervisor: periodic generation and decay jobs with
//! single-flight guards, a manual generation trigger sharing the same
//! guard, shutdown, and the aggregate health signal.

pub mod health;
pub mod scheduler;

pub use health::{HealthReport, HealthStatus, SubsystemHealth};
pub use scheduler::Scheduler;
