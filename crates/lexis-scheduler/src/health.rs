//! The health signal: store reachability, scheduler state, provider
//! availability, and a worst-of overall status.

use serde::{Deserialize, Serialize};

use lexis_core::IConceptStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsystemHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
}

impl SubsystemHealth {
    fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: Some(message.into()),
        }
    }

    fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            message: Some(message.into()),
        }
    }

    fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub store: SubsystemHealth,
    pub scheduler: SubsystemHealth,
    pub provider: SubsystemHealth,
    pub overall: HealthStatus,
}

impl HealthReport {
    /// Probe the store and combine with the scheduler/provider flags.
    ///
    /// An unreachable store is unhealthy (feedback and keyword fetch are
    /// down); a stopped scheduler or unavailable provider only degrades,
    /// since the synchronous surface keeps working.
    pub fn build(
        store: &dyn IConceptStore,
        scheduler_running: bool,
        provider_available: bool,
    ) -> Self {
        let store_health = match store.count() {
            Ok(count) => SubsystemHealth::healthy(format!("{count} concepts")),
            Err(e) => SubsystemHealth::unhealthy(format!("store probe failed: {e}")),
        };
        let scheduler_health = if scheduler_running {
            SubsystemHealth::healthy("periodic jobs running")
        } else {
            SubsystemHealth::degraded("scheduler stopped")
        };
        let provider_health = if provider_available {
            SubsystemHealth::healthy("provider configured")
        } else {
            SubsystemHealth::degraded("provider unavailable")
        };

        let overall = derive_overall([
            store_health.status,
            scheduler_health.status,
            provider_health.status,
        ]);
        Self {
            store: store_health,
            scheduler: scheduler_health,
            provider: provider_health,
            overall,
        }
    }
}

/// Unhealthy if any subsystem is unhealthy, degraded if any is degraded,
/// otherwise healthy.
fn derive_overall(statuses: impl IntoIterator<Item = HealthStatus>) -> HealthStatus {
    let mut worst = HealthStatus::Healthy;
    for status in statuses {
        match status {
            HealthStatus::Unhealthy => return HealthStatus::Unhealthy,
            HealthStatus::Degraded => worst = HealthStatus::Degraded,
            HealthStatus::Healthy => {}
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_is_the_worst_subsystem() {
        assert_eq!(
            derive_overall([HealthStatus::Healthy, HealthStatus::Healthy]),
            HealthStatus::Healthy
        );
        assert_eq!(
            derive_overall([HealthStatus::Healthy, HealthStatus::Degraded]),
            HealthStatus::Degraded
        );
        assert_eq!(
            derive_overall([
                HealthStatus::Degraded,
                HealthStatus::Unhealthy,
                HealthStatus::Healthy
            ]),
            HealthStatus::Unhealthy
        );
    }
}
