//! Scheduler — owns the two periodic jobs and their single-flight guards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use lexis_core::errors::LexisResult;
use lexis_core::{EngineConfig, IConceptStore, LexisError};
use lexis_decay::DecayEngine;
use lexis_gateway::LlmGateway;
use lexis_generation::{GenerationPipeline, GenerationReport};

use crate::health::HealthReport;

/// Compare-and-set flag ensuring at most one run of a job kind at a time.
struct SingleFlight {
    active: AtomicBool,
}

impl SingleFlight {
    fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    /// `None` when a run is already in flight. The permit releases the flag
    /// on drop, so a cancelled run never wedges the guard.
    fn acquire(&self) -> Option<FlightPermit<'_>> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(FlightPermit { flight: self })
    }
}

struct FlightPermit<'a> {
    flight: &'a SingleFlight,
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.flight.active.store(false, Ordering::Release);
    }
}

/// Supervises the periodic generation and decay jobs.
///
/// Each job kind is single-flight: a tick arriving while the previous run is
/// still in progress is skipped and logged, never queued. The manual
/// generation trigger shares the periodic job's guard.
pub struct Scheduler {
    store: Arc<dyn IConceptStore>,
    gateway: Arc<LlmGateway>,
    pipeline: Arc<GenerationPipeline>,
    decay: Arc<DecayEngine>,
    config: EngineConfig,
    generation_guard: Arc<SingleFlight>,
    decay_guard: Arc<SingleFlight>,
    running: AtomicBool,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Scheduler {
    /// Build a stopped scheduler; call [`start`](Self::start) to launch the
    /// periodic loops. Manual triggers work either way.
    pub fn new(
        store: Arc<dyn IConceptStore>,
        gateway: Arc<LlmGateway>,
        pipeline: Arc<GenerationPipeline>,
        decay: Arc<DecayEngine>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            pipeline,
            decay,
            config,
            generation_guard: Arc::new(SingleFlight::new()),
            decay_guard: Arc::new(SingleFlight::new()),
            running: AtomicBool::new(false),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Spawn the periodic loops. Idempotent; the first tick of each job
    /// fires one full interval after start, not immediately.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::AcqRel) {
            tracing::warn!("scheduler already started");
            return;
        }

        let generation = self.spawn_generation_loop();
        let decay = self.spawn_decay_loop();
        let mut handles = self.lock_handles();
        handles.push(generation);
        handles.push(decay);
        tracing::info!(
            generation_interval_secs = self.config.generation_interval_secs,
            decay_interval_secs = self.config.decay_interval_secs,
            "scheduler started"
        );
    }

    /// Abort the periodic loops. Idempotent; in-flight runs are cancelled
    /// and their guards released.
    pub fn shutdown(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        for handle in self.lock_handles().drain(..) {
            handle.abort();
        }
        tracing::info!("scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run a generation cycle now, outside the periodic cadence.
    ///
    /// Shares the periodic job's single-flight guard: rejected immediately
    /// with [`LexisError::JobAlreadyRunning`] while any generation run
    /// (periodic or manual) is active.
    pub async fn trigger_generation(
        &self,
        category: Option<&str>,
    ) -> LexisResult<GenerationReport> {
        let Some(_permit) = self.generation_guard.acquire() else {
            return Err(LexisError::JobAlreadyRunning { job: "generation" });
        };
        self.pipeline.generate_for_category(category, Utc::now()).await
    }

    /// Current health of the engine's three observable subsystems.
    pub fn health(&self) -> HealthReport {
        HealthReport::build(
            self.store.as_ref(),
            self.is_running(),
            self.gateway.is_available(),
        )
    }

    fn spawn_generation_loop(&self) -> JoinHandle<()> {
        let pipeline = self.pipeline.clone();
        let guard = self.generation_guard.clone();
        let period = Duration::from_secs(self.config.generation_interval_secs);
        let first_tick = Instant::now() + period;
        tokio::spawn(async move {
            let mut ticks = interval_at(first_tick, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let Some(_permit) = guard.acquire() else {
                    tracing::warn!(job = "generation", "run still in flight, tick skipped");
                    continue;
                };
                match pipeline.generate_for_category(None, Utc::now()).await {
                    Ok(report) => tracing::info!(
                        category = %report.category,
                        created = report.created,
                        merged = report.merged,
                        failed = report.failed,
                        "periodic generation finished"
                    ),
                    Err(e) => tracing::error!(error = %e, "periodic generation failed"),
                }
            }
        })
    }

    fn spawn_decay_loop(&self) -> JoinHandle<()> {
        let engine = self.decay.clone();
        let guard = self.decay_guard.clone();
        let period = Duration::from_secs(self.config.decay_interval_secs);
        let first_tick = Instant::now() + period;
        tokio::spawn(async move {
            let mut ticks = interval_at(first_tick, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let Some(_permit) = guard.acquire() else {
                    tracing::warn!(job = "decay", "run still in flight, tick skipped");
                    continue;
                };
                // The full-population scan is synchronous SQLite work.
                let engine = engine.clone();
                match tokio::task::spawn_blocking(move || engine.apply_decay(Utc::now())).await {
                    Ok(Ok(count)) => tracing::info!(decayed = count, "periodic decay finished"),
                    Ok(Err(e)) => tracing::error!(error = %e, "periodic decay failed"),
                    Err(e) => tracing::error!(error = %e, "decay task aborted"),
                }
            }
        })
    }

    fn lock_handles(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.handles
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
