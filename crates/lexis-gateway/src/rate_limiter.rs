//! Paces outbound provider calls to a requests-per-minute ceiling.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval of `60/RPM` seconds between permitted
/// dispatches.
///
/// Callers serialize through the internal mutex, which tokio hands out in
/// FIFO order, so nobody skips ahead of a longer-waiting caller. The wait is
/// a timer suspension, never a busy loop.
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// A limiter for the given requests-per-minute ceiling.
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = requests_per_minute.max(1);
        Self::with_interval(Duration::from_secs_f64(60.0 / rpm as f64))
    }

    /// A limiter with an explicit minimum inter-call interval.
    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Suspend until dispatch is permitted, then stamp the dispatch time.
    ///
    /// The stamp is taken while still holding the lock, so the check and the
    /// update are atomic with respect to concurrent callers.
    pub async fn acquire(&self) {
        let mut last = self.last_dispatch.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                tracing::debug!(
                    wait_ms = (ready_at - now).as_millis() as u64,
                    "rate limiter pacing provider call"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
