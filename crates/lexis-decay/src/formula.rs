use chrono::Duration;

use lexis_core::Score;

/// Whole decay periods contained in `elapsed`.
///
/// Zero when less than one full period has passed — the caller must then
/// leave the concept untouched, which is what makes repeated runs within a
/// period no-ops.
pub fn elapsed_periods(elapsed: Duration, period: Duration) -> u32 {
    let period_secs = period.num_seconds();
    if period_secs <= 0 || elapsed < period {
        return 0;
    }
    u32::try_from(elapsed.num_seconds() / period_secs).unwrap_or(u32::MAX)
}

/// Geometric decay over `periods` periods:
///
/// ```text
/// score' = score × rate^periods
/// ```
///
/// Monotonically toward 0, never below it.
pub fn decayed(score: Score, rate: f64, periods: u32) -> Score {
    if periods == 0 {
        return score;
    }
    Score::new(score.value() * rate.powi(periods.min(i32::MAX as u32) as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_floor_toward_zero() {
        let period = Duration::hours(1);
        assert_eq!(elapsed_periods(Duration::minutes(59), period), 0);
        assert_eq!(elapsed_periods(Duration::minutes(60), period), 1);
        assert_eq!(elapsed_periods(Duration::minutes(150), period), 2);
        assert_eq!(elapsed_periods(Duration::hours(3), period), 3);
    }

    #[test]
    fn three_periods_at_default_rate() {
        // 0.62 × 0.95³ ≈ 0.5308
        let s = decayed(Score::new(0.62), 0.95, 3);
        assert!((s.value() - 0.62 * 0.95_f64.powi(3)).abs() < 1e-12);
        assert!((s.value() - 0.5308).abs() < 1e-3);
    }

    #[test]
    fn zero_periods_change_nothing() {
        let s = Score::new(0.4);
        assert_eq!(decayed(s, 0.95, 0), s);
    }
}
