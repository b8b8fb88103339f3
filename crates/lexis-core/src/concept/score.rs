use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Relevance score clamped to [0.0, 1.0].
///
/// Used for both `confidence_score` (fast-moving, decay-subject) and
/// `historical_yield` (slow-moving long-run average).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    /// Create a new Score, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Exponential blend toward `target` with the given weight:
    /// `self·(1−w) + target·w`, clamped.
    ///
    /// A higher weight gives the new observation more influence.
    pub fn blend(self, target: f64, weight: f64) -> Self {
        Self::new(self.0 * (1.0 - weight) + target * weight)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(s: Score) -> Self {
        s.0
    }
}

impl Mul<f64> for Score {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range() {
        assert_eq!(Score::new(1.5).value(), 1.0);
        assert_eq!(Score::new(-0.2).value(), 0.0);
        assert_eq!(Score::new(0.62).value(), 0.62);
    }

    #[test]
    fn blend_matches_exponential_formula() {
        // 0.5·0.7 + 0.9·0.3 = 0.62
        let s = Score::new(0.5).blend(0.9, 0.3);
        assert!((s.value() - 0.62).abs() < 1e-12);
    }

    #[test]
    fn blend_stays_in_range() {
        let s = Score::new(1.0).blend(1.0, 1.0);
        assert_eq!(s.value(), 1.0);
    }
}
