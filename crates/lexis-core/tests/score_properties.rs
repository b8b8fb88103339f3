//! Property tests for the clamped score type and the blend formula.

use lexis_core::{ConceptStatus, Score};
use proptest::prelude::*;

proptest! {
    #[test]
    fn score_always_in_unit_interval(raw in -10.0f64..10.0) {
        let s = Score::new(raw);
        prop_assert!((0.0..=1.0).contains(&s.value()));
    }

    #[test]
    fn blend_always_in_unit_interval(
        base in 0.0f64..=1.0,
        target in 0.0f64..=1.0,
        weight in 0.0f64..=1.0,
    ) {
        let s = Score::new(base).blend(target, weight);
        prop_assert!((0.0..=1.0).contains(&s.value()));
    }

    #[test]
    fn blend_moves_toward_target(
        base in 0.0f64..=1.0,
        target in 0.0f64..=1.0,
        weight in 0.01f64..=1.0,
    ) {
        let s = Score::new(base).blend(target, weight);
        // The blended value lands between base and target.
        let lo = base.min(target) - 1e-12;
        let hi = base.max(target) + 1e-12;
        prop_assert!(s.value() >= lo && s.value() <= hi);
    }

    #[test]
    fn status_is_threshold_consistent(
        score in 0.0f64..=1.0,
        threshold in 0.0f64..=1.0,
    ) {
        let status = ConceptStatus::for_score(Score::new(score), threshold);
        prop_assert_eq!(status == ConceptStatus::Active, score >= threshold);
    }
}
