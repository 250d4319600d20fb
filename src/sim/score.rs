//! Time-based scoring with a star-driven multiplier
//!
//! The accumulator is continuous; everything shown or persisted is its
//! integer floor. Score and multiplier never decrease within a session.

use crate::consts::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreEngine {
    score: f64,
    stars: u32,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accrue time-score for one tick of play.
    pub fn accrue(&mut self, dt: f32) {
        self.score += dt as f64 * BASE_SCORE_RATE * self.multiplier();
    }

    /// Bank one collected star: bumps the multiplier and adds the flat
    /// star bonus.
    pub fn collect_star(&mut self) {
        self.stars += 1;
        self.score += STAR_SCORE_BONUS;
    }

    /// `clamp(1 + stars * 0.1, 1, 3)` - strictly increasing in stars until
    /// the cap.
    pub fn multiplier(&self) -> f64 {
        (1.0 + self.stars as f64 * STAR_MULT_STEP).clamp(1.0, MULT_CAP)
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    /// Floored score for the HUD and best-score comparison.
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    pub fn raw_score(&self) -> f64 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multiplier_law() {
        let mut engine = ScoreEngine::new();
        assert_eq!(engine.multiplier(), 1.0);
        engine.collect_star();
        assert!((engine.multiplier() - 1.1).abs() < 1e-9);
        for _ in 0..4 {
            engine.collect_star();
        }
        assert!((engine.multiplier() - 1.5).abs() < 1e-9);
        // Cap at 3.0 regardless of further stars
        for _ in 0..100 {
            engine.collect_star();
        }
        assert_eq!(engine.multiplier(), 3.0);
    }

    #[test]
    fn test_accrual_rate() {
        let mut engine = ScoreEngine::new();
        for _ in 0..100 {
            engine.accrue(0.01);
        }
        // One second at base rate and multiplier 1
        assert!((engine.raw_score() - 20.0).abs() < 1e-3);
        assert!((19..=20).contains(&engine.display_score()));
    }

    #[test]
    fn test_star_bonus_is_flat() {
        let mut engine = ScoreEngine::new();
        engine.collect_star();
        assert_eq!(engine.raw_score(), STAR_SCORE_BONUS);
        engine.collect_star();
        assert_eq!(engine.raw_score(), 2.0 * STAR_SCORE_BONUS);
    }

    #[test]
    fn test_display_is_floor() {
        let mut engine = ScoreEngine::new();
        engine.accrue(0.049); // 0.98 points
        assert_eq!(engine.display_score(), 0);
        engine.accrue(0.002);
        assert_eq!(engine.display_score(), 1);
    }

    proptest! {
        /// Score and multiplier are non-decreasing under any interleaving of
        /// accrual and pickups, and score strictly increases for dt > 0.
        #[test]
        fn prop_monotone(ops in proptest::collection::vec(any::<bool>(), 1..300)) {
            let mut engine = ScoreEngine::new();
            let mut last_score = 0.0;
            let mut last_mult = 1.0;
            for star in ops {
                if star {
                    engine.collect_star();
                } else {
                    engine.accrue(0.016);
                    prop_assert!(engine.raw_score() > last_score);
                }
                prop_assert!(engine.raw_score() >= last_score);
                prop_assert!(engine.multiplier() >= last_mult);
                last_score = engine.raw_score();
                last_mult = engine.multiplier();
            }
        }
    }
}
