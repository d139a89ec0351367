//! Score and high score with an odometer-style display
//!
//! Awards land on the true score immediately. The on-screen digits trail
//! behind, counting up by one per rendered frame with right-to-left carry.
//! The high score lives only as long as the process.

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_DIGITS;

/// Add one to a digit strip, carrying leftwards. An all-nines strip wraps
/// to all zeros.
pub fn increment_digits(digits: &mut [u8; SCORE_DIGITS]) {
    for digit in digits.iter_mut().rev() {
        *digit += 1;
        if *digit > 9 {
            *digit = 0;
        } else {
            return;
        }
    }
}

/// A displayed value that trails a target one step per frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingDisplay {
    /// Value the digits currently show
    pub shown: u32,
    /// Glyph index per digit, most significant first
    pub digits: [u8; SCORE_DIGITS],
}

impl RollingDisplay {
    /// Step one unit toward `target`. Returns true if the digits changed.
    pub fn roll_toward(&mut self, target: u32) -> bool {
        if self.shown >= target {
            return false;
        }
        increment_digits(&mut self.digits);
        self.shown += 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Score bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub score: u32,
    pub high: u32,
    pub visible_score: RollingDisplay,
    pub visible_high: RollingDisplay,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points to the true score
    pub fn award(&mut self, points: u32) {
        self.score += points;
    }

    /// Per-frame display update: roll both strips one step, then raise the
    /// high score if it has been beaten.
    pub fn tick(&mut self) {
        self.visible_score.roll_toward(self.score);
        self.visible_high.roll_toward(self.high);

        if self.score > self.high {
            self.high = self.score;
        }
    }

    /// Start a new game; the high score survives
    pub fn reset(&mut self) {
        self.score = 0;
        self.visible_score.reset();
    }

    /// Both strips show their true values
    pub fn is_settled(&self) -> bool {
        self.visible_score.shown == self.score && self.visible_high.shown == self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rolls_one_step_per_frame() {
        let mut score = Score::new();
        score.award(20);
        for _ in 0..19 {
            score.tick();
        }
        assert_eq!(score.visible_score.shown, 19);
        score.tick();
        assert_eq!(score.visible_score.shown, 20);
        assert_eq!(score.score, 20);
        assert_eq!(score.visible_score.digits, [0, 0, 0, 0, 0, 2, 0]);
    }

    #[test]
    fn test_carry_moves_one_place_left() {
        let mut digits = [0, 0, 0, 0, 0, 0, 9];
        increment_digits(&mut digits);
        assert_eq!(digits, [0, 0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_carry_ripples_through_nines() {
        let mut digits = [0, 0, 0, 1, 9, 9, 9];
        increment_digits(&mut digits);
        assert_eq!(digits, [0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn test_all_nines_wrap_to_zero() {
        let mut digits = [9; SCORE_DIGITS];
        increment_digits(&mut digits);
        assert_eq!(digits, [0; SCORE_DIGITS]);
    }

    #[test]
    fn test_high_score_follows_score_and_trails_it() {
        let mut score = Score::new();
        score.award(100);
        score.tick();
        assert_eq!(score.high, 100);
        // High digits lag a frame behind the score digits
        assert_eq!(score.visible_high.shown, 0);
        for _ in 0..200 {
            score.tick();
        }
        assert!(score.is_settled());
        assert_eq!(score.visible_high.digits, [0, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut score = Score::new();
        score.award(40);
        for _ in 0..50 {
            score.tick();
        }
        score.reset();
        assert_eq!(score.score, 0);
        assert_eq!(score.visible_score, RollingDisplay::default());
        assert_eq!(score.high, 40);
        assert_eq!(score.visible_high.shown, 40);
    }
}
