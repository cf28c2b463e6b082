//! Score, line and level bookkeeping

use serde::Serialize;
use std::time::Duration;

/// Points per cleared layer at level 1
const POINTS_PER_LAYER: u64 = 100;
/// Cleared layers needed per level
const LINES_PER_LEVEL: u32 = 10;
const BASE_INTERVAL_MS: u64 = 1000;
const INTERVAL_STEP_MS: u64 = 100;
const MIN_INTERVAL_MS: u64 = 100;

/// Scoring calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starting at 1
    pub level: u32,
    /// Total layers cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
        }
    }

    /// Apply one landing that removed `lines_cleared` layers.
    /// Points use the level in force before this landing; returns the points awarded.
    pub fn add_clear(&mut self, lines_cleared: u32) -> u64 {
        let awarded = lines_cleared as u64 * POINTS_PER_LAYER * self.level as u64;
        self.points += awarded;
        self.lines += lines_cleared;
        self.level = self.lines / LINES_PER_LEVEL + 1;
        awarded
    }

    /// Gravity interval for the current level, floored at 100ms
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.level)
    }
}

/// `max(100, 1000 - (level - 1) * 100)` milliseconds
pub fn gravity_interval(level: u32) -> Duration {
    let reduction = (level.saturating_sub(1) as u64).saturating_mul(INTERVAL_STEP_MS);
    let ms = BASE_INTERVAL_MS.saturating_sub(reduction).max(MIN_INTERVAL_MS);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), 100);
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
        assert_eq!(score.level, 1);
    }

    #[test]
    fn test_no_clear_scores_nothing() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(0), 0);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_points_use_level_before_update() {
        let mut score = Score::new();
        score.add_clear(9);
        assert_eq!(score.points, 900);
        // Crossing into level 2 is still paid at level 1
        assert_eq!(score.add_clear(3), 300);
        assert_eq!(score.level, 2);
        assert_eq!(score.add_clear(1), 200);
    }

    #[test]
    fn test_level_formula() {
        let mut score = Score::new();
        for lines in 1..=45u32 {
            score.add_clear(1);
            assert_eq!(score.lines, lines);
            assert_eq!(score.level, lines / 10 + 1);
        }
    }

    #[test]
    fn test_gravity_interval() {
        assert_eq!(gravity_interval(1), Duration::from_millis(1000));
        assert_eq!(gravity_interval(2), Duration::from_millis(900));
        assert_eq!(gravity_interval(9), Duration::from_millis(200));
        assert_eq!(gravity_interval(10), Duration::from_millis(100));
        assert_eq!(gravity_interval(11), Duration::from_millis(100));
        assert_eq!(gravity_interval(500), Duration::from_millis(100));
        assert_eq!(Score::new().gravity_interval(), Duration::from_millis(1000));
    }
}
