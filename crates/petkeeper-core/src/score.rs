//! Periodic score accumulation.

use serde::{Deserialize, Serialize};

/// Default points awarded per score tick.
pub const DEFAULT_POINTS_PER_SECOND: i64 = 10;

/// Accumulates points on its own timer while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    points_per_second: i64,
    score: i64,
    running: bool,
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_PER_SECOND)
    }
}

impl ScoreKeeper {
    /// Creates a stopped keeper at zero.
    #[must_use]
    pub const fn new(points_per_second: i64) -> Self {
        Self {
            points_per_second,
            score: 0,
            running: false,
        }
    }

    /// Starts accumulating.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops accumulating; the score is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stops and zeroes the score.
    pub fn reset(&mut self) {
        self.running = false;
        self.score = 0;
    }

    /// One timer tick. Adds the rate only while running.
    pub fn tick(&mut self) {
        if self.running {
            self.score = self.score.saturating_add(self.points_per_second);
        }
    }

    /// Adds points regardless of the running flag.
    pub fn add(&mut self, points: i64) {
        self.score = self.score.saturating_add(points);
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Overwrites the score.
    pub fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    /// Whether ticks currently add points.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }
}
