//! The player's life counter.

use serde::{Deserialize, Serialize};

/// Result of losing a chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanceLoss {
    /// Chances remain.
    Remaining(i32),
    /// No chances remain. The game is over.
    Depleted,
}

/// Bounded counter of remaining chances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chances {
    remaining: i32,
    max: i32,
}

impl Chances {
    /// Start with the full number of chances.
    pub fn new(max: i32) -> Self {
        Self {
            remaining: max,
            max,
        }
    }

    /// Override the remaining count.
    pub fn with_remaining(mut self, remaining: i32) -> Self {
        self.remaining = remaining;
        self
    }

    /// Remaining chances.
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Maximum chances.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Whether no chances remain.
    pub fn is_depleted(&self) -> bool {
        self.remaining <= 0
    }

    /// Lose one chance.
    pub fn lose(&mut self) -> ChanceLoss {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining <= 0 {
            ChanceLoss::Depleted
        } else {
            ChanceLoss::Remaining(self.remaining)
        }
    }

    /// Restore one chance, capped at the maximum.
    pub fn restore(&mut self) -> i32 {
        self.remaining = self.remaining.saturating_add(1).min(self.max);
        self.remaining
    }
}
