//! Timing of visual scene transitions.
//!
//! A transition shows its overlay, holds, swaps the rendered scene behind
//! it, holds again and hides. The swap and the hide are scheduled events.

use std::time::Duration;

/// Offsets of the two scheduled steps of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Delay from the start of the transition to the content swap.
    pub swap_at: Duration,
    /// Delay from the start of the transition to hiding the overlay.
    pub total: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            swap_at: Duration::from_millis(600),
            total: Duration::from_millis(1200),
        }
    }
}

impl TransitionTiming {
    /// Timing with the swap halfway through `total`.
    pub fn symmetric(total: Duration) -> Self {
        Self {
            swap_at: total / 2,
            total,
        }
    }
}
