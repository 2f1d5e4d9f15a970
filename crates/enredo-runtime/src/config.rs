//! Engine configuration.

use std::time::Duration;

use crate::persistence::DEFAULT_KEY_PREFIX;
use crate::presentation::TransitionTiming;

/// Runtime settings that are not part of the authored game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Delay between entering an ending scene and the victory.
    pub victory_delay: Duration,
    /// Delay between a tracker breach and its forced transition.
    pub forced_transition_delay: Duration,
    /// Timing of visual transitions.
    pub transition: TransitionTiming,
    /// Play without ever writing a save.
    pub preview: bool,
    /// Prefix of the save key.
    pub key_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            victory_delay: Duration::from_millis(1500),
            forced_transition_delay: Duration::from_millis(800),
            transition: TransitionTiming::default(),
            preview: false,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl EngineConfig {
    /// Set the victory delay.
    pub fn with_victory_delay(mut self, delay: Duration) -> Self {
        self.victory_delay = delay;
        self
    }

    /// Set the forced transition delay.
    pub fn with_forced_transition_delay(mut self, delay: Duration) -> Self {
        self.forced_transition_delay = delay;
        self
    }

    /// Set the transition timing.
    pub fn with_transition(mut self, timing: TransitionTiming) -> Self {
        self.transition = timing;
        self
    }

    /// Enable or disable preview mode.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Set the save key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}
