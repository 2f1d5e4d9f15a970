//! Virtual-time queue of delayed effects.
//!
//! Nothing here sleeps. The engine asks the scheduler for due events when
//! the host advances the clock, so the same sequence of inputs and clock
//! advances always produces the same outputs.

use std::time::Duration;

/// Effect to apply when an event fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledAction {
    /// End the game with a victory.
    Victory,
    /// Load a scene because a tracker reached its maximum.
    ForcedTransition {
        /// Consequence scene.
        scene_id: String,
    },
    /// Swap the rendered scene behind a running transition.
    RevealScene {
        /// Scene to render.
        scene_id: String,
    },
    /// Hide the transition overlay.
    HideTransition,
}

impl ScheduledAction {
    /// Whether input is rejected while this action is pending.
    pub fn blocks_input(&self) -> bool {
        matches!(self, Self::Victory | Self::ForcedTransition { .. })
    }
}

/// An action queued at an absolute virtual time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// Virtual time at which the event fires.
    pub fire_at: Duration,
    /// Insertion order, used to break ties.
    pub seq: u64,
    /// What to do.
    pub action: ScheduledAction,
}

/// Queue of pending events and the virtual clock they are measured against.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    events: Vec<ScheduledEvent>,
}

impl Scheduler {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue an action `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, action: ScheduledAction) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(ScheduledEvent {
            fire_at: self.now + delay,
            seq,
            action,
        });
        seq
    }

    /// Queue a forced transition, replacing any that is already pending.
    pub fn schedule_forced(&mut self, delay: Duration, scene_id: impl Into<String>) -> u64 {
        if self.cancel_forced() {
            tracing::debug!("Superseded pending forced transition");
        }
        self.schedule(
            delay,
            ScheduledAction::ForcedTransition {
                scene_id: scene_id.into(),
            },
        )
    }

    /// Drop the pending forced transition. Returns whether one was pending.
    pub fn cancel_forced(&mut self) -> bool {
        let before = self.events.len();
        self.events
            .retain(|e| !matches!(e.action, ScheduledAction::ForcedTransition { .. }));
        self.events.len() != before
    }

    /// The pending forced transition's destination, if any.
    pub fn pending_forced(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match &e.action {
            ScheduledAction::ForcedTransition { scene_id } => Some(scene_id.as_str()),
            _ => None,
        })
    }

    /// Whether a victory is pending.
    pub fn has_pending_victory(&self) -> bool {
        self.events
            .iter()
            .any(|e| e.action == ScheduledAction::Victory)
    }

    /// Whether a pending event should block player input.
    pub fn is_blocking(&self) -> bool {
        self.events.iter().any(|e| e.action.blocks_input())
    }

    /// Fire time of the earliest pending event.
    pub fn next_fire_at(&self) -> Option<Duration> {
        self.events.iter().map(|e| e.fire_at).min()
    }

    /// Remove and return the earliest event due at or before `until`.
    ///
    /// The clock moves forward to the event's fire time.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledEvent> {
        let pos = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.fire_at <= until)
            .min_by_key(|(_, e)| (e.fire_at, e.seq))
            .map(|(i, _)| i)?;
        let event = self.events.remove(pos);
        self.now = self.now.max(event.fire_at);
        Some(event)
    }

    /// Move the clock forward to `time`. Never moves it back.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
