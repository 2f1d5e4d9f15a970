//! Runtime tracker values.

use std::collections::BTreeMap;

use enredo_core::TrackerDefinition;
use serde::{Deserialize, Serialize};

/// Current value of every tracker, keyed by tracker id.
///
/// Values are the running sum of applied changes and are never clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackerValues {
    values: BTreeMap<String, i64>,
}

impl TrackerValues {
    /// Initialize from the definitions' initial values.
    pub fn from_definitions(definitions: &[TrackerDefinition]) -> Self {
        Self {
            values: definitions
                .iter()
                .map(|d| (d.id.clone(), d.initial_value))
                .collect(),
        }
    }

    /// Current value of a tracker.
    pub fn get(&self, tracker_id: &str) -> Option<i64> {
        self.values.get(tracker_id).copied()
    }

    /// Add `change` to a tracker and return the new value.
    ///
    /// An id without a value starts from zero.
    pub fn apply(&mut self, tracker_id: &str, change: i64) -> i64 {
        let value = self.values.entry(tracker_id.to_string()).or_insert(0);
        *value = value.saturating_add(change);
        *value
    }

    /// First definition, in declaration order, whose value reached its
    /// maximum and which has a consequence scene.
    ///
    /// Ids present here but not in `definitions` are ignored.
    pub fn breached<'a>(&self, definitions: &'a [TrackerDefinition]) -> Option<&'a TrackerDefinition> {
        definitions.iter().find(|d| {
            d.consequence_scene_id.is_some()
                && self.get(&d.id).is_some_and(|v| d.is_breached_by(v))
        })
    }

    /// Add missing trackers at their initial values.
    ///
    /// Used after restoring a snapshot taken before a tracker was defined.
    pub fn reconcile(&mut self, definitions: &[TrackerDefinition]) {
        for d in definitions {
            self.values.entry(d.id.clone()).or_insert(d.initial_value);
        }
    }

    /// Iterate over `(id, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
