//! Tracker definitions.

use serde::{Deserialize, Serialize};

fn default_max_value() -> i64 {
    100
}

fn default_true() -> bool {
    true
}

/// A named counter that can force a scene change once it reaches its maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerDefinition {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Starting value.
    #[serde(default)]
    pub initial_value: i64,
    /// Threshold checked after every interaction that changes trackers.
    #[serde(default = "default_max_value")]
    pub max_value: i64,
    /// Scene forced once the value reaches `max_value`.
    #[serde(default)]
    pub consequence_scene_id: Option<String>,
    /// Keep the tracker out of the status panel.
    #[serde(default)]
    pub hidden: bool,
    /// Show the value as `value/max` instead of the bare value.
    #[serde(default = "default_true")]
    pub show_max: bool,
    /// Optional unit suffix, e.g. `%`.
    #[serde(default)]
    pub unit: Option<String>,
}

impl TrackerDefinition {
    /// Create a tracker with the given bounds.
    pub fn new(id: impl Into<String>, name: impl Into<String>, initial_value: i64, max_value: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initial_value,
            max_value,
            consequence_scene_id: None,
            hidden: false,
            show_max: true,
            unit: None,
        }
    }

    /// Set the consequence scene.
    pub fn with_consequence(mut self, scene_id: impl Into<String>) -> Self {
        self.consequence_scene_id = Some(scene_id.into());
        self
    }

    /// Hide the tracker from the status panel.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether `value` has reached the threshold.
    pub fn is_breached_by(&self, value: i64) -> bool {
        value >= self.max_value
    }

    /// Format a value for display using the tracker's flags.
    ///
    /// The value is shown as stored, so it may exceed the maximum or drop
    /// below zero.
    pub fn format_value(&self, value: i64) -> String {
        let unit = self.unit.as_deref().unwrap_or("");
        if self.show_max {
            format!("{value}/{}{unit}", self.max_value)
        } else {
            format!("{value}{unit}")
        }
    }
}
