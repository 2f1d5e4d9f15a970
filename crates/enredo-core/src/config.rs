//! Authored configuration scalars.

use serde::{Deserialize, Serialize};

/// Game-wide settings chosen by the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Game title. Also used to derive the save key.
    pub title: String,
    /// Number of chances the player starts with.
    pub max_chances: i32,
    /// Whether the chances system is shown and can be restored.
    pub chances_enabled: bool,
    /// Response when no rule matches the input.
    pub default_failure_message: String,
    /// Symbol drawn for each remaining chance.
    pub chance_icon: Option<String>,
    /// Color of the chance icon.
    pub chance_color: Option<String>,
    /// Presentation theme name.
    pub theme: Option<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            title: "Enredo".to_string(),
            max_chances: 3,
            chances_enabled: false,
            default_failure_message: "Nada acontece.".to_string(),
            chance_icon: None,
            chance_color: None,
            theme: None,
        }
    }
}

impl GameSettings {
    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enable the chances system with the given maximum.
    pub fn with_chances(mut self, max: i32) -> Self {
        self.chances_enabled = true;
        self.max_chances = max;
        self
    }

    /// Set the default failure message.
    pub fn with_failure_message(mut self, text: impl Into<String>) -> Self {
        self.default_failure_message = text.into();
        self
    }
}
