//! Append-only action log, shown to the player as the diary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    /// Raw player input.
    Input {
        /// The text as typed, trimmed.
        text: String,
        /// When it was entered.
        timestamp: DateTime<Utc>,
    },
    /// Text shown in response to input.
    Output {
        /// The response text.
        text: String,
        /// When it was shown.
        timestamp: DateTime<Utc>,
    },
    /// A scene was entered.
    SceneLoad {
        /// Scene id.
        scene_id: String,
        /// Scene name.
        name: String,
        /// Scene image, if any.
        image: Option<String>,
        /// Description shown on entry.
        description: String,
        /// When the scene was entered.
        timestamp: DateTime<Utc>,
    },
}

impl LogEntry {
    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Input { timestamp, .. }
            | Self::Output { timestamp, .. }
            | Self::SceneLoad { timestamp, .. } => *timestamp,
        }
    }
}

/// Chronological record of everything the player did and saw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record player input.
    pub fn input(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Input {
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// Record response text.
    pub fn output(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Output {
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// Record a scene load.
    pub fn scene_load(
        &mut self,
        scene_id: impl Into<String>,
        name: impl Into<String>,
        image: Option<String>,
        description: impl Into<String>,
    ) {
        self.entries.push(LogEntry::SceneLoad {
            scene_id: scene_id.into(),
            name: name.into(),
            image,
            description: description.into(),
            timestamp: Utc::now(),
        });
    }

    /// Get all entries.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the log as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Diário\n======\n\n");
        for entry in &self.entries {
            match entry {
                LogEntry::Input { text, .. } => {
                    out.push_str(&format!("> {text}\n"));
                }
                LogEntry::Output { text, .. } => {
                    out.push_str(&format!("{text}\n\n"));
                }
                LogEntry::SceneLoad {
                    name, description, ..
                } => {
                    out.push_str(&format!("--- {name} ---\n"));
                    out.push_str(&format!("{description}\n\n"));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut log = ActionLog::new();
        log.scene_load("scn_a", "Sala", None, "Uma sala escura.");
        log.input("olhar");
        log.output("Uma sala escura.");
        assert_eq!(log.len(), 3);
        assert!(matches!(log.entries()[1], LogEntry::Input { ref text, .. } if text == "olhar"));
        assert!(log.entries()[0].timestamp() <= log.entries()[2].timestamp());
    }

    #[test]
    fn export_text() {
        let mut log = ActionLog::new();
        log.scene_load("scn_a", "Sala", None, "Uma sala escura.");
        log.input("pegar vela");
        log.output("Você pegou vela.");
        let text = log.export_text();
        assert!(text.contains("--- Sala ---"));
        assert!(text.contains("> pegar vela"));
        assert!(text.contains("Você pegou vela."));
    }

    #[test]
    fn entries_are_tagged() {
        let mut log = ActionLog::new();
        log.input("olhar");
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json[0]["kind"], "input");
        let back: ActionLog = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }
}
