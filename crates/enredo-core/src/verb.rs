//! Global fixed verbs.

use serde::{Deserialize, Serialize};

/// A scene-independent command with a fixed response.
///
/// Fixed verbs are checked before any scene interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedVerb {
    /// Words that trigger the response.
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Response text.
    #[serde(default, alias = "response")]
    pub description: String,
}

impl FixedVerb {
    /// Create a fixed verb.
    pub fn new<I, S>(verbs: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verbs: verbs.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }
}
