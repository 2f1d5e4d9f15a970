//! Objects in the game library.

use serde::{Deserialize, Serialize};

/// An object the player can see, examine, and possibly carry.
///
/// The library copy is never mutated. Scenes and the inventory hold clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
    /// Unique identifier.
    #[serde(default)]
    pub id: String,
    /// Display name, matched as a whole word against player input.
    pub name: String,
    /// Text shown when the player examines the object.
    #[serde(default, alias = "examineText", alias = "description")]
    pub examine: String,
    /// Whether the built-in take command can pick it up.
    #[serde(default, alias = "isTakable")]
    pub takable: bool,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
}

impl GameObject {
    /// Create an object with the given id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            examine: String::new(),
            takable: false,
            image: None,
        }
    }

    /// Set the examine text.
    pub fn with_examine(mut self, text: impl Into<String>) -> Self {
        self.examine = text.into();
        self
    }

    /// Mark the object as takable.
    pub fn takable(mut self) -> Self {
        self.takable = true;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
