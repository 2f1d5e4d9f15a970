//! The player's inventory.

use enredo_core::GameObject;
use serde::{Deserialize, Serialize};

use crate::matcher::Tokens;

/// Items held by the player, in the order they were taken.
///
/// An object id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<GameObject>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an item is held.
    pub fn contains(&self, object_id: &str) -> bool {
        self.items.iter().any(|o| o.id == object_id)
    }

    /// Add an item. Returns `false` if it was already held.
    pub fn add(&mut self, object: GameObject) -> bool {
        if self.contains(&object.id) {
            return false;
        }
        self.items.push(object);
        true
    }

    /// Remove an item, returning it if it was held.
    pub fn remove(&mut self, object_id: &str) -> Option<GameObject> {
        let pos = self.items.iter().position(|o| o.id == object_id)?;
        Some(self.items.remove(pos))
    }

    /// Get a held item by id.
    pub fn get(&self, object_id: &str) -> Option<&GameObject> {
        self.items.iter().find(|o| o.id == object_id)
    }

    /// First held item whose name appears in the input.
    pub fn find_named(&self, tokens: &Tokens) -> Option<&GameObject> {
        self.items.iter().find(|o| tokens.contains(&o.name))
    }

    /// Iterate over held items in order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.items.iter()
    }

    /// Number of held items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
