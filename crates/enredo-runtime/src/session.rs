//! Mutable state of one play-through.

use std::collections::{BTreeMap, BTreeSet};

use enredo_core::{GameDefinition, GameObject, Scene};
use serde::{Deserialize, Serialize};

use crate::chances::Chances;
use crate::error::{RuntimeError, RuntimeResult};
use crate::inventory::Inventory;
use crate::log::ActionLog;
use crate::matcher::Tokens;
use crate::tracker::TrackerValues;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// The player reached an ending scene.
    Victory,
    /// The player ran out of chances.
    GameOver,
}

/// Per-scene live object sets.
///
/// Each scene's set is cloned from the library the first time the scene is
/// materialized and is only ever changed here afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiveObjects {
    scenes: BTreeMap<String, Vec<GameObject>>,
}

impl LiveObjects {
    /// Whether the scene's set has been created.
    pub fn is_materialized(&self, scene_id: &str) -> bool {
        self.scenes.contains_key(scene_id)
    }

    /// Create the scene's set from the library if it does not exist yet.
    ///
    /// Object ids missing from the library are skipped.
    pub fn materialize(&mut self, scene: &Scene, library: &BTreeMap<String, GameObject>) -> &[GameObject] {
        self.scenes.entry(scene.id.clone()).or_insert_with(|| {
            scene
                .objects
                .iter()
                .filter_map(|id| {
                    let object = library.get(id);
                    if object.is_none() {
                        tracing::warn!("scene {} lists unknown object {}", scene.id, id);
                    }
                    object.cloned()
                })
                .collect()
        })
    }

    /// Objects currently in the scene. Empty if never materialized.
    pub fn get(&self, scene_id: &str) -> &[GameObject] {
        self.scenes
            .get(scene_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// An object in the scene by id.
    pub fn find(&self, scene_id: &str, object_id: &str) -> Option<&GameObject> {
        self.get(scene_id).iter().find(|o| o.id == object_id)
    }

    /// First object in the scene whose name appears in the input.
    pub fn find_named(&self, scene_id: &str, tokens: &Tokens) -> Option<&GameObject> {
        self.get(scene_id).iter().find(|o| tokens.contains(&o.name))
    }

    /// Remove an object from the scene.
    pub fn remove(&mut self, scene_id: &str, object_id: &str) -> Option<GameObject> {
        let objects = self.scenes.get_mut(scene_id)?;
        let pos = objects.iter().position(|o| o.id == object_id)?;
        Some(objects.remove(pos))
    }
}

/// Everything that changes while a game is played.
///
/// The session serializes directly as the save snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Scene the player is in.
    pub current_scene_id: String,
    /// Held items.
    pub inventory: Inventory,
    /// Live objects per scene.
    #[serde(default)]
    pub live_objects: LiveObjects,
    /// Runtime descriptions that replace authored ones.
    #[serde(default)]
    pub description_overrides: BTreeMap<String, String>,
    /// Tracker values.
    #[serde(default)]
    pub trackers: TrackerValues,
    /// Remaining chances.
    pub chances: Chances,
    /// Scenes entered at least once.
    #[serde(default)]
    pub visited_scenes: BTreeSet<String>,
    /// Diary.
    #[serde(default)]
    pub action_log: ActionLog,
    /// Set once the game is over.
    #[serde(default)]
    pub ending: Option<Ending>,
}

impl Session {
    /// A fresh session positioned at the initial scene, not yet entered.
    pub fn new(definition: &GameDefinition) -> Self {
        Self {
            current_scene_id: definition.initial_scene_id.clone(),
            inventory: Inventory::new(),
            live_objects: LiveObjects::default(),
            description_overrides: BTreeMap::new(),
            trackers: TrackerValues::from_definitions(&definition.trackers),
            chances: Chances::new(definition.settings.max_chances),
            visited_scenes: BTreeSet::new(),
            action_log: ActionLog::new(),
            ending: None,
        }
    }

    /// Whether the game has ended.
    pub fn is_ended(&self) -> bool {
        self.ending.is_some()
    }

    /// Objects in the current scene.
    pub fn current_objects(&self) -> &[GameObject] {
        self.live_objects.get(&self.current_scene_id)
    }

    /// Description of a scene, preferring the runtime override.
    pub fn description<'a>(&'a self, scene: &'a Scene) -> &'a str {
        self.description_overrides
            .get(&scene.id)
            .map_or(scene.description.as_str(), String::as_str)
    }

    /// Move an object from a scene's live set into the inventory.
    ///
    /// Returns `false` and changes nothing if the item is already held or
    /// the object is not in the scene.
    pub fn take(&mut self, scene_id: &str, object_id: &str) -> bool {
        if self.inventory.contains(object_id) {
            return false;
        }
        match self.live_objects.remove(scene_id, object_id) {
            Some(object) => self.inventory.add(object),
            None => false,
        }
    }

    /// Check a restored snapshot against the game it claims to belong to.
    ///
    /// The current scene and every held item must exist, no item may be
    /// held twice, and chances may not exceed their maximum.
    pub fn validate(&self, definition: &GameDefinition) -> RuntimeResult<()> {
        if definition.scene(&self.current_scene_id).is_none() {
            return Err(RuntimeError::SceneNotFound(self.current_scene_id.clone()));
        }
        let mut held = BTreeSet::new();
        for item in self.inventory.iter() {
            if definition.object(&item.id).is_none() {
                return Err(RuntimeError::ObjectNotFound(item.id.clone()));
            }
            if !held.insert(item.id.as_str()) {
                return Err(RuntimeError::InvalidSnapshot(format!(
                    "object {} is held twice",
                    item.id
                )));
            }
        }
        if self.chances.remaining() > self.chances.max() {
            return Err(RuntimeError::InvalidSnapshot(format!(
                "{} chances left of {}",
                self.chances.remaining(),
                self.chances.max()
            )));
        }
        Ok(())
    }

    /// Serialize to a JSON snapshot.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a JSON snapshot.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
