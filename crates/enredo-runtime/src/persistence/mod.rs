//! Saving and restoring sessions through a key-value store.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

use enredo_core::GameDefinition;

use crate::error::RuntimeResult;
use crate::session::Session;

/// Prefix of every save key.
pub const DEFAULT_KEY_PREFIX: &str = "enredo:save";

/// Build the save key for a game title.
///
/// The title is reduced to lowercase alphanumeric words joined by `-`.
pub fn save_key(prefix: &str, title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        format!("{prefix}:untitled")
    } else {
        format!("{prefix}:{slug}")
    }
}

/// Session snapshots for one game.
///
/// Failures never reach the caller. A snapshot that cannot be read is
/// discarded and the game starts fresh; a snapshot that cannot be written
/// is logged and skipped.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
    key: String,
    enabled: bool,
}

impl Persistence {
    /// Persist under `key`.
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            enabled: true,
        }
    }

    /// Persistence that never writes.
    pub fn read_only(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The save key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write a snapshot of the session.
    pub fn save(&self, session: &Session) {
        if !self.enabled {
            return;
        }
        match self.write(session) {
            Ok(()) => tracing::debug!("Saved session to {}", self.key),
            Err(e) => tracing::warn!("Failed to save session to {}: {}", self.key, e),
        }
    }

    fn write(&self, session: &Session) -> RuntimeResult<()> {
        let json = session.to_json().map_err(StorageError::from)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    /// Load the saved session, if there is a usable one.
    ///
    /// Snapshots that do not parse, or that fail [`Session::validate`], are
    /// removed.
    pub fn restore(&self, definition: &GameDefinition) -> Option<Session> {
        let json = match self.store.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read session from {}: {}", self.key, e);
                return None;
            }
        };

        let mut session = match Session::from_json(&json) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable session {}: {}", self.key, e);
                self.discard();
                return None;
            }
        };

        if let Err(e) = session.validate(definition) {
            tracing::warn!("Discarding session {}: {}", self.key, e);
            self.discard();
            return None;
        }

        session.trackers.reconcile(&definition.trackers);
        tracing::debug!("Restored session from {}", self.key);
        Some(session)
    }

    /// Delete the saved session.
    pub fn clear(&self) {
        if !self.enabled {
            return;
        }
        self.discard();
    }

    fn discard(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!("Failed to remove session {}: {}", self.key, e);
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chances::Chances;
    use crate::error::RuntimeError;
    use enredo_core::{GameObject, Scene};

    struct FullDisk;

    impl KeyValueStore for FullDisk {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    fn definition() -> GameDefinition {
        GameDefinition::new("O Farol", "scn_a").with_scene(Scene::new("scn_a", "Sala"))
    }

    #[test]
    fn key_from_title() {
        assert_eq!(save_key(DEFAULT_KEY_PREFIX, "O Farol"), "enredo:save:o-farol");
        assert_eq!(save_key("p", "  Casa -- Velha!  "), "p:casa-velha");
        assert_eq!(save_key("p", "Coração"), "p:coração");
        assert_eq!(save_key("p", "???"), "p:untitled");
    }

    #[test]
    fn save_and_restore() {
        let store = MemoryStore::new();
        let def = definition();
        let persistence = Persistence::new(Box::new(store.clone()), "k");

        let mut session = Session::new(&def);
        session.visited_scenes.insert("scn_a".into());
        persistence.save(&session);

        assert_eq!(persistence.restore(&def), Some(session));
    }

    #[test]
    fn missing_key_is_fresh() {
        let persistence = Persistence::new(Box::new(MemoryStore::new()), "k");
        assert!(persistence.restore(&definition()).is_none());
    }

    #[test]
    fn corrupt_snapshot_is_discarded() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let persistence = Persistence::new(Box::new(store.clone()), "k");

        assert!(persistence.restore(&definition()).is_none());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn unknown_scene_is_discarded() {
        let store = MemoryStore::new();
        let def = definition();
        let mut session = Session::new(&def);
        session.current_scene_id = "scn_removida".into();
        store.set("k", &session.to_json().unwrap()).unwrap();

        let persistence = Persistence::new(Box::new(store.clone()), "k");
        assert!(persistence.restore(&def).is_none());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn read_only_never_writes() {
        let store = MemoryStore::new();
        let def = definition();
        let persistence = Persistence::new(Box::new(store.clone()), "k").read_only();
        persistence.save(&Session::new(&def));
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn duplicate_inventory_is_discarded() {
        let store = MemoryStore::new();
        let def = definition().with_object(GameObject::new("obj_chave", "chave").takable());
        let chave = GameObject::new("obj_chave", "chave").takable();

        let mut snapshot: serde_json::Value =
            serde_json::from_str(&Session::new(&def).to_json().unwrap()).unwrap();
        snapshot["inventory"] = serde_json::json!([chave, chave]);
        store.set("k", &snapshot.to_string()).unwrap();

        let persistence = Persistence::new(Box::new(store.clone()), "k");
        assert!(persistence.restore(&def).is_none());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn validate_reports_broken_invariants() {
        let def = definition().with_object(GameObject::new("obj_chave", "chave").takable());

        let mut session = Session::new(&def);
        session.inventory.add(GameObject::new("obj_sumida", "sumida"));
        assert!(matches!(
            session.validate(&def),
            Err(RuntimeError::ObjectNotFound(id)) if id == "obj_sumida"
        ));

        let mut session = Session::new(&def);
        session.chances = Chances::new(3).with_remaining(5);
        assert!(matches!(
            session.validate(&def),
            Err(RuntimeError::InvalidSnapshot(_))
        ));

        let mut session = Session::new(&def);
        session.current_scene_id = "scn_removida".into();
        assert!(matches!(
            session.validate(&def),
            Err(RuntimeError::SceneNotFound(_))
        ));
    }

    #[test]
    fn write_failure_is_a_storage_error() {
        let def = definition();
        let persistence = Persistence::new(Box::new(FullDisk), "k");
        let session = Session::new(&def);

        assert!(matches!(
            persistence.write(&session),
            Err(RuntimeError::Storage(StorageError::Io(_)))
        ));
        persistence.save(&session);
    }
}
