use std::path::Path;

use enredo_runtime::persistence::{DEFAULT_KEY_PREFIX, save_key};
use enredo_runtime::{FileStore, KeyValueStore};

pub fn run(game: &Path, save_dir: &Path) -> Result<(), String> {
    let definition = super::load_game(game)?;
    let title = &definition.settings.title;
    let key = save_key(DEFAULT_KEY_PREFIX, title);
    let store = FileStore::new(save_dir);

    let existing = store.get(&key).map_err(|e| e.to_string())?;
    if existing.is_none() {
        println!("  No saved game for '{title}'.");
        return Ok(());
    }

    store.remove(&key).map_err(|e| e.to_string())?;
    println!("  Deleted saved game for '{title}'.");
    Ok(())
}
