pub mod check;
pub mod play;
pub mod reset;

use std::path::Path;

use enredo_core::GameDefinition;

/// Load a definition for play, reporting validation issues as warnings.
///
/// The runtime guards every lookup, so a game with broken references can
/// still be played up to the point where it breaks.
fn load_game(path: &Path) -> Result<GameDefinition, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let definition = GameDefinition::from_json_str_unchecked(&content)
        .map_err(|e| format!("{}: {e}", path.display()))?;

    let issues = definition.validate();
    for issue in &issues {
        tracing::warn!("{}: {}", path.display(), issue);
    }
    if !issues.is_empty() {
        eprintln!(
            "  warning: {} problem{} found, run `enredo check` for details",
            issues.len(),
            if issues.len() == 1 { "" } else { "s" },
        );
    }

    Ok(definition)
}
