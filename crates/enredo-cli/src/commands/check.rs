use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use enredo_core::{DefinitionError, GameDefinition};

pub fn run(game: &Path) -> Result<(), String> {
    let definition = match GameDefinition::from_json_file(game) {
        Ok(definition) => definition,
        Err(DefinitionError::Invalid(issues)) => {
            for issue in &issues {
                eprintln!("  {} {issue}", "✗".red());
            }
            return Err(format!(
                "{} issue{} in {}",
                issues.len(),
                if issues.len() == 1 { "" } else { "s" },
                game.display()
            ));
        }
        Err(e) => return Err(format!("{}: {e}", game.display())),
    };

    let endings = definition
        .scenes
        .values()
        .filter(|s| s.is_ending_scene)
        .count();
    let interactions: usize = definition
        .scenes
        .values()
        .map(|s| s.interactions.len())
        .sum();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", definition.settings.title.as_str()]);
    table.add_row(vec!["Initial scene".to_string(), definition.initial_scene_id.clone()]);
    table.add_row(vec!["Scenes".to_string(), definition.scenes.len().to_string()]);
    table.add_row(vec!["Ending scenes".to_string(), endings.to_string()]);
    table.add_row(vec!["Interactions".to_string(), interactions.to_string()]);
    table.add_row(vec!["Objects".to_string(), definition.objects.len().to_string()]);
    table.add_row(vec!["Trackers".to_string(), definition.trackers.len().to_string()]);
    table.add_row(vec!["Fixed verbs".to_string(), definition.fixed_verbs.len().to_string()]);
    let chances = if definition.settings.chances_enabled {
        definition.settings.max_chances.to_string()
    } else {
        "off".to_string()
    };
    table.add_row(vec!["Chances".to_string(), chances]);

    println!("{table}");
    println!();
    println!("  All checks passed for '{}'.", definition.settings.title);

    Ok(())
}
