//! Resolution of player input to the rule that handles it.
//!
//! [`resolve`] is pure: it reads the definition and the session and decides
//! which rule wins. The engine applies the result.

use enredo_core::{GameDefinition, GameObject, Interaction};

use crate::matcher::Tokens;
use crate::session::Session;

/// Words that open the inventory.
pub const INVENTORY_VERBS: &[&str] = &["inventario", "inventário", "i", "items"];

/// Words that examine an object or redisplay the scene.
pub const LOOK_VERBS: &[&str] = &["olhar", "examinar", "l", "x", "ver", "ler"];

/// Words that pick up an object.
pub const TAKE_VERBS: &[&str] = &["pegar", "coletar", "apanhar", "levar"];

/// Words that list the built-in commands.
pub const HELP_VERBS: &[&str] = &["ajuda", "help", "comandos"];

/// The rule that handles an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A global fixed verb, by position in the definition.
    FixedVerb {
        /// Index into the fixed verbs.
        index: usize,
    },
    /// A scene interaction, by position in the current scene.
    Interaction {
        /// Index into the scene's interactions.
        index: usize,
        /// The interaction was triggered by a take word on a takable target
        /// in the scene, so the target moves into the inventory.
        takes_target: bool,
    },
    /// Open the inventory.
    Inventory,
    /// Show an object's examine text.
    Examine {
        /// The object, from the scene or the inventory.
        object_id: String,
    },
    /// Redisplay the current scene.
    Look,
    /// Move a scene object into the inventory.
    Take {
        /// The object.
        object_id: String,
    },
    /// The named object cannot be taken.
    CannotTake {
        /// The object.
        object_id: String,
    },
    /// List the built-in commands.
    Help,
    /// Nothing matched.
    Fallback,
}

/// Decide which rule handles `input`.
///
/// Fixed verbs win over scene interactions, which win over the built-in
/// commands. Within each group the first declared rule wins.
pub fn resolve(definition: &GameDefinition, session: &Session, input: &str) -> Resolution {
    let tokens = Tokens::new(input);
    if tokens.is_empty() {
        return Resolution::Fallback;
    }

    if let Some(index) = definition
        .fixed_verbs
        .iter()
        .position(|v| tokens.contains_any(&v.verbs))
    {
        return Resolution::FixedVerb { index };
    }

    if let Some(scene) = definition.scene(&session.current_scene_id) {
        for (index, interaction) in scene.interactions.iter().enumerate() {
            if let Some(takes_target) = match_interaction(interaction, session, &tokens) {
                return Resolution::Interaction {
                    index,
                    takes_target,
                };
            }
        }
    }

    let scene_id = session.current_scene_id.as_str();

    if tokens.contains_any(INVENTORY_VERBS) {
        return Resolution::Inventory;
    }

    if tokens.contains_any(LOOK_VERBS) {
        let named = session
            .live_objects
            .find_named(scene_id, &tokens)
            .or_else(|| session.inventory.find_named(&tokens));
        return match named {
            Some(object) => Resolution::Examine {
                object_id: object.id.clone(),
            },
            None => Resolution::Look,
        };
    }

    if tokens.contains_any(TAKE_VERBS) {
        let named = session.live_objects.find_named(scene_id, &tokens);
        if let Some(object) = named {
            let object_id = object.id.clone();
            return if object.takable {
                Resolution::Take { object_id }
            } else {
                Resolution::CannotTake { object_id }
            };
        }
    }

    if tokens.contains_any(HELP_VERBS) {
        return Resolution::Help;
    }

    Resolution::Fallback
}

/// Match one interaction. `Some(takes_target)` on a match.
fn match_interaction(interaction: &Interaction, session: &Session, tokens: &Tokens) -> Option<bool> {
    let matched_verbs: Vec<&String> = interaction
        .verbs
        .iter()
        .filter(|v| tokens.contains(v))
        .collect();
    if matched_verbs.is_empty() {
        return None;
    }

    let missing_item = interaction
        .required_item
        .as_ref()
        .is_some_and(|item| !session.inventory.contains(item));
    if missing_item {
        return None;
    }

    let Some(target_id) = &interaction.target else {
        return Some(false);
    };

    let scene_id = session.current_scene_id.as_str();
    let in_scene = session.live_objects.find(scene_id, target_id);
    let target: &GameObject = in_scene.or_else(|| session.inventory.get(target_id))?;
    if !tokens.contains(&target.name) {
        return None;
    }

    let by_take_verb = matched_verbs
        .iter()
        .any(|v| TAKE_VERBS.iter().any(|t| v.trim().eq_ignore_ascii_case(t)));
    if by_take_verb && target.takable {
        // Taking something already held is not this rule's job.
        return in_scene.map(|_| true);
    }

    Some(false)
}

/// Text listing the built-in commands.
pub fn help_text() -> String {
    format!(
        "Comandos: {} (inventário), {} (olhar/examinar), {} (pegar), {} (ajuda).",
        INVENTORY_VERBS.join(", "),
        LOOK_VERBS.join(", "),
        TAKE_VERBS.join(", "),
        HELP_VERBS.join(", ")
    )
}
