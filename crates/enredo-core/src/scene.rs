//! Scenes, interactions, and their outcomes.

use serde::{Deserialize, Serialize};

/// A node in the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Authored description. May contain markup tags.
    #[serde(default)]
    pub description: String,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Interactions in declaration order. Earlier entries win ties.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Ids of the library objects initially present.
    #[serde(default)]
    pub objects: Vec<String>,
    /// Entering this scene ends the game with a victory.
    #[serde(default)]
    pub is_ending_scene: bool,
    /// Entering this scene costs one chance.
    #[serde(default)]
    pub removes_chance_on_entry: bool,
    /// Entering this scene gives back one chance.
    #[serde(default)]
    pub restores_chance_on_entry: bool,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image: None,
            interactions: Vec::new(),
            objects: Vec::new(),
            is_ending_scene: false,
            removes_chance_on_entry: false,
            restores_chance_on_entry: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Place a library object in the scene.
    pub fn with_object(mut self, object_id: impl Into<String>) -> Self {
        self.objects.push(object_id.into());
        self
    }

    /// Append an interaction.
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    /// Mark the scene as an ending.
    pub fn ending(mut self) -> Self {
        self.is_ending_scene = true;
        self
    }

    /// Entering the scene costs a chance.
    pub fn removing_chance(mut self) -> Self {
        self.removes_chance_on_entry = true;
        self
    }

    /// Entering the scene restores a chance.
    pub fn restoring_chance(mut self) -> Self {
        self.restores_chance_on_entry = true;
        self
    }
}

/// A change applied to a tracker by an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerEffect {
    /// Tracker to change.
    pub tracker_id: String,
    /// Signed amount to add.
    #[serde(alias = "delta")]
    pub value_change: i64,
}

impl TrackerEffect {
    /// Create a tracker effect.
    pub fn new(tracker_id: impl Into<String>, value_change: i64) -> Self {
        Self {
            tracker_id: tracker_id.into(),
            value_change,
        }
    }
}

/// Visual transition played around a scene change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TransitionKind {
    /// Fade through black. Unknown kinds fall back to this.
    #[default]
    Fade,
    /// Cross-dissolve.
    Dissolve,
    /// Slide the new scene in.
    Slide,
    /// Brief white flash.
    Flash,
    /// Swap content immediately.
    #[serde(rename = "none")]
    Cut,
}

impl From<String> for TransitionKind {
    fn from(name: String) -> Self {
        match name.to_lowercase().as_str() {
            "dissolve" => Self::Dissolve,
            "slide" => Self::Slide,
            "flash" => Self::Flash,
            "none" | "cut" => Self::Cut,
            _ => Self::Fade,
        }
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fade => write!(f, "fade"),
            Self::Dissolve => write!(f, "dissolve"),
            Self::Slide => write!(f, "slide"),
            Self::Flash => write!(f, "flash"),
            Self::Cut => write!(f, "none"),
        }
    }
}

/// What an interaction does to the scene once its effects are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Transition to another scene.
    GoToScene(&'a str),
    /// Replace the current scene's runtime description.
    Describe(&'a str),
    /// Leave the scene as it is.
    Nothing,
}

/// An authored rule that reacts to player input inside a scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Verbs that trigger the rule. Any one is enough.
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Object whose name must also appear in the input.
    #[serde(default)]
    pub target: Option<String>,
    /// Object that must be in the inventory.
    #[serde(default, alias = "requiresInventory")]
    pub required_item: Option<String>,
    /// Remove the required item from the inventory.
    #[serde(default)]
    pub consumes_item: bool,
    /// Remove the target from the scene's live objects.
    #[serde(default)]
    pub removes_target_from_scene: bool,
    /// Tracker changes, applied in order.
    #[serde(default)]
    pub tracker_effects: Vec<TrackerEffect>,
    /// Destination scene.
    #[serde(default)]
    pub go_to_scene: Option<String>,
    /// Replacement description for the current scene.
    #[serde(default)]
    pub new_scene_description: Option<String>,
    /// Message appended to the scrollback.
    #[serde(default)]
    pub success_message: Option<String>,
    /// Sound played when the rule fires.
    #[serde(default)]
    pub sound_effect: Option<String>,
    /// Visual transition used with `go_to_scene`.
    #[serde(default)]
    pub transition: Option<TransitionKind>,
}

impl Interaction {
    /// Create an interaction triggered by the given verbs.
    pub fn new<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verbs: verbs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Require a target object.
    pub fn with_target(mut self, object_id: impl Into<String>) -> Self {
        self.target = Some(object_id.into());
        self
    }

    /// Require an inventory item.
    pub fn with_required_item(mut self, object_id: impl Into<String>) -> Self {
        self.required_item = Some(object_id.into());
        self
    }

    /// Consume the required item.
    pub fn consuming_item(mut self) -> Self {
        self.consumes_item = true;
        self
    }

    /// Remove the target from the scene.
    pub fn removing_target(mut self) -> Self {
        self.removes_target_from_scene = true;
        self
    }

    /// Add a tracker effect.
    pub fn with_tracker_effect(mut self, tracker_id: impl Into<String>, value_change: i64) -> Self {
        self.tracker_effects
            .push(TrackerEffect::new(tracker_id, value_change));
        self
    }

    /// Go to another scene.
    pub fn with_go_to(mut self, scene_id: impl Into<String>) -> Self {
        self.go_to_scene = Some(scene_id.into());
        self
    }

    /// Replace the scene description.
    pub fn with_new_description(mut self, text: impl Into<String>) -> Self {
        self.new_scene_description = Some(text.into());
        self
    }

    /// Set the success message.
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.success_message = Some(text.into());
        self
    }

    /// Set the sound effect.
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound_effect = Some(sound.into());
        self
    }

    /// Set the visual transition.
    pub fn with_transition(mut self, kind: TransitionKind) -> Self {
        self.transition = Some(kind);
        self
    }

    /// The effective outcome. `go_to_scene` wins when both fields are set.
    pub fn outcome(&self) -> Outcome<'_> {
        if let Some(scene) = self.go_to_scene.as_deref().filter(|s| !s.is_empty()) {
            Outcome::GoToScene(scene)
        } else if let Some(text) = self.new_scene_description.as_deref() {
            Outcome::Describe(text)
        } else {
            Outcome::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_prefers_go_to_scene() {
        let both = Interaction::new(["abrir"])
            .with_go_to("scn_b")
            .with_new_description("A porta está aberta.");
        assert_eq!(both.outcome(), Outcome::GoToScene("scn_b"));

        let describe = Interaction::new(["abrir"]).with_new_description("Aberta.");
        assert_eq!(describe.outcome(), Outcome::Describe("Aberta."));

        assert_eq!(Interaction::new(["abrir"]).outcome(), Outcome::Nothing);
    }

    #[test]
    fn empty_destination_is_ignored() {
        let interaction = Interaction::new(["abrir"]).with_go_to("");
        assert_eq!(interaction.outcome(), Outcome::Nothing);
    }

    #[test]
    fn deserialize_interaction() {
        let json = r#"{
            "verbs": ["usar", "abrir"],
            "target": "obj_porta",
            "requiredItem": "obj_chave",
            "consumesItem": true,
            "trackerEffects": [{"trackerId": "sanity", "valueChange": -5}],
            "goToScene": "scn_corredor",
            "transition": "dissolve"
        }"#;
        let interaction: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(interaction.verbs, vec!["usar", "abrir"]);
        assert!(interaction.consumes_item);
        assert!(!interaction.removes_target_from_scene);
        assert_eq!(interaction.tracker_effects[0].value_change, -5);
        assert_eq!(interaction.transition, Some(TransitionKind::Dissolve));
    }

    #[test]
    fn tracker_effect_accepts_delta_alias() {
        let effect: TrackerEffect =
            serde_json::from_str(r#"{"trackerId": "medo", "delta": 3}"#).unwrap();
        assert_eq!(effect, TrackerEffect::new("medo", 3));
    }

    #[test]
    fn unknown_transition_falls_back_to_fade() {
        let kind: TransitionKind = serde_json::from_str(r#""spiral""#).unwrap();
        assert_eq!(kind, TransitionKind::Fade);
        let kind: TransitionKind = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(kind, TransitionKind::Cut);
    }

    #[test]
    fn scene_flags_default_to_false() {
        let scene: Scene = serde_json::from_str(r#"{"id": "scn_a", "name": "Sala"}"#).unwrap();
        assert!(!scene.is_ending_scene);
        assert!(!scene.removes_chance_on_entry);
        assert!(!scene.restores_chance_on_entry);
        assert!(scene.interactions.is_empty());
    }
}
