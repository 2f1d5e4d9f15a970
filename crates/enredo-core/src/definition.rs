//! The complete game definition and its loader.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::GameSettings;
use crate::error::{DefinitionError, DefinitionIssue, DefinitionResult};
use crate::object::GameObject;
use crate::scene::Scene;
use crate::tracker::TrackerDefinition;
use crate::verb::FixedVerb;

/// Authored, immutable description of a game.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDefinition {
    /// Configuration scalars. Settings keys may also appear at the top level.
    #[serde(default, alias = "config")]
    pub settings: GameSettings,
    /// Scene the game starts in.
    #[serde(default)]
    pub initial_scene_id: String,
    /// Scene graph, keyed by scene id.
    #[serde(default)]
    pub scenes: BTreeMap<String, Scene>,
    /// Object library, keyed by object id.
    #[serde(default)]
    pub objects: BTreeMap<String, GameObject>,
    /// Trackers in declaration order.
    #[serde(default)]
    pub trackers: Vec<TrackerDefinition>,
    /// Global verbs in declaration order.
    #[serde(default)]
    pub fixed_verbs: Vec<FixedVerb>,
}

impl GameDefinition {
    /// Create an empty definition starting at `initial_scene_id`.
    pub fn new(title: impl Into<String>, initial_scene_id: impl Into<String>) -> Self {
        Self {
            settings: GameSettings::default().with_title(title),
            initial_scene_id: initial_scene_id.into(),
            ..Self::default()
        }
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Add a scene, keyed by its id.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.insert(scene.id.clone(), scene);
        self
    }

    /// Add an object to the library, keyed by its id.
    pub fn with_object(mut self, object: GameObject) -> Self {
        self.objects.insert(object.id.clone(), object);
        self
    }

    /// Append a tracker.
    pub fn with_tracker(mut self, tracker: TrackerDefinition) -> Self {
        self.trackers.push(tracker);
        self
    }

    /// Append a fixed verb.
    pub fn with_fixed_verb(mut self, verb: FixedVerb) -> Self {
        self.fixed_verbs.push(verb);
        self
    }

    /// Look up a scene.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Look up a library object.
    pub fn object(&self, id: &str) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Look up a tracker definition.
    pub fn tracker(&self, id: &str) -> Option<&TrackerDefinition> {
        self.trackers.iter().find(|t| t.id == id)
    }

    /// Parse a JSON document and reject it if validation finds any issue.
    pub fn from_json_str(json: &str) -> DefinitionResult<Self> {
        let definition = Self::from_json_str_unchecked(json)?;
        let issues = definition.validate();
        if issues.is_empty() {
            Ok(definition)
        } else {
            Err(DefinitionError::Invalid(issues))
        }
    }

    /// Parse a JSON document without validating references.
    ///
    /// Records whose `id` is missing take it from their map key.
    pub fn from_json_str_unchecked(json: &str) -> DefinitionResult<Self> {
        let mut definition: Self = serde_json::from_str(json)?;
        definition.normalize();
        Ok(definition)
    }

    /// Read and parse a definition file, then validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> DefinitionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn normalize(&mut self) {
        for (key, scene) in &mut self.scenes {
            if scene.id.is_empty() {
                scene.id = key.clone();
            }
        }
        for (key, object) in &mut self.objects {
            if object.id.is_empty() {
                object.id = key.clone();
            }
        }
    }

    /// Collect every broken reference in the definition.
    ///
    /// An empty list means every id the runtime will look up exists.
    pub fn validate(&self) -> Vec<DefinitionIssue> {
        let mut issues = Vec::new();

        if !self.scenes.contains_key(&self.initial_scene_id) {
            issues.push(DefinitionIssue::MissingInitialScene(
                self.initial_scene_id.clone(),
            ));
        }

        for (key, object) in &self.objects {
            if key != &object.id {
                issues.push(DefinitionIssue::ObjectKeyMismatch {
                    key: key.clone(),
                    id: object.id.clone(),
                });
            }
        }

        let mut seen = BTreeSet::new();
        for tracker in &self.trackers {
            if !seen.insert(tracker.id.as_str()) {
                issues.push(DefinitionIssue::DuplicateTracker(tracker.id.clone()));
            }
            let missing = tracker
                .consequence_scene_id
                .as_ref()
                .filter(|scene| !self.scenes.contains_key(*scene));
            if let Some(scene) = missing {
                issues.push(DefinitionIssue::UnknownConsequenceScene {
                    tracker: tracker.id.clone(),
                    scene: scene.clone(),
                });
            }
        }

        for (key, scene) in &self.scenes {
            if key != &scene.id {
                issues.push(DefinitionIssue::SceneKeyMismatch {
                    key: key.clone(),
                    id: scene.id.clone(),
                });
            }
            self.validate_scene(key, scene, &mut issues);
        }

        issues
    }

    fn validate_scene(&self, key: &str, scene: &Scene, issues: &mut Vec<DefinitionIssue>) {
        for object in &scene.objects {
            if !self.objects.contains_key(object) {
                issues.push(DefinitionIssue::UnknownSceneObject {
                    scene: key.to_string(),
                    object: object.clone(),
                });
            }
        }

        for (index, interaction) in scene.interactions.iter().enumerate() {
            if interaction.verbs.iter().all(|v| v.trim().is_empty()) {
                issues.push(DefinitionIssue::InteractionWithoutVerbs {
                    scene: key.to_string(),
                    index,
                });
            }
            let unknown_object =
                |id: &Option<String>| id.as_ref().filter(|id| !self.objects.contains_key(*id)).cloned();
            if let Some(object) = unknown_object(&interaction.target) {
                issues.push(DefinitionIssue::UnknownTarget {
                    scene: key.to_string(),
                    index,
                    object,
                });
            }
            if let Some(object) = unknown_object(&interaction.required_item) {
                issues.push(DefinitionIssue::UnknownRequiredItem {
                    scene: key.to_string(),
                    index,
                    object,
                });
            }
            let destination = interaction
                .go_to_scene
                .as_deref()
                .filter(|s| !s.is_empty() && !self.scenes.contains_key(*s));
            if let Some(destination) = destination {
                issues.push(DefinitionIssue::UnknownDestination {
                    scene: key.to_string(),
                    index,
                    destination: destination.to_string(),
                });
            }
            for effect in &interaction.tracker_effects {
                if self.tracker(&effect.tracker_id).is_none() {
                    issues.push(DefinitionIssue::UnknownTracker {
                        scene: key.to_string(),
                        index,
                        tracker: effect.tracker_id.clone(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Interaction;
    use std::io::Write;

    fn sample() -> GameDefinition {
        GameDefinition::new("Teste", "scn_a")
            .with_object(GameObject::new("obj_chave", "chave").takable())
            .with_scene(
                Scene::new("scn_a", "Sala")
                    .with_object("obj_chave")
                    .with_interaction(Interaction::new(["abrir"]).with_go_to("scn_b")),
            )
            .with_scene(Scene::new("scn_b", "Corredor").ending())
            .with_tracker(TrackerDefinition::new("sanity", "Sanidade", 90, 100).with_consequence("scn_b"))
    }

    #[test]
    fn valid_definition_has_no_issues() {
        assert!(sample().validate().is_empty());
    }

    #[test]
    fn reports_missing_initial_scene() {
        let mut def = sample();
        def.initial_scene_id = "scn_x".to_string();
        assert_eq!(
            def.validate(),
            vec![DefinitionIssue::MissingInitialScene("scn_x".to_string())]
        );
    }

    #[test]
    fn reports_broken_interaction_references() {
        let def = sample().with_scene(
            Scene::new("scn_c", "Porão").with_interaction(
                Interaction::new(["usar"])
                    .with_target("obj_nada")
                    .with_required_item("obj_vazio")
                    .with_go_to("scn_z")
                    .with_tracker_effect("medo", 1),
            ),
        );
        let issues = def.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&DefinitionIssue::UnknownDestination {
            scene: "scn_c".to_string(),
            index: 0,
            destination: "scn_z".to_string(),
        }));
        assert!(issues.contains(&DefinitionIssue::UnknownTracker {
            scene: "scn_c".to_string(),
            index: 0,
            tracker: "medo".to_string(),
        }));
    }

    #[test]
    fn reports_tracker_problems() {
        let def = sample()
            .with_tracker(TrackerDefinition::new("sanity", "Outra", 0, 10))
            .with_tracker(TrackerDefinition::new("medo", "Medo", 0, 10).with_consequence("scn_q"));
        let issues = def.validate();
        assert!(issues.contains(&DefinitionIssue::DuplicateTracker("sanity".to_string())));
        assert!(issues.contains(&DefinitionIssue::UnknownConsequenceScene {
            tracker: "medo".to_string(),
            scene: "scn_q".to_string(),
        }));
    }

    #[test]
    fn interaction_without_verbs() {
        let def = sample().with_scene(
            Scene::new("scn_c", "Porão").with_interaction(Interaction::new(["  "])),
        );
        assert_eq!(
            def.validate(),
            vec![DefinitionIssue::InteractionWithoutVerbs {
                scene: "scn_c".to_string(),
                index: 0,
            }]
        );
    }

    #[test]
    fn parse_fills_ids_from_keys() {
        let json = r#"{
            "initialSceneId": "scn_a",
            "scenes": {"scn_a": {"name": "Sala", "objects": ["obj_vela"]}},
            "objects": {"obj_vela": {"name": "vela"}}
        }"#;
        let def = GameDefinition::from_json_str(json).unwrap();
        assert_eq!(def.scene("scn_a").unwrap().id, "scn_a");
        assert_eq!(def.object("obj_vela").unwrap().id, "obj_vela");
        assert_eq!(def.settings.max_chances, 3);
    }

    #[test]
    fn parse_rejects_invalid_definition() {
        let json = r#"{"initialSceneId": "scn_x", "scenes": {}}"#;
        match GameDefinition::from_json_str(json) {
            Err(DefinitionError::Invalid(issues)) => assert_eq!(issues.len(), 1),
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(GameDefinition::from_json_str_unchecked(json).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            GameDefinition::from_json_str("{not json"),
            Err(DefinitionError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"settings": {{"title": "Arquivo"}}, "initialSceneId": "s", "scenes": {{"s": {{"name": "S"}}}}}}"#
        )
        .unwrap();
        let def = GameDefinition::from_json_file(file.path()).unwrap();
        assert_eq!(def.settings.title, "Arquivo");

        assert!(matches!(
            GameDefinition::from_json_file("/nonexistent/game.json"),
            Err(DefinitionError::Io(_))
        ));
    }
}
