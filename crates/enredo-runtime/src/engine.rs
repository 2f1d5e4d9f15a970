//! The scene state machine.

use std::time::Duration;

use enredo_core::{GameDefinition, Interaction, Outcome, TransitionKind};

use crate::chances::ChanceLoss;
use crate::config::EngineConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::{Resolution, help_text, resolve};
use crate::persistence::{KeyValueStore, MemoryStore, Persistence, save_key};
use crate::presentation::{
    ItemView, Output, Response, SceneView, StatusView, render, status_view, strip_tags,
};
use crate::scheduler::{ScheduledAction, ScheduledEvent, Scheduler};
use crate::session::{Ending, Session};

/// Runs one game: owns the session and applies player input to it.
///
/// ```
/// use enredo_core::{GameDefinition, GameObject, Scene};
/// use enredo_runtime::Engine;
///
/// let definition = GameDefinition::new("Exemplo", "sala")
///     .with_object(GameObject::new("vela", "vela").takable())
///     .with_scene(Scene::new("sala", "Sala").with_object("vela"));
///
/// let mut engine = Engine::in_memory(definition).unwrap();
/// engine.start();
/// let response = engine.process("pegar a vela");
/// assert_eq!(response.texts(), ["Você pegou vela."]);
/// assert!(engine.session().inventory.contains("vela"));
/// ```
pub struct Engine {
    definition: GameDefinition,
    session: Session,
    scheduler: Scheduler,
    persistence: Persistence,
    config: EngineConfig,
    restored: bool,
}

impl Engine {
    /// Create an engine, restoring a saved session from `store` if there is
    /// a usable one.
    ///
    /// Fails only if the initial scene does not exist.
    pub fn new(
        definition: GameDefinition,
        store: Box<dyn KeyValueStore>,
        config: EngineConfig,
    ) -> RuntimeResult<Self> {
        if definition.scene(&definition.initial_scene_id).is_none() {
            return Err(RuntimeError::SceneNotFound(
                definition.initial_scene_id.clone(),
            ));
        }

        let key = save_key(&config.key_prefix, &definition.settings.title);
        let mut persistence = Persistence::new(store, key);
        if config.preview {
            persistence = persistence.read_only();
        }

        let (session, restored) = match persistence.restore(&definition) {
            Some(session) => (session, true),
            None => (Session::new(&definition), false),
        };

        Ok(Self {
            definition,
            session,
            scheduler: Scheduler::new(),
            persistence,
            config,
            restored,
        })
    }

    /// Create an engine backed by a fresh in-memory store.
    pub fn in_memory(definition: GameDefinition) -> RuntimeResult<Self> {
        Self::new(
            definition,
            Box::new(MemoryStore::new()),
            EngineConfig::default(),
        )
    }

    /// The game being played.
    pub fn definition(&self) -> &GameDefinition {
        &self.definition
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Pending delayed effects.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The save key.
    pub fn save_key(&self) -> &str {
        self.persistence.key()
    }

    /// Whether the session was restored from a save.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Whether the game has ended.
    pub fn is_ended(&self) -> bool {
        self.session.is_ended()
    }

    /// Begin play.
    ///
    /// A fresh session enters the initial scene. A restored session shows
    /// its current scene again without re-applying entry effects.
    pub fn start(&mut self) -> Response {
        let mut response = Response::new();
        if !self.restored {
            let initial = self.definition.initial_scene_id.clone();
            self.load_scene(&initial, None, &mut response);
            return response;
        }

        tracing::debug!("Resuming session at {}", self.session.current_scene_id);
        if let Some(view) = self.current_view() {
            response.push(Output::Scene(view));
        }
        response.push(Output::Status(self.status()));
        match self.session.ending {
            Some(Ending::Victory) => response.push(Output::Victory),
            Some(Ending::GameOver) => response.push(Output::GameOver),
            None => {
                let on_ending_scene = self
                    .definition
                    .scene(&self.session.current_scene_id)
                    .is_some_and(|s| s.is_ending_scene);
                if on_ending_scene {
                    self.scheduler
                        .schedule(self.config.victory_delay, ScheduledAction::Victory);
                }
            }
        }
        response
    }

    /// Delete the save and start over with a new session.
    pub fn restart(&mut self) -> Response {
        tracing::debug!("Restarting {}", self.definition.settings.title);
        self.persistence.clear();
        self.scheduler.clear();
        self.session = Session::new(&self.definition);
        self.restored = false;
        self.start()
    }

    /// Handle one line of player input.
    ///
    /// Blank input, input after the game ended, and input while a victory or
    /// forced transition is pending are ignored.
    pub fn process(&mut self, input: &str) -> Response {
        let input = input.trim();
        let mut response = Response::new();
        if input.is_empty() {
            return response;
        }
        if self.session.is_ended() {
            tracing::debug!("Ignoring input after the game ended");
            return response;
        }
        if self.scheduler.is_blocking() {
            tracing::debug!("Ignoring input while a transition is pending");
            return response;
        }

        self.session.action_log.input(input);
        let resolution = resolve(&self.definition, &self.session, input);
        tracing::debug!("Resolved {:?} to {:?}", input, resolution);

        match resolution {
            Resolution::FixedVerb { index } => {
                let text = self
                    .definition
                    .fixed_verbs
                    .get(index)
                    .map(|v| v.description.clone())
                    .unwrap_or_default();
                self.say(text, &mut response);
            }
            Resolution::Interaction {
                index,
                takes_target,
            } => self.execute(index, takes_target, &mut response),
            Resolution::Inventory => {
                let items: Vec<ItemView> = self.session.inventory.iter().map(ItemView::from).collect();
                let text = if items.is_empty() {
                    "Você não está carregando nada.".to_string()
                } else {
                    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
                    format!("Você está carregando: {}.", names.join(", "))
                };
                self.session.action_log.output(text);
                response.push(Output::Inventory(items));
            }
            Resolution::Examine { object_id } => {
                let scene_id = self.session.current_scene_id.as_str();
                let object = self
                    .session
                    .live_objects
                    .find(scene_id, &object_id)
                    .or_else(|| self.session.inventory.get(&object_id));
                let text = match object {
                    Some(o) if !o.examine.trim().is_empty() => strip_tags(&o.examine),
                    Some(o) => format!("Você não vê nada de especial em {}.", o.name),
                    None => self.failure_message(),
                };
                self.say(text, &mut response);
            }
            Resolution::Look => {
                let text = self
                    .definition
                    .scene(&self.session.current_scene_id)
                    .map(|s| strip_tags(self.session.description(s)))
                    .unwrap_or_default();
                self.say(text, &mut response);
            }
            Resolution::Take { object_id } => {
                let scene_id = self.session.current_scene_id.clone();
                let name = self
                    .session
                    .live_objects
                    .find(&scene_id, &object_id)
                    .map(|o| o.name.clone());
                let text = match name {
                    Some(name) if self.session.take(&scene_id, &object_id) => {
                        tracing::debug!("Took {} from {}", object_id, scene_id);
                        format!("Você pegou {name}.")
                    }
                    _ => self.failure_message(),
                };
                self.say(text, &mut response);
            }
            Resolution::CannotTake { object_id } => {
                let name = self
                    .definition
                    .object(&object_id)
                    .map_or(object_id.as_str(), |o| o.name.as_str());
                let text = format!("Você não pode pegar {name}.");
                self.say(text, &mut response);
            }
            Resolution::Help => self.say(help_text(), &mut response),
            Resolution::Fallback => {
                let text = self.failure_message();
                self.say(text, &mut response);
            }
        }

        self.persistence.save(&self.session);
        response
    }

    /// Move the virtual clock forward and fire every event that comes due.
    pub fn advance(&mut self, elapsed: Duration) -> Response {
        let until = self.scheduler.now() + elapsed;
        let mut response = Response::new();
        while let Some(event) = self.scheduler.pop_due(until) {
            self.fire(event, &mut response);
        }
        self.scheduler.advance_to(until);
        response
    }

    /// Fire every pending event, including ones scheduled while firing.
    pub fn settle(&mut self) -> Response {
        let mut response = Response::new();
        while let Some(event) = self
            .scheduler
            .next_fire_at()
            .and_then(|at| self.scheduler.pop_due(at))
        {
            self.fire(event, &mut response);
        }
        response
    }

    /// Time until the next pending event fires.
    pub fn time_until_next_event(&self) -> Option<Duration> {
        self.scheduler
            .next_fire_at()
            .map(|at| at.saturating_sub(self.scheduler.now()))
    }

    /// The current scene as it looks now.
    pub fn current_view(&self) -> Option<SceneView> {
        let scene = self.definition.scene(&self.session.current_scene_id)?;
        Some(render(
            scene,
            self.session.description(scene),
            self.session.current_objects(),
        ))
    }

    /// The status panel.
    pub fn status(&self) -> StatusView {
        status_view(&self.definition, &self.session)
    }

    /// The diary as plain text.
    pub fn diary(&self) -> String {
        self.session.action_log.export_text()
    }

    fn failure_message(&self) -> String {
        self.definition.settings.default_failure_message.clone()
    }

    fn say(&mut self, text: String, response: &mut Response) {
        self.session.action_log.output(text.clone());
        response.push(Output::Text(text));
    }

    fn fire(&mut self, event: ScheduledEvent, response: &mut Response) {
        match event.action {
            ScheduledAction::Victory => self.victory(response),
            ScheduledAction::ForcedTransition { scene_id } => {
                if self.session.is_ended() {
                    tracing::debug!("Dropping forced transition to {} after the game ended", scene_id);
                    return;
                }
                tracing::debug!("Forced transition to {}", scene_id);
                self.load_scene(&scene_id, None, response);
            }
            ScheduledAction::RevealScene { scene_id } => {
                let view = self
                    .current_view()
                    .filter(|view| view.scene_id == scene_id);
                if let Some(view) = view {
                    response.push(Output::Scene(view));
                }
            }
            ScheduledAction::HideTransition => response.push(Output::TransitionEnd),
        }
    }

    fn check_preconditions(&self, interaction: &Interaction) -> RuntimeResult<()> {
        let unknown_tracker = interaction
            .tracker_effects
            .iter()
            .find(|e| self.definition.tracker(&e.tracker_id).is_none());
        if let Some(effect) = unknown_tracker {
            return Err(RuntimeError::TrackerNotFound(effect.tracker_id.clone()));
        }
        match interaction.outcome() {
            Outcome::GoToScene(id) if self.definition.scene(id).is_none() => {
                Err(RuntimeError::SceneNotFound(id.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn execute(&mut self, index: usize, takes_target: bool, response: &mut Response) {
        let scene_id = self.session.current_scene_id.clone();
        let Some(interaction) = self
            .definition
            .scene(&scene_id)
            .and_then(|s| s.interactions.get(index))
            .cloned()
        else {
            let text = self.failure_message();
            self.say(text, response);
            return;
        };

        if let Err(e) = self.check_preconditions(&interaction) {
            tracing::error!("Interaction {} in scene {} aborted: {}", index, scene_id, e);
            let text = self.failure_message();
            self.say(text, response);
            return;
        }

        let mut taken = None;
        if let Some(target) = interaction.target.as_deref().filter(|_| takes_target) {
            let name = self
                .session
                .live_objects
                .find(&scene_id, target)
                .map(|o| o.name.clone());
            if self.session.take(&scene_id, target) {
                taken = name;
            }
        }

        let consumed = interaction
            .required_item
            .as_deref()
            .filter(|_| interaction.consumes_item);
        if let Some(item) = consumed {
            let held = self.session.inventory.remove(item).is_some();
            tracing::debug!("Consumed {} (held: {})", item, held);
        }

        if !interaction.tracker_effects.is_empty() {
            for effect in &interaction.tracker_effects {
                let value = self
                    .session
                    .trackers
                    .apply(&effect.tracker_id, effect.value_change);
                tracing::debug!("Tracker {} is now {}", effect.tracker_id, value);
            }
            self.check_trackers();
            response.push(Output::Status(self.status()));
        }

        let removed = interaction
            .target
            .as_deref()
            .filter(|_| interaction.removes_target_from_scene);
        if let Some(target) = removed {
            self.session.live_objects.remove(&scene_id, target);
        }

        if let Some(sound) = &interaction.sound_effect {
            response.push(Output::Sound(sound.clone()));
        }

        let message = interaction
            .success_message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| taken.map(|name| format!("Você pegou {name}.")));

        match interaction.outcome() {
            Outcome::GoToScene(destination) => {
                if let Some(text) = message {
                    self.say(text, response);
                }
                let transition = interaction.transition.unwrap_or_default();
                self.load_scene(destination, Some(transition), response);
            }
            Outcome::Describe(text) => {
                self.session
                    .description_overrides
                    .insert(scene_id, text.to_string());
                if let Some(view) = self.current_view() {
                    response.push(Output::Scene(view));
                }
                if let Some(text) = message {
                    self.say(text, response);
                }
            }
            Outcome::Nothing => {
                if let Some(text) = message {
                    self.say(text, response);
                }
            }
        }
    }

    fn check_trackers(&mut self) {
        let Some(tracker) = self.session.trackers.breached(&self.definition.trackers) else {
            return;
        };
        let Some(scene_id) = tracker.consequence_scene_id.as_deref() else {
            return;
        };
        if self.definition.scene(scene_id).is_none() {
            tracing::error!("Tracker {} has unknown consequence scene {}", tracker.id, scene_id);
            return;
        }
        tracing::debug!("Tracker {} reached {}; forcing {}", tracker.id, tracker.max_value, scene_id);
        self.scheduler
            .schedule_forced(self.config.forced_transition_delay, scene_id);
    }

    fn load_scene(&mut self, scene_id: &str, transition: Option<TransitionKind>, response: &mut Response) {
        if self.session.is_ended() {
            tracing::debug!("Not loading {} after the game ended", scene_id);
            return;
        }
        let Some(scene) = self.definition.scene(scene_id) else {
            tracing::error!("Cannot load unknown scene {}", scene_id);
            return;
        };

        if scene.removes_chance_on_entry {
            match self.session.chances.lose() {
                ChanceLoss::Depleted => {
                    self.game_over(response);
                    return;
                }
                ChanceLoss::Remaining(left) => tracing::debug!("Lost a chance, {} left", left),
            }
        }
        if scene.restores_chance_on_entry && self.definition.settings.chances_enabled {
            let now = self.session.chances.restore();
            tracing::debug!("Restored a chance, {} left", now);
        }

        self.session.current_scene_id = scene.id.clone();
        self.session.visited_scenes.insert(scene.id.clone());
        self.session
            .live_objects
            .materialize(scene, &self.definition.objects);

        let description = strip_tags(self.session.description(scene));
        self.session
            .action_log
            .scene_load(&scene.id, &scene.name, scene.image.clone(), description);
        tracing::debug!("Entered scene {}", scene.id);

        let timing = self.config.transition;
        match transition {
            Some(kind) if kind != TransitionKind::Cut && !timing.total.is_zero() => {
                response.push(Output::TransitionStart(kind));
                self.scheduler.schedule(
                    timing.swap_at,
                    ScheduledAction::RevealScene {
                        scene_id: scene.id.clone(),
                    },
                );
                self.scheduler
                    .schedule(timing.total, ScheduledAction::HideTransition);
            }
            _ => {
                if let Some(view) = self.current_view() {
                    response.push(Output::Scene(view));
                }
            }
        }
        response.push(Output::Status(self.status()));

        if scene.is_ending_scene {
            self.scheduler
                .schedule(self.config.victory_delay, ScheduledAction::Victory);
        }

        self.persistence.save(&self.session);
    }

    fn game_over(&mut self, response: &mut Response) {
        tracing::debug!("Game over in {}", self.session.current_scene_id);
        self.session.ending = Some(Ending::GameOver);
        self.scheduler.clear();
        response.push(Output::Status(self.status()));
        response.push(Output::GameOver);
        self.persistence.save(&self.session);
    }

    fn victory(&mut self, response: &mut Response) {
        if self.session.is_ended() {
            return;
        }
        let on_ending_scene = self
            .definition
            .scene(&self.session.current_scene_id)
            .is_some_and(|s| s.is_ending_scene);
        if !on_ending_scene {
            tracing::debug!("Dropping victory outside an ending scene");
            return;
        }
        tracing::debug!("Victory in {}", self.session.current_scene_id);
        self.session.ending = Some(Ending::Victory);
        self.scheduler.cancel_forced();
        response.push(Output::Victory);
        self.persistence.save(&self.session);
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("title", &self.definition.settings.title)
            .field("session", &self.session)
            .field("scheduler", &self.scheduler)
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}
