//! Game definition model for Enredo.
//!
//! A [`GameDefinition`] is the authored, immutable description of an
//! interactive fiction game: the scene graph, the object library, the
//! trackers, the fixed verbs and a handful of configuration scalars. The
//! authoring editor produces it as JSON; the runtime only ever reads it.
//!
//! Every optional field has a default so that partial documents load, and
//! [`GameDefinition::validate`] reports references to ids that do not exist.

/// Authored configuration scalars.
pub mod config;
/// The complete game definition and its loader.
pub mod definition;
/// Error types for loading and validation.
pub mod error;
/// Objects in the library.
pub mod object;
/// Scenes, interactions, and outcomes.
pub mod scene;
/// Tracker definitions.
pub mod tracker;
/// Global fixed verbs.
pub mod verb;

pub use config::GameSettings;
pub use definition::GameDefinition;
pub use error::{DefinitionError, DefinitionIssue, DefinitionResult};
pub use object::GameObject;
pub use scene::{Interaction, Outcome, Scene, TrackerEffect, TransitionKind};
pub use tracker::TrackerDefinition;
pub use verb::FixedVerb;
