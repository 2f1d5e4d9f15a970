//! Error types for game definitions.

use thiserror::Error;

/// Result type for definition operations.
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Errors that can occur while loading a game definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The definition file could not be read.
    #[error("failed to read game definition: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed game definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but references ids that do not exist.
    #[error("invalid game definition ({} issue(s)): {}", .0.len(), summarize(.0))]
    Invalid(Vec<DefinitionIssue>),
}

fn summarize(issues: &[DefinitionIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single problem found by [`crate::GameDefinition::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionIssue {
    /// The initial scene id does not name a scene.
    #[error("initial scene \"{0}\" does not exist")]
    MissingInitialScene(String),

    /// A scene is stored under a key different from its own id.
    #[error("scene stored under \"{key}\" declares id \"{id}\"")]
    SceneKeyMismatch {
        /// Map key.
        key: String,
        /// Id declared by the scene.
        id: String,
    },

    /// An object is stored under a key different from its own id.
    #[error("object stored under \"{key}\" declares id \"{id}\"")]
    ObjectKeyMismatch {
        /// Map key.
        key: String,
        /// Id declared by the object.
        id: String,
    },

    /// A scene places an object that is not in the library.
    #[error("scene \"{scene}\" contains unknown object \"{object}\"")]
    UnknownSceneObject {
        /// Scene id.
        scene: String,
        /// Missing object id.
        object: String,
    },

    /// An interaction targets an object that is not in the library.
    #[error("scene \"{scene}\" interaction #{index} targets unknown object \"{object}\"")]
    UnknownTarget {
        /// Scene id.
        scene: String,
        /// Interaction position within the scene.
        index: usize,
        /// Missing object id.
        object: String,
    },

    /// An interaction requires an object that is not in the library.
    #[error("scene \"{scene}\" interaction #{index} requires unknown object \"{object}\"")]
    UnknownRequiredItem {
        /// Scene id.
        scene: String,
        /// Interaction position within the scene.
        index: usize,
        /// Missing object id.
        object: String,
    },

    /// An interaction leads to a scene that does not exist.
    #[error("scene \"{scene}\" interaction #{index} goes to unknown scene \"{destination}\"")]
    UnknownDestination {
        /// Scene id.
        scene: String,
        /// Interaction position within the scene.
        index: usize,
        /// Missing scene id.
        destination: String,
    },

    /// An interaction changes a tracker that is not defined.
    #[error("scene \"{scene}\" interaction #{index} changes unknown tracker \"{tracker}\"")]
    UnknownTracker {
        /// Scene id.
        scene: String,
        /// Interaction position within the scene.
        index: usize,
        /// Missing tracker id.
        tracker: String,
    },

    /// An interaction declares no verbs and can never match.
    #[error("scene \"{scene}\" interaction #{index} has no verbs")]
    InteractionWithoutVerbs {
        /// Scene id.
        scene: String,
        /// Interaction position within the scene.
        index: usize,
    },

    /// A tracker's consequence scene does not exist.
    #[error("tracker \"{tracker}\" has unknown consequence scene \"{scene}\"")]
    UnknownConsequenceScene {
        /// Tracker id.
        tracker: String,
        /// Missing scene id.
        scene: String,
    },

    /// Two trackers share an id.
    #[error("tracker id \"{0}\" is declared more than once")]
    DuplicateTracker(String),
}
