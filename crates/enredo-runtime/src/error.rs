//! Error types for the runtime.

use thiserror::Error;

use crate::persistence::StorageError;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur while running a game.
///
/// Most of these never reach the player: the engine logs them and leaves
/// the session unchanged.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A scene id does not exist in the definition.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// An object id does not exist in the library.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// A tracker id is not defined.
    #[error("tracker not found: {0}")]
    TrackerNotFound(String),

    /// The key-value store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A saved session breaks an invariant of the game it belongs to.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
