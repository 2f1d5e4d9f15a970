//! Interactive fiction runtime for Enredo.
//!
//! The [`Engine`] owns a single [`Session`] and drives it from free-text
//! player input: the [`interpreter`] resolves the input against the
//! [`GameDefinition`](enredo_core::GameDefinition), the engine applies the
//! winning rule, [`persistence`] writes a snapshot, and the resulting
//! [`Response`] is handed to a [`Presenter`].
//!
//! Time is virtual. Delayed effects (victory, forced transitions, transition
//! choreography) are queued in a [`Scheduler`] and fired by
//! [`Engine::advance`] or [`Engine::settle`].

pub mod chances;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod inventory;
pub mod log;
pub mod matcher;
pub mod persistence;
pub mod presentation;
pub mod scheduler;
pub mod session;
pub mod tracker;

pub use chances::{ChanceLoss, Chances};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{RuntimeError, RuntimeResult};
pub use interpreter::{Resolution, resolve};
pub use inventory::Inventory;
pub use log::{ActionLog, LogEntry};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, Persistence, StorageError};
pub use presentation::{Output, Presenter, RenderTarget, Response, Transcript};
pub use scheduler::{ScheduledAction, ScheduledEvent, Scheduler};
pub use session::{Ending, LiveObjects, Session};
pub use tracker::TrackerValues;
