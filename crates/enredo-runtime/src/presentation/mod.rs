//! Presentation contract between the engine and a front end.
//!
//! The engine never draws anything. It returns [`Output`] events built from
//! pure view values, and a [`Presenter`] turns them into pixels, terminal
//! text or a test transcript.

pub mod choreography;
pub mod output;
pub mod presenter;
pub mod view;

pub use choreography::TransitionTiming;
pub use output::{Output, RenderTarget, Response};
pub use presenter::{Presenter, Transcript};
pub use view::{
    ChancesView, ItemView, SceneView, StatusView, TrackerView, render, status_view, strip_tags,
};
