//! Output events and the surfaces they are drawn on.

use enredo_core::TransitionKind;

use super::view::{ItemView, SceneView, StatusView};

/// Abstract surfaces a front end provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    /// Scene image area.
    SceneImage,
    /// Scene text and response scrollback.
    SceneText,
    /// Command input field.
    CommandInput,
    /// Inventory panel.
    InventoryPanel,
    /// Diary panel.
    DiaryPanel,
    /// Tracker and chances panel.
    TrackerPanel,
    /// Transition overlay.
    TransitionOverlay,
    /// Sound output.
    Audio,
    /// Game over screen.
    GameOverScreen,
    /// Victory screen.
    VictoryScreen,
}

/// A single event for the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Response text appended to the scrollback.
    Text(String),
    /// Render a scene.
    Scene(SceneView),
    /// Open the inventory panel.
    Inventory(Vec<ItemView>),
    /// Refresh the status panel.
    Status(StatusView),
    /// Play a sound. Fire and forget.
    Sound(String),
    /// Show the transition overlay.
    TransitionStart(TransitionKind),
    /// Hide the transition overlay.
    TransitionEnd,
    /// Show the game over screen.
    GameOver,
    /// Show the victory screen.
    Victory,
}

impl Output {
    /// Surfaces this event updates.
    pub fn targets(&self) -> &'static [RenderTarget] {
        use RenderTarget::*;
        match self {
            Self::Text(_) => &[SceneText, DiaryPanel],
            Self::Scene(_) => &[SceneImage, SceneText, DiaryPanel],
            Self::Inventory(_) => &[InventoryPanel],
            Self::Status(_) => &[TrackerPanel],
            Self::Sound(_) => &[Audio],
            Self::TransitionStart(_) | Self::TransitionEnd => &[TransitionOverlay],
            Self::GameOver => &[GameOverScreen, CommandInput],
            Self::Victory => &[VictoryScreen, CommandInput],
        }
    }
}

/// Events produced by one engine call, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// The events.
    pub outputs: Vec<Output>,
}

impl Response {
    /// An empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, output: Output) {
        self.outputs.push(output);
    }

    /// Whether nothing happened.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Texts of all [`Output::Text`] events.
    pub fn texts(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                Output::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Scenes rendered in this response.
    pub fn scenes(&self) -> Vec<&SceneView> {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                Output::Scene(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    /// Whether the response contains an event.
    pub fn contains(&self, output: &Output) -> bool {
        self.outputs.contains(output)
    }

    /// Iterate over events.
    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets() {
        assert_eq!(Output::Sound("trovão".into()).targets(), &[RenderTarget::Audio]);
        assert!(Output::Victory.targets().contains(&RenderTarget::VictoryScreen));
        assert!(
            Output::TransitionStart(TransitionKind::Fade)
                .targets()
                .contains(&RenderTarget::TransitionOverlay)
        );
    }

    #[test]
    fn collects_texts() {
        let mut response = Response::new();
        response.push(Output::Text("um".into()));
        response.push(Output::TransitionEnd);
        response.push(Output::Text("dois".into()));
        assert_eq!(response.texts(), ["um", "dois"]);
        assert!(response.scenes().is_empty());
    }
}
