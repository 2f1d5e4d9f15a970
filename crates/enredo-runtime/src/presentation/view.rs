//! Pure view values derived from definition and session state.

use enredo_core::{GameDefinition, GameObject, Scene};
use serde::Serialize;

use crate::session::Session;

/// What a scene looks like right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneView {
    /// Scene id.
    pub scene_id: String,
    /// Scene name.
    pub name: String,
    /// Scene image, if any.
    pub image: Option<String>,
    /// Description with markup tags removed.
    pub description: String,
    /// Names of the objects in the scene.
    pub objects: Vec<String>,
}

/// An inventory item as shown in the inventory panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Object id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Image, if any.
    pub image: Option<String>,
}

impl From<&GameObject> for ItemView {
    fn from(object: &GameObject) -> Self {
        Self {
            id: object.id.clone(),
            name: object.name.clone(),
            image: object.image.clone(),
        }
    }
}

/// A visible tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerView {
    /// Tracker id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current value, unclamped.
    pub value: i64,
    /// Threshold.
    pub max: i64,
    /// Unit suffix.
    pub unit: Option<String>,
    /// Value formatted with the tracker's display flags.
    pub display: String,
}

/// The chances counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChancesView {
    /// Remaining chances.
    pub remaining: i32,
    /// Maximum chances.
    pub max: i32,
    /// Icon drawn per chance.
    pub icon: Option<String>,
    /// Icon color.
    pub color: Option<String>,
}

/// Status panel contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    /// Visible trackers in declaration order.
    pub trackers: Vec<TrackerView>,
    /// Chances, when the chances system is enabled.
    pub chances: Option<ChancesView>,
}

/// Render a scene from its description and live objects.
pub fn render(scene: &Scene, description: &str, live_objects: &[GameObject]) -> SceneView {
    SceneView {
        scene_id: scene.id.clone(),
        name: scene.name.clone(),
        image: scene.image.clone(),
        description: strip_tags(description),
        objects: live_objects.iter().map(|o| o.name.clone()).collect(),
    }
}

/// Build the status panel for the session.
pub fn status_view(definition: &GameDefinition, session: &Session) -> StatusView {
    let trackers = definition
        .trackers
        .iter()
        .filter(|d| !d.hidden)
        .map(|d| {
            let value = session.trackers.get(&d.id).unwrap_or(d.initial_value);
            TrackerView {
                id: d.id.clone(),
                name: d.name.clone(),
                value,
                max: d.max_value,
                unit: d.unit.clone(),
                display: d.format_value(value),
            }
        })
        .collect();

    let settings = &definition.settings;
    let chances = settings.chances_enabled.then(|| ChancesView {
        remaining: session.chances.remaining(),
        max: session.chances.max(),
        icon: settings.chance_icon.clone(),
        color: settings.chance_color.clone(),
    });

    StatusView { trackers, chances }
}

/// Remove markup tags from authored text.
///
/// Line breaks and paragraph ends become newlines. A few common entities are
/// decoded. A `<` without a closing `>` is kept as text.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) => {
                let tag = after[..end].trim().to_lowercase();
                let name = tag
                    .trim_end_matches('/')
                    .split_whitespace()
                    .next()
                    .unwrap_or("");
                if matches!(name, "br" | "/p" | "/div") {
                    out.push('\n');
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    decoded.trim().to_string()
}
