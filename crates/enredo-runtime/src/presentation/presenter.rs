//! Presenter trait and a plain-text transcript.

use super::output::{Output, Response};

/// Consumes output events and draws them somewhere.
pub trait Presenter {
    /// Draw one event.
    fn present(&mut self, output: &Output);

    /// Draw every event of a response in order.
    fn present_all(&mut self, response: &Response) {
        for output in response.iter() {
            self.present(output);
        }
    }
}

/// Presenter that records plain text lines. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Presenter for Transcript {
    fn present(&mut self, output: &Output) {
        match output {
            Output::Text(text) => self.lines.push(text.clone()),
            Output::Scene(view) => {
                self.lines.push(format!("== {} ==", view.name));
                if !view.description.is_empty() {
                    self.lines.push(view.description.clone());
                }
                if !view.objects.is_empty() {
                    self.lines.push(format!("Você vê: {}", view.objects.join(", ")));
                }
            }
            Output::Inventory(items) => {
                if items.is_empty() {
                    self.lines.push("Inventário vazio.".to_string());
                } else {
                    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
                    self.lines.push(format!("Inventário: {}", names.join(", ")));
                }
            }
            Output::Status(status) => {
                for tracker in &status.trackers {
                    self.lines.push(format!("{}: {}", tracker.name, tracker.display));
                }
                if let Some(chances) = &status.chances {
                    self.lines
                        .push(format!("Chances: {}/{}", chances.remaining, chances.max));
                }
            }
            Output::Sound(sound) => self.lines.push(format!("[som: {sound}]")),
            Output::TransitionStart(_) | Output::TransitionEnd => {}
            Output::GameOver => self.lines.push("FIM DE JOGO".to_string()),
            Output::Victory => self.lines.push("VITÓRIA".to_string()),
        }
    }
}
