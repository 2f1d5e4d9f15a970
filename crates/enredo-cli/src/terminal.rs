//! Terminal presenter.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use enredo_runtime::presentation::StatusView;
use enredo_runtime::{Output, Presenter};

/// Prints output events to stdout.
///
/// The status panel is only printed when it changes.
#[derive(Default)]
pub struct TerminalPresenter {
    last_status: Option<StatusView>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn print_status(&mut self, status: &StatusView) {
        if self.last_status.as_ref() == Some(status) {
            return;
        }
        self.last_status = Some(status.clone());

        if !status.trackers.is_empty() {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            for tracker in &status.trackers {
                table.add_row(vec![tracker.name.as_str(), tracker.display.as_str()]);
            }
            println!("{table}");
        }
        if let Some(chances) = &status.chances {
            let icon = chances.icon.as_deref().unwrap_or("♥");
            let hearts = icon.repeat(usize::try_from(chances.remaining).unwrap_or(0));
            println!("  Chances: {} ({}/{})", hearts.red(), chances.remaining, chances.max);
        }
        println!();
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, output: &Output) {
        match output {
            Output::Text(text) => println!("{text}\n"),
            Output::Scene(view) => {
                println!("{}", view.name.bold().underline());
                if !view.description.is_empty() {
                    println!("{}", view.description);
                }
                if !view.objects.is_empty() {
                    println!("{} {}", "Você vê:".dimmed(), view.objects.join(", "));
                }
                println!();
            }
            Output::Inventory(items) => {
                if items.is_empty() {
                    println!("Você não está carregando nada.\n");
                } else {
                    println!("{}", "Inventário".bold());
                    for item in items {
                        println!("  - {}", item.name);
                    }
                    println!();
                }
            }
            Output::Status(status) => self.print_status(status),
            Output::Sound(sound) => println!("{}\n", format!("♪ {sound}").dimmed()),
            Output::TransitionStart(kind) => println!("{}", format!("~ {kind} ~").dimmed()),
            Output::TransitionEnd => {}
            Output::GameOver => println!("{}\n", "FIM DE JOGO".red().bold()),
            Output::Victory => println!("{}\n", "VITÓRIA!".green().bold()),
        }
    }
}
