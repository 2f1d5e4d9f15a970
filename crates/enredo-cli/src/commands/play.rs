use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use colored::Colorize;
use enredo_runtime::persistence::save_key;
use enredo_runtime::{Engine, EngineConfig, FileStore, KeyValueStore, Presenter};

use crate::terminal::TerminalPresenter;

/// Flags of the `play` command.
pub struct PlayOptions {
    /// Never write a save file.
    pub preview: bool,
    /// Discard any saved session first.
    pub new: bool,
    /// Fire delayed events immediately instead of sleeping.
    pub instant: bool,
}

pub fn run(game: &Path, save_dir: &Path, options: PlayOptions) -> Result<(), String> {
    let definition = super::load_game(game)?;
    let config = EngineConfig::default().with_preview(options.preview);
    let store = FileStore::new(save_dir);

    if options.new && !options.preview {
        let key = save_key(&config.key_prefix, &definition.settings.title);
        store
            .remove(&key)
            .map_err(|e| format!("failed to discard saved game: {e}"))?;
    }

    let mut engine = Engine::new(definition, Box::new(store), config)
        .map_err(|e| format!("failed to start game: {e}"))?;
    let mut presenter = TerminalPresenter::new();

    println!("  {}", engine.definition().settings.title.bold());
    println!("  Type ':quit' to exit, ':restart' to start over, ':diary' for the diary.\n");
    if engine.is_restored() {
        println!("  {}\n", "Continuing saved game.".dimmed());
    }

    presenter.present_all(&engine.start());
    wait_for_events(&mut engine, &mut presenter, options.instant);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":restart" => presenter.present_all(&engine.restart()),
            ":diary" => println!("{}", engine.diary()),
            _ => presenter.present_all(&engine.process(input)),
        }
        wait_for_events(&mut engine, &mut presenter, options.instant);

        if engine.is_ended() {
            println!(
                "  {}\n",
                "Type ':restart' to play again or ':quit' to exit.".dimmed()
            );
        }
    }

    Ok(())
}

/// Fire pending events, sleeping in real time unless `instant` is set.
fn wait_for_events(engine: &mut Engine, presenter: &mut TerminalPresenter, instant: bool) {
    if instant {
        presenter.present_all(&engine.settle());
        return;
    }
    while let Some(wait) = engine.time_until_next_event() {
        thread::sleep(wait);
        presenter.present_all(&engine.advance(wait));
    }
}
