//! Terminal player and definition checker for Enredo games.

mod commands;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "enredo",
    about = "Enredo: play and check interactive fiction games",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Game definition (.json)
        game: PathBuf,

        /// Directory where sessions are saved
        #[arg(short, long, default_value = ".enredo-saves")]
        save_dir: PathBuf,

        /// Never write a save file
        #[arg(long)]
        preview: bool,

        /// Discard any saved session and start over
        #[arg(long)]
        new: bool,

        /// Skip transition and ending delays
        #[arg(long)]
        instant: bool,
    },

    /// Validate a game definition and print a summary
    Check {
        /// Game definition (.json)
        game: PathBuf,
    },

    /// Delete the saved session of a game
    Reset {
        /// Game definition (.json)
        game: PathBuf,

        /// Directory where sessions are saved
        #[arg(short, long, default_value = ".enredo-saves")]
        save_dir: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            game,
            save_dir,
            preview,
            new,
            instant,
        } => commands::play::run(
            &game,
            &save_dir,
            commands::play::PlayOptions {
                preview,
                new,
                instant,
            },
        ),
        Commands::Check { game } => commands::check::run(&game),
        Commands::Reset { game, save_dir } => commands::reset::run(&game, &save_dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
