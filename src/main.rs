use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use chessli::app::{AnkifyOptions, App, ExportMode};
use chessli::games::PgnGameSource;
use chessli::logging;
use chessli::models::EcoVolume;
use chessli::storage::{ChessliPaths, ConfigStorage, TomlConfigStorage};

#[derive(Parser)]
#[command(name = "chessli")]
#[command(about = "Turn the chess openings you play into flashcards", long_about = None)]
struct Cli {
    /// Use this config file instead of ~/.config/chessli/chessli.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and ankify chess openings
    #[command(subcommand)]
    Openings(OpeningsCommand),
}

#[derive(Subcommand)]
enum OpeningsCommand {
    /// List the openings you already know
    Ls {
        /// Limit the shown openings to one ECO volume
        #[arg(long, value_enum)]
        eco: Option<EcoVolume>,
    },

    /// Show which openings in the given games are new
    Show {
        #[command(flatten)]
        games: GamesArgs,
    },

    /// Store the openings of the given games as flashcards
    Ankify {
        #[command(flatten)]
        games: GamesArgs,

        /// Rewrite openings that are already stored
        #[arg(long)]
        force: bool,

        /// Also import the new cards with the flashcard tool
        #[arg(long)]
        directly: bool,
    },
}

#[derive(Args)]
struct GamesArgs {
    /// PGN files to read games from
    #[arg(required = true)]
    pgn: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ChessliPaths::resolve()?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = TomlConfigStorage::new(config_path).load()?;
    let paths = paths.with_openings_dir(config.openings.dir.clone());

    if config.logging.file {
        logging::init_logger(
            paths.log_file(),
            &config.logging.file_level,
            &config.logging.console_level,
        )?;
    } else {
        logging::init_console_logger(&config.logging.console_level)?;
    }

    paths.ensure()?;

    let mut config = config;
    if !io::stdout().is_terminal() {
        config.display.color = false;
    }
    let app = App::new(paths, config);

    match cli.command {
        Commands::Openings(command) => run_openings(&app, command),
    }
}

fn run_openings(app: &App, command: OpeningsCommand) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match command {
        OpeningsCommand::Ls { eco } => {
            app.list_openings(eco, &mut stdout)?;
        }
        OpeningsCommand::Show { games } => {
            let openings = read_openings(app, games)?;
            app.show_openings(&openings, &mut stdout)?;
        }
        OpeningsCommand::Ankify {
            games,
            force,
            directly,
        } => {
            let openings = read_openings(app, games)?;
            let options = AnkifyOptions {
                force,
                export: if directly {
                    ExportMode::Directly
                } else {
                    ExportMode::FilesOnly
                },
            };
            app.ankify(&openings, options, &mut stdout)
                .context("Failed to ankify openings")?;
        }
    }

    Ok(())
}

fn read_openings(app: &App, games: GamesArgs) -> Result<Vec<chessli::models::Opening>> {
    let mut source = PgnGameSource::new(games.pgn, app.config.openings.max_plies);
    app.load_openings(&mut source)
}
