use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;

use crate::flashcards::{ApyExporter, FlashcardExporter};
use crate::games::{GameSource, openings_from_games};
use crate::models::{EcoVolume, KnownOpenings, Opening, OpeningContext, StoreOutcome};
use crate::storage::{ChessliPaths, Config};
use crate::ui::{self, ComparisonRow, Palette};

/// What happens to stored openings after an ankify run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Only write the card files
    #[default]
    FilesOnly,
    /// Also import freshly written cards with the flashcard tool
    Directly,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnkifyOptions {
    /// Rewrite openings that are already stored
    pub force: bool,
    pub export: ExportMode,
}

/// Counts reported at the end of an ankify run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnkifySummary {
    pub stored: usize,
    pub overwritten: usize,
    pub already_known: usize,
    pub exported: usize,
}

/// Main application state
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Resolved directories
    pub paths: ChessliPaths,

    /// Shared by every opening this app creates
    context: Arc<OpeningContext>,

    palette: Palette,

    /// Flashcard tool used for direct exports
    exporter: Box<dyn FlashcardExporter>,
}

impl App {
    /// Build the app with the exporter and palette described by `config`
    pub fn new(paths: ChessliPaths, config: Config) -> Self {
        let exporter = Box::new(ApyExporter::new(config.flashcards.command.clone()));
        let palette = Palette::from_config(&config.display);
        App::with_parts(paths, config, exporter, palette)
    }

    pub fn with_parts(
        paths: ChessliPaths,
        config: Config,
        exporter: Box<dyn FlashcardExporter>,
        palette: Palette,
    ) -> Self {
        let context = Arc::new(OpeningContext::new(
            paths.openings_dir.clone(),
            config.flashcards.template(),
        ));
        App {
            config,
            paths,
            context,
            palette,
            exporter,
        }
    }

    pub fn context(&self) -> &Arc<OpeningContext> {
        &self.context
    }

    /// `openings ls`
    pub fn list_openings(&self, filter: Option<EcoVolume>, out: &mut dyn Write) -> Result<KnownOpenings> {
        ui::list_known_openings(filter, &self.context, &self.palette, out)
    }

    /// Read games and derive the distinct openings played in them
    pub fn load_openings(&self, source: &mut dyn GameSource) -> Result<Vec<Opening>> {
        let games = source.games().context("Failed to read games")?;
        Ok(openings_from_games(&games, &self.context))
    }

    /// `openings show`
    pub fn show_openings(&self, openings: &[Opening], out: &mut dyn Write) -> Result<Vec<ComparisonRow>> {
        ui::render_new_vs_known(openings, &self.palette, out).context("Failed to print openings table")
    }

    /// `openings ankify`: show the table, store the openings and optionally
    /// push the freshly written cards to the flashcard tool
    pub fn ankify(
        &self,
        openings: &[Opening],
        options: AnkifyOptions,
        out: &mut dyn Write,
    ) -> Result<AnkifySummary> {
        self.show_openings(openings, out)?;

        let mut summary = AnkifySummary::default();
        for opening in openings {
            let outcome = opening
                .store(options.force)
                .with_context(|| format!("Failed to store {}", opening))?;

            match outcome {
                StoreOutcome::Stored => summary.stored += 1,
                StoreOutcome::Overwritten => summary.overwritten += 1,
                StoreOutcome::AlreadyKnown => {
                    summary.already_known += 1;
                    continue;
                }
            }

            if options.export == ExportMode::Directly {
                opening.export_to_flashcards(self.exporter.as_ref())?;
                summary.exported += 1;
            }
        }

        writeln!(
            out,
            "\nStored {} new and {} updated openings, {} already known, {} exported via {}",
            summary.stored,
            summary.overwritten,
            summary.already_known,
            summary.exported,
            self.exporter.name()
        )?;
        log::debug!("Ankify summary: {:?}", summary);

        Ok(summary)
    }
}
