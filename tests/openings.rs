use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use chessli::app::{AnkifyOptions, App, ExportMode};
use chessli::flashcards::FlashcardExporter;
use chessli::games::{GameRecord, GameSource};
use chessli::models::{EcoVolume, Opening};
use chessli::storage::{ChessliPaths, Config};
use chessli::ui::{Marker, Palette};

/// Exporter that remembers which files it imported
#[derive(Clone, Default)]
struct SpyExporter {
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl FlashcardExporter for SpyExporter {
    fn add_from_file(&self, path: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn name(&self) -> &str {
        "spy"
    }
}

struct FixedGames(Vec<GameRecord>);

impl GameSource for FixedGames {
    fn games(&mut self) -> Result<Vec<GameRecord>> {
        Ok(self.0.clone())
    }
}

fn game(eco: &str, opening: &str) -> GameRecord {
    GameRecord {
        site: Some(format!("https://lichess.org/{}", eco)),
        eco: Some(eco.to_string()),
        opening: Some(opening.to_string()),
        movetext: "1. e4 e5".to_string(),
    }
}

fn setup() -> (TempDir, App, SpyExporter) {
    let dir = TempDir::new().unwrap();
    let paths = ChessliPaths::from_dirs(dir.path().join("data"), dir.path().join("config"));
    paths.ensure().unwrap();
    let spy = SpyExporter::default();
    let app = App::with_parts(paths, Config::default(), Box::new(spy.clone()), Palette::plain());
    (dir, app, spy)
}

fn openings(app: &App, games: Vec<GameRecord>) -> Vec<Opening> {
    app.load_openings(&mut FixedGames(games)).unwrap()
}

#[test]
fn identity_is_stable_and_names_the_file() {
    let (_dir, app, _) = setup();
    let opening = &openings(&app, vec![game("B20", "Sicilian Defense")])[0];

    assert_eq!(opening.identity(), "B20 - Sicilian Defense");
    assert_eq!(opening.identity(), opening.identity());
    assert_eq!(
        opening.path(),
        app.paths.openings_dir.join("B20 - Sicilian Defense.md")
    );
}

#[test]
fn store_is_idempotent_without_force() {
    let (_dir, app, _) = setup();
    let opening = &openings(&app, vec![game("C50", "Italian Game")])[0];

    opening.store(false).unwrap();
    assert!(opening.exists());
    let before = fs::read_to_string(opening.path()).unwrap();

    opening.store(false).unwrap();
    assert_eq!(fs::read_to_string(opening.path()).unwrap(), before);
}

#[test]
fn listing_reports_total_and_groups() {
    let (_dir, app, _) = setup();
    for stem in ["A12 - X", "A45 - Y", "B10 - Z"] {
        fs::write(app.paths.openings_dir.join(format!("{stem}.md")), "").unwrap();
    }

    let mut out = Vec::new();
    let known = app.list_openings(None, &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();
    assert_eq!(known.total(), 3);
    assert!(output.contains("total of 3 openings"));
    assert!(output.contains("Volume A: Flank openings (2)!"));
    assert!(output.contains("(1)!"));

    let mut out = Vec::new();
    app.list_openings(Some(EcoVolume::B), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("total of 3 openings"));
    assert!(!output.contains("Volume A"));
    assert_eq!(output.matches("✔️").count(), 1);
}

#[test]
fn ankify_stores_new_openings_and_skips_known_ones() {
    let (_dir, app, spy) = setup();
    let batch = openings(
        &app,
        vec![game("C50", "Italian Game"), game("B01", "Scandinavian Defense")],
    );
    batch[0].store(false).unwrap();

    let mut out = Vec::new();
    let rows = app.show_openings(&batch, &mut out).unwrap();
    assert_eq!(rows[0].marker, Marker::Known);
    assert_eq!(rows[1].marker, Marker::New);

    let options = AnkifyOptions {
        force: false,
        export: ExportMode::Directly,
    };
    let summary = app.ankify(&batch, options, &mut Vec::new()).unwrap();
    assert_eq!(summary.stored, 1);
    assert_eq!(summary.already_known, 1);
    assert_eq!(summary.exported, 1);
    assert_eq!(*spy.calls.lock().unwrap(), vec![batch[1].path()]);
    assert!(batch[1].exists());
}

#[test]
fn ankify_files_only_never_calls_the_exporter() {
    let (_dir, app, spy) = setup();
    let batch = openings(&app, vec![game("E97", "King's Indian Defense")]);

    let summary = app
        .ankify(&batch, AnkifyOptions::default(), &mut Vec::new())
        .unwrap();
    assert_eq!(summary.stored, 1);
    assert_eq!(summary.exported, 0);
    assert!(spy.calls.lock().unwrap().is_empty());
}

#[test]
fn forced_ankify_rewrites_in_place() {
    let (_dir, app, _) = setup();
    let batch = openings(&app, vec![game("A00", "Polish Opening")]);
    batch[0].store(false).unwrap();

    let options = AnkifyOptions {
        force: true,
        export: ExportMode::FilesOnly,
    };
    let summary = app.ankify(&batch, options, &mut Vec::new()).unwrap();
    assert_eq!(summary.overwritten, 1);

    let stored: Vec<_> = fs::read_dir(&app.paths.openings_dir).unwrap().collect();
    assert_eq!(stored.len(), 1);
}

#[test]
fn exporting_unstored_opening_never_runs_the_tool() {
    let (_dir, app, spy) = setup();
    let opening = &openings(&app, vec![game("D02", "Queen's Pawn Game")])[0];

    assert!(opening.export_to_flashcards(&spy).is_err());
    assert!(spy.calls.lock().unwrap().is_empty());
}
