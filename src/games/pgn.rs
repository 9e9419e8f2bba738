use anyhow::{Context, Result};
use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use std::fmt::Write;
use std::fs::File;
use std::io::Read;
use std::ops::ControlFlow;
use std::path::PathBuf;

use super::{GameRecord, GameSource};

/// Mainline being collected for the current game
struct Movetext {
    record: GameRecord,
    plies: usize,
}

/// Collects the opening tags and the first `max_plies` mainline moves
/// Variations, comments and NAGs are ignored
struct OpeningVisitor {
    max_plies: usize,
}

impl OpeningVisitor {
    fn new(max_plies: usize) -> Self {
        OpeningVisitor { max_plies }
    }
}

impl Visitor for OpeningVisitor {
    type Tags = GameRecord;
    type Movetext = Movetext;
    type Output = GameRecord;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(GameRecord::default())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let slot = match key {
            b"Site" => &mut tags.site,
            b"ECO" => &mut tags.eco,
            b"Opening" => &mut tags.opening,
            _ => return ControlFlow::Continue(()),
        };

        let value = String::from_utf8_lossy(value.as_bytes()).trim().to_string();
        // "?" is the PGN placeholder for an unknown value
        if slot.is_none() && !value.is_empty() && value != "?" {
            *slot = Some(value);
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(Movetext {
            record: tags,
            plies: 0,
        })
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        if self.max_plies != 0 && movetext.plies >= self.max_plies {
            return ControlFlow::Continue(());
        }

        let text = &mut movetext.record.movetext;
        if !text.is_empty() {
            text.push(' ');
        }
        if movetext.plies % 2 == 0 {
            let _ = write!(text, "{}. ", movetext.plies / 2 + 1);
        }
        let _ = write!(text, "{}", san);
        movetext.plies += 1;
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        movetext.record
    }
}

/// Read every game from a PGN stream
pub fn read_games<R: Read>(input: R, max_plies: usize) -> std::io::Result<Vec<GameRecord>> {
    let mut reader = Reader::new(input);
    let mut visitor = OpeningVisitor::new(max_plies);
    let mut games = Vec::new();

    while let Some(game) = reader.read_game(&mut visitor)? {
        games.push(game);
    }
    Ok(games)
}

/// Games loaded from PGN files on disk
pub struct PgnGameSource {
    paths: Vec<PathBuf>,
    max_plies: usize,
}

impl PgnGameSource {
    /// `max_plies` caps the recorded mainline; 0 keeps every move
    pub fn new(paths: Vec<PathBuf>, max_plies: usize) -> Self {
        PgnGameSource { paths, max_plies }
    }
}

impl GameSource for PgnGameSource {
    fn games(&mut self) -> Result<Vec<GameRecord>> {
        let mut games = Vec::new();
        for path in &self.paths {
            let file = File::open(path).with_context(|| format!("Failed to open PGN file {:?}", path))?;
            let parsed = read_games(file, self.max_plies)
                .with_context(|| format!("Failed to parse PGN file {:?}", path))?;
            log::info!("Read {} games from {:?}", parsed.len(), path);
            games.extend(parsed);
        }
        Ok(games)
    }
}
