pub mod pgn;

use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Opening, OpeningContext};

pub use pgn::PgnGameSource;

/// Header fields and mainline of one played game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub site: Option<String>,
    pub eco: Option<String>,
    pub opening: Option<String>,
    /// Numbered SAN mainline, e.g. "1. e4 e5 2. Nf3"
    pub movetext: String,
}

/// Supplier of already-parsed games, in play order
pub trait GameSource {
    fn games(&mut self) -> Result<Vec<GameRecord>>;
}

/// Turn games into openings, keeping the first game seen per identity
pub fn openings_from_games(games: &[GameRecord], context: &Arc<OpeningContext>) -> Vec<Opening> {
    let mut seen = HashSet::new();
    let mut openings = Vec::new();

    for game in games {
        let (Some(eco), Some(name)) = (game.eco.as_deref(), game.opening.as_deref()) else {
            log::debug!(
                "Skipping game {} without ECO/Opening tags",
                game.site.as_deref().unwrap_or("<unknown site>")
            );
            continue;
        };

        let opening = match Opening::new(
            name,
            game.site.clone().unwrap_or_default(),
            eco,
            game.movetext.clone(),
            context.clone(),
        ) {
            Ok(opening) => opening,
            Err(e) => {
                log::warn!("Skipping game opening: {}", e);
                continue;
            }
        };

        if seen.insert(opening.identity()) {
            openings.push(opening);
        }
    }

    log::debug!("Derived {} distinct openings from {} games", openings.len(), games.len());
    openings
}
