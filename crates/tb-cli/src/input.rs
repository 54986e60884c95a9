//! Loading the item catalog and the purchase event feed from disk.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tb_core::{Game, PurchaseEvent, StaticCatalog, build_games};

/// Reads a catalog document (`{"data": {"<id>": {...}}}`).
pub fn load_catalog(path: &Path) -> Result<StaticCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = StaticCatalog::from_json(&json)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    tracing::debug!(items = catalog.len(), path = %path.display(), "loaded catalog");
    Ok(catalog)
}

/// Reads purchase events from a JSON Lines file; blank lines are skipped.
pub fn load_events(path: &Path) -> Result<Vec<PurchaseEvent>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_events(BufReader::new(file))
        .with_context(|| format!("failed to read events from {}", path.display()))
}

fn parse_events<R: BufRead>(reader: R) -> Result<Vec<PurchaseEvent>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: PurchaseEvent = serde_json::from_str(&line)
            .with_context(|| format!("invalid event on line {}", index + 1))?;
        events.push(event);
    }
    Ok(events)
}

/// Loads the catalog and the feed, and builds one timeline per game.
pub fn load_games(catalog_path: &Path, events_path: &Path) -> Result<Vec<Game>> {
    let catalog = load_catalog(catalog_path)?;
    let events = load_events(events_path)?;
    let games = build_games(&events, &catalog);
    tracing::debug!(events = events.len(), games = games.len(), "built games");
    Ok(games)
}

/// Finds one game, using `subject` to disambiguate shared game IDs.
pub fn find_game(games: &[Game], game_id: u64, subject: Option<u64>) -> Result<&Game> {
    let mut matches = games
        .iter()
        .filter(|game| game.game_id == game_id)
        .filter(|game| subject.is_none_or(|subject| game.subject_id == subject));

    let Some(game) = matches.next() else {
        anyhow::bail!("game {game_id} not found");
    };
    if matches.next().is_some() {
        anyhow::bail!("game {game_id} has several players; pass --subject");
    }
    Ok(game)
}
