//! Purchase feed ingestion.
//!
//! Turns a flat, chronological list of purchase events into one timeline per
//! game, then groups games by subject (player) and category (champion).

use std::collections::{BTreeMap, HashMap};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::cluster::HasTimeline;
use crate::item::ItemId;
use crate::timeline::Timeline;

/// One item purchase, as delivered by the event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseEvent {
    /// The player who made the purchase.
    pub subject_id: u64,
    pub game_id: u64,
    /// The champion played in this game.
    pub category_id: u64,
    pub item_id: ItemId,
    /// Milliseconds since the start of the game.
    pub timestamp_ms: i64,
}

/// One player's purchases in one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub subject_id: u64,
    pub game_id: u64,
    pub category_id: u64,
    pub timeline: Timeline,
}

impl HasTimeline for Game {
    fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

/// Games played by one subject with one category.
#[derive(Debug, Clone)]
pub struct GameGroup {
    pub subject_id: u64,
    pub category_id: u64,
    pub games: Vec<Game>,
}

/// Builds one game per `(subject, game)` pair, in first-seen order.
///
/// Events are applied in feed order. Purchases with unknown items, or with
/// timestamps that are out of range or out of order, are dropped with a
/// warning; the category of a game is taken from its first event.
pub fn build_games<C: ItemCatalog + ?Sized>(events: &[PurchaseEvent], catalog: &C) -> Vec<Game> {
    let mut order: Vec<(u64, u64)> = Vec::new();
    let mut purchases: HashMap<(u64, u64), (u64, Vec<(ItemId, TimeDelta)>)> = HashMap::new();

    for event in events {
        let key = (event.subject_id, event.game_id);
        let (_, list) = purchases.entry(key).or_insert_with(|| {
            order.push(key);
            (event.category_id, Vec::new())
        });
        let Some(offset) = TimeDelta::try_milliseconds(event.timestamp_ms) else {
            tracing::warn!(
                item = %event.item_id,
                timestamp_ms = event.timestamp_ms,
                "dropping purchase with out-of-range timestamp"
            );
            continue;
        };
        list.push((event.item_id, offset));
    }

    order
        .into_iter()
        .filter_map(|key| {
            let (category_id, list) = purchases.remove(&key)?;
            let timeline = Timeline::from_purchases(list, catalog);
            tracing::debug!(
                subject = key.0,
                game = key.1,
                items = timeline.len(),
                "built game timeline"
            );
            Some(Game {
                subject_id: key.0,
                game_id: key.1,
                category_id,
                timeline,
            })
        })
        .collect()
}

/// Groups games by `(subject, category)`, ordered by that key.
///
/// Groups with fewer than `min_games` games are left out.
pub fn group_games(games: Vec<Game>, min_games: usize) -> Vec<GameGroup> {
    let mut groups: BTreeMap<(u64, u64), Vec<Game>> = BTreeMap::new();
    for game in games {
        groups
            .entry((game.subject_id, game.category_id))
            .or_default()
            .push(game);
    }

    groups
        .into_iter()
        .filter(|(key, games)| {
            let eligible = games.len() >= min_games;
            if !eligible {
                tracing::debug!(
                    subject = key.0,
                    category = key.1,
                    games = games.len(),
                    min_games,
                    "skipping group with too few games"
                );
            }
            eligible
        })
        .map(|((subject_id, category_id), games)| GameGroup {
            subject_id,
            category_id,
            games,
        })
        .collect()
}
