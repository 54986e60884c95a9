//! Shared test data: a small catalog and a feed of eight games.
//!
//! Player 7 played champion 3 in games 1 to 6. Games 1 to 3 follow one
//! build, games 4 and 5 another, and game 6 mixes both. Player 8 also
//! played in game 1 (champion 22), and player 7 played game 7 as champion 4.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tb_core::{Game, PurchaseEvent, StaticCatalog, build_games};

use crate::Config;

pub const CATALOG_JSON: &str = r#"{
  "type": "item",
  "version": "5.16.1",
  "data": {
    "1036": {"name": "Long Sword"},
    "1037": {"name": "Pickaxe"},
    "1038": {"name": "B. F. Sword"},
    "1039": {"name": "Hunter's Machete"},
    "1052": {"name": "Amplifying Tome"},
    "1054": {"name": "Doran's Shield"},
    "1055": {"name": "Doran's Blade"},
    "2003": {"name": "Health Potion", "consumed": true},
    "2049": {"name": "Sightstone"},
    "3041": {"name": "Mejai's Soulstealer"},
    "3042": {"name": "Muramana"},
    "3181": {"name": "Sanguine Blade"},
    "3301": {"name": "Ancient Coin"},
    "3340": {"name": "Warding Totem (Trinket)"}
  }
}"#;

/// `(subject, game, category, [(item, second)])` in feed order.
const GAMES: &[(u64, u64, u64, &[(u32, i64)])] = &[
    (7, 1, 3, &[(3340, 0), (2003, 16), (1055, 32), (1038, 48), (1054, 64)]),
    (7, 2, 3, &[(3340, 0), (2003, 16), (1055, 32), (1038, 48), (2049, 64)]),
    (
        7,
        3,
        3,
        &[
            (3340, 0),
            (2003, 0),
            (1055, 20),
            (1038, 40),
            (1054, 40),
            (2049, 60),
            (1037, 60),
            (1036, 80),
            (1039, 80),
            (1038, 100),
        ],
    ),
    (7, 4, 3, &[(3041, 0), (3181, 16), (3042, 32), (3301, 48), (1052, 64)]),
    (7, 5, 3, &[(3041, 0), (3181, 16), (3042, 32), (3301, 48), (1052, 64)]),
    (
        7,
        6,
        3,
        &[
            (3041, 0),
            (3340, 16),
            (2003, 32),
            (1055, 48),
            (1038, 64),
            (1054, 80),
            (2049, 96),
            (1037, 112),
            (1036, 128),
            (1039, 144),
            (1038, 160),
            (3181, 176),
            (3042, 192),
            (3301, 208),
            (1052, 224),
        ],
    ),
    (8, 1, 22, &[(1055, 0), (1036, 30)]),
    (7, 7, 4, &[(3041, 0)]),
];

pub fn catalog() -> StaticCatalog {
    StaticCatalog::from_json(CATALOG_JSON).unwrap()
}

pub fn events() -> Vec<PurchaseEvent> {
    GAMES
        .iter()
        .flat_map(|&(subject_id, game_id, category_id, purchases)| {
            purchases.iter().map(move |&(item, second)| PurchaseEvent {
                subject_id,
                game_id,
                category_id,
                item_id: item.into(),
                timestamp_ms: second * 1000,
            })
        })
        .collect()
}

pub fn games() -> Vec<Game> {
    build_games(&events(), &catalog())
}

/// The feed as JSON Lines.
pub fn events_jsonl() -> String {
    let mut output = String::new();
    for event in events() {
        writeln!(output, "{}", serde_json::to_string(&event).unwrap()).unwrap();
    }
    output
}

/// Writes `catalog.json` and `events.jsonl` into `dir`.
pub fn write_files(dir: &Path) -> (PathBuf, PathBuf) {
    let catalog_path = dir.join("catalog.json");
    let events_path = dir.join("events.jsonl");
    std::fs::write(&catalog_path, CATALOG_JSON).unwrap();
    std::fs::write(&events_path, events_jsonl()).unwrap();
    (catalog_path, events_path)
}

/// Settings under which games 1-3 and 4-5 form two clusters.
pub fn config() -> Config {
    Config {
        eps: 3,
        min_pts: 2,
        ..Config::default()
    }
}
