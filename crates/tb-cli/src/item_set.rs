//! Item set documents, the JSON shape the game client imports.

use serde::{Deserialize, Serialize};
use tb_core::{ItemBlock, Timeline};

/// A custom item set page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSetDocument {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub map: String,
    pub mode: String,
    pub priority: bool,
    pub sortrank: u32,
    pub blocks: Vec<BlockDocument>,
}

/// One titled row of items on an item set page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDocument {
    #[serde(rename = "type")]
    pub name: String,
    pub rec_math: bool,
    pub min_summoner_level: i32,
    pub max_summoner_level: i32,
    pub show_if_summoner_spell: String,
    pub hide_if_summoner_spell: String,
    pub items: Vec<ItemDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    /// Item ID, as a string.
    pub id: String,
    pub count: u32,
}

impl ItemSetDocument {
    /// Builds a Summoner's Rift page with one block per purchase window.
    pub fn from_blocks(title: impl Into<String>, blocks: &[ItemBlock]) -> Self {
        Self {
            title: title.into(),
            kind: "custom".to_string(),
            map: "SR".to_string(),
            mode: "CLASSIC".to_string(),
            priority: false,
            sortrank: 0,
            blocks: blocks.iter().map(BlockDocument::from_block).collect(),
        }
    }

    /// Segments a timeline into purchase windows and builds a page from them.
    pub fn from_timeline(title: impl Into<String>, timeline: &Timeline, window_seconds: u32) -> Self {
        Self::from_blocks(title, &timeline.segment(window_seconds))
    }
}

impl BlockDocument {
    fn from_block(block: &ItemBlock) -> Self {
        Self {
            name: block.name.clone(),
            rec_math: false,
            min_summoner_level: -1,
            max_summoner_level: -1,
            show_if_summoner_spell: String::new(),
            hide_if_summoner_spell: String::new(),
            items: block
                .ids()
                .map(|id| ItemDocument {
                    id: id.to_string(),
                    count: 1,
                })
                .collect(),
        }
    }
}
