//! `tb segment`: shows one game's purchases split into purchase windows.

use std::io::Write;

use anyhow::Result;
use tb_core::{Game, ItemBlock};

use crate::input::find_game;

/// Formats a block's start time as `m:ss`.
fn format_clock(block: &ItemBlock) -> String {
    let seconds = block
        .items
        .first()
        .map_or(0, |item| item.purchase_offset.num_seconds());
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Writes the purchase windows of one game.
pub fn write_blocks<W: Write>(out: &mut W, game: &Game, blocks: &[ItemBlock]) -> Result<()> {
    writeln!(
        out,
        "Game {} (player {}, champion {})",
        game.game_id, game.subject_id, game.category_id
    )?;

    if blocks.is_empty() {
        writeln!(out, "No purchases.")?;
        return Ok(());
    }

    for block in blocks {
        let names: Vec<&str> = block.items.iter().map(|item| item.name.as_str()).collect();
        writeln!(
            out,
            "[{}] {}: {}",
            format_clock(block),
            block.name,
            names.join(", ")
        )?;
    }
    Ok(())
}

/// Runs the segment command.
pub fn run<W: Write>(
    out: &mut W,
    games: &[Game],
    game_id: u64,
    subject: Option<u64>,
    window_seconds: u32,
) -> Result<()> {
    let game = find_game(games, game_id, subject)?;
    let blocks = game.timeline.segment(window_seconds);
    tracing::debug!(game = game_id, blocks = blocks.len(), window_seconds, "segmented game");
    write_blocks(out, game, &blocks)
}
