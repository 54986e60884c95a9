//! `tb compare`: prints the distance between two games' timelines.

use std::io::Write;

use anyhow::{Result, bail};
use tb_core::{Comparer, Game};

use crate::input::find_game;

/// Runs the compare command.
pub fn run<W: Write>(
    out: &mut W,
    games: &[Game],
    game_ids: &[u64],
    subject: Option<u64>,
    comparer: &Comparer,
) -> Result<()> {
    let &[first_id, second_id] = game_ids else {
        bail!("expected exactly two --game values, got {}", game_ids.len());
    };
    let first = find_game(games, first_id, subject)?;
    let second = find_game(games, second_id, subject)?;

    let distance = comparer.distance(&first.timeline, &second.timeline);
    writeln!(out, "Game {first_id}: {}", first.timeline)?;
    writeln!(out, "Game {second_id}: {}", second.timeline)?;
    writeln!(out, "Distance: {distance}")?;
    Ok(())
}
