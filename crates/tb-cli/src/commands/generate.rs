//! `tb generate`: builds an item set from each group's typical build.
//!
//! The typical build of a group is the center of its largest cluster.

use std::io::Write;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use tb_core::{ClusterError, Comparer, DbscanConfig, GameGroup, dbscan, largest};

use crate::item_set::ItemSetDocument;

/// An item set together with the group and game it was taken from.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedItemSet {
    pub subject_id: u64,
    pub category_id: u64,
    /// The center game of the largest cluster.
    pub game_id: u64,
    pub item_set: ItemSetDocument,
}

/// Builds the item set of one group, or `None` if its games form no cluster.
pub fn generate_for_group(
    group: &GameGroup,
    title: &str,
    config: &DbscanConfig,
    comparer: &Comparer,
) -> Result<Option<GeneratedItemSet>, ClusterError> {
    let clusters = dbscan(&group.games, config, comparer)?;
    let Some(cluster) = largest(&clusters) else {
        return Ok(None);
    };

    let center = cluster.center(comparer)?;
    tracing::debug!(
        subject = group.subject_id,
        category = group.category_id,
        cluster = cluster.id().get(),
        members = cluster.len(),
        game = center.game_id,
        "picked typical build"
    );

    Ok(Some(GeneratedItemSet {
        subject_id: group.subject_id,
        category_id: group.category_id,
        game_id: center.game_id,
        item_set: ItemSetDocument::from_timeline(
            title,
            &center.timeline,
            comparer.config().window_seconds,
        ),
    }))
}

/// Runs the generate command.
pub fn run<W: Write>(
    out: &mut W,
    groups: &[GameGroup],
    title: &str,
    config: &DbscanConfig,
    comparer: &Comparer,
) -> Result<()> {
    let results: Vec<Option<GeneratedItemSet>> = groups
        .par_iter()
        .map(|group| generate_for_group(group, title, config, comparer))
        .collect::<Result<_, ClusterError>>()?;

    let mut item_sets = Vec::with_capacity(results.len());
    for (group, result) in groups.iter().zip(results) {
        match result {
            Some(item_set) => item_sets.push(item_set),
            None => eprintln!(
                "Player {}, champion {}: no clusters, skipped.",
                group.subject_id, group.category_id
            ),
        }
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&item_sets)?)?;
    Ok(())
}
