//! `tb clusters`: clusters the games of every eligible player/champion group.
//!
//! Groups are independent, so they are clustered in parallel.

use std::io::Write;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use tb_core::{ClusterError, Comparer, DbscanConfig, GameGroup, dbscan};

// ========== Cluster Data ==========

/// Clustering outcome for one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub subject_id: u64,
    pub category_id: u64,
    pub games: usize,
    pub clusters: Vec<ClusterReport>,
    /// Games that belong to no cluster.
    pub noise: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub id: usize,
    pub games: Vec<u64>,
    /// The game whose timeline best represents the cluster.
    pub center: u64,
}

/// Clusters one group and picks the center of each cluster.
pub fn cluster_group(
    group: &GameGroup,
    config: &DbscanConfig,
    comparer: &Comparer,
) -> Result<GroupReport, ClusterError> {
    let clusters = dbscan(&group.games, config, comparer)?;

    let mut reports = Vec::with_capacity(clusters.len());
    for cluster in &clusters {
        reports.push(ClusterReport {
            id: cluster.id().get(),
            games: cluster.iter().map(|game| game.game_id).collect(),
            center: cluster.center(comparer)?.game_id,
        });
    }

    let noise = group
        .games
        .iter()
        .map(|game| game.game_id)
        .filter(|id| !reports.iter().any(|cluster| cluster.games.contains(id)))
        .collect();

    Ok(GroupReport {
        subject_id: group.subject_id,
        category_id: group.category_id,
        games: group.games.len(),
        clusters: reports,
        noise,
    })
}

/// Clusters every group, keeping the input order.
pub fn cluster_groups(
    groups: &[GameGroup],
    config: &DbscanConfig,
    comparer: &Comparer,
) -> Result<Vec<GroupReport>, ClusterError> {
    groups
        .par_iter()
        .map(|group| cluster_group(group, config, comparer))
        .collect()
}

// ========== Human-Readable Output ==========

fn join_ids(ids: &[u64]) -> String {
    ids.iter().map(u64::to_string).collect::<Vec<_>>().join(", ")
}

/// Writes the reports for human reading.
pub fn write_reports<W: Write>(out: &mut W, reports: &[GroupReport], min_games: usize) -> Result<()> {
    if reports.is_empty() {
        writeln!(out, "No player/champion group has at least {min_games} games.")?;
        return Ok(());
    }

    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "Player {}, champion {}: {} games, {} clusters",
            report.subject_id,
            report.category_id,
            report.games,
            report.clusters.len()
        )?;
        if report.clusters.is_empty() {
            writeln!(out, "  No clusters")?;
        }
        for cluster in &report.clusters {
            writeln!(
                out,
                "  Cluster {}: games {} (center {})",
                cluster.id,
                join_ids(&cluster.games),
                cluster.center
            )?;
        }
        if !report.noise.is_empty() {
            writeln!(out, "  Noise: games {}", join_ids(&report.noise))?;
        }
    }
    Ok(())
}

// ========== Public Interface ==========

/// Runs the clusters command.
pub fn run<W: Write>(
    out: &mut W,
    groups: &[GameGroup],
    config: &DbscanConfig,
    comparer: &Comparer,
    min_games: usize,
    json: bool,
) -> Result<()> {
    let reports = cluster_groups(groups, config, comparer)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
    } else {
        write_reports(out, &reports, min_games)?;
    }
    Ok(())
}
