//! Density-based clustering (DBSCAN) over timelines.
//!
//! Points whose eps-neighborhood (distance <= `eps`, the point itself
//! included) holds at least `min_pts` members are core points. Clusters grow
//! from core points through every point density-reachable from them; points
//! reachable from no core point are noise.
//!
//! Cluster tags live only for the duration of one [`dbscan`] call.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::center::center_of;
use crate::compare::Comparer;
use crate::timeline::Timeline;

/// An entity that can be clustered by its purchase timeline.
///
/// This trait allows clustering to work with different entity
/// representations (e.g., a [`crate::Game`], or a bare [`Timeline`] in tests).
pub trait HasTimeline {
    fn timeline(&self) -> &Timeline;
}

impl HasTimeline for Timeline {
    fn timeline(&self) -> &Timeline {
        self
    }
}

impl<T: HasTimeline + ?Sized> HasTimeline for &T {
    fn timeline(&self) -> &Timeline {
        (**self).timeline()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClusterError {
    #[error("min_pts must be at least 1")]
    InvalidMinPts,

    #[error("cannot select the center of an empty cluster")]
    EmptyCluster,
}

/// Classification of a point during one clustering run.
///
/// Transitions: `Unclassified` becomes `Noise` or `Cluster`; `Noise` may be
/// upgraded to `Cluster`; a cluster tag never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterTag {
    #[default]
    Unclassified,
    Noise,
    Cluster(NonZeroUsize),
}

impl ClusterTag {
    /// Returns the cluster ID, if the point belongs to a cluster.
    pub const fn cluster_id(self) -> Option<NonZeroUsize> {
        match self {
            Self::Cluster(id) => Some(id),
            Self::Unclassified | Self::Noise => None,
        }
    }
}

/// Configuration for [`dbscan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbscanConfig {
    /// Maximum distance (inclusive) for two points to be neighbors.
    /// Default: 5.
    pub eps: usize,

    /// Minimum neighborhood size, the point itself included, for a core point.
    /// Default: 3.
    pub min_pts: usize,
}

impl Default for DbscanConfig {
    fn default() -> Self {
        Self { eps: 5, min_pts: 3 }
    }
}

/// A non-empty group of points sharing one cluster ID.
#[derive(Debug)]
pub struct Cluster<'a, T> {
    id: NonZeroUsize,
    members: Vec<&'a T>,
}

impl<'a, T> Cluster<'a, T> {
    pub const fn id(&self) -> NonZeroUsize {
        self.id
    }

    /// Members in input order.
    pub fn members(&self) -> &[&'a T] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.members.iter().copied()
    }
}

impl<'a, T: HasTimeline> Cluster<'a, T> {
    /// Returns the representative member; see [`center_of`].
    pub fn center(&self, comparer: &Comparer) -> Result<&'a T, ClusterError> {
        center_of(&self.members, comparer)
    }
}

impl<T> Clone for Cluster<'_, T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            members: self.members.clone(),
        }
    }
}

/// Groups points into clusters, ordered by ascending cluster ID.
///
/// Noise points are left out. An empty input, or one without any core point,
/// gives an empty list.
pub fn dbscan<'a, T: HasTimeline>(
    points: &'a [T],
    config: &DbscanConfig,
    comparer: &Comparer,
) -> Result<Vec<Cluster<'a, T>>, ClusterError> {
    if config.min_pts == 0 {
        return Err(ClusterError::InvalidMinPts);
    }

    let mut run = Run {
        points,
        tags: vec![ClusterTag::Unclassified; points.len()],
        config,
        comparer,
    };

    let mut next_id = NonZeroUsize::MIN;
    for index in 0..points.len() {
        if run.tags[index] == ClusterTag::Unclassified && run.expand(index, next_id) {
            next_id = next_id.saturating_add(1);
        }
    }

    let clusters = run.collect(next_id);
    let noise = run
        .tags
        .iter()
        .filter(|tag| **tag == ClusterTag::Noise)
        .count();
    tracing::debug!(
        points = points.len(),
        clusters = clusters.len(),
        noise,
        eps = config.eps,
        min_pts = config.min_pts,
        "dbscan finished"
    );

    Ok(clusters)
}

/// State of a single clustering run.
struct Run<'a, 'c, T> {
    points: &'a [T],
    tags: Vec<ClusterTag>,
    config: &'c DbscanConfig,
    comparer: &'c Comparer,
}

impl<'a, T: HasTimeline> Run<'a, '_, T> {
    /// Indices of every point within `eps` of `index`, itself included.
    fn region(&self, index: usize) -> Vec<usize> {
        let origin = self.points[index].timeline();
        self.points
            .iter()
            .enumerate()
            .filter(|(_, point)| self.comparer.distance(origin, point.timeline()) <= self.config.eps)
            .map(|(neighbor, _)| neighbor)
            .collect()
    }

    /// Tries to grow a new cluster from `index`.
    ///
    /// Returns false (and marks the point as noise) if it is not a core point.
    fn expand(&mut self, index: usize, id: NonZeroUsize) -> bool {
        let region = self.region(index);
        if region.len() < self.config.min_pts {
            self.tags[index] = ClusterTag::Noise;
            return false;
        }

        // Border points of an earlier cluster inside this region move here
        for &neighbor in &region {
            self.tags[neighbor] = ClusterTag::Cluster(id);
        }

        let mut seeds: VecDeque<usize> = region.into_iter().filter(|&n| n != index).collect();
        while let Some(current) = seeds.pop_front() {
            let result = self.region(current);
            if result.len() < self.config.min_pts {
                continue;
            }
            for neighbor in result {
                match self.tags[neighbor] {
                    ClusterTag::Unclassified => {
                        seeds.push_back(neighbor);
                        self.tags[neighbor] = ClusterTag::Cluster(id);
                    }
                    ClusterTag::Noise => self.tags[neighbor] = ClusterTag::Cluster(id),
                    ClusterTag::Cluster(_) => {}
                }
            }
        }

        tracing::trace!(point = index, cluster = id.get(), "expanded cluster");
        true
    }

    /// Groups tagged points by cluster ID, keeping input order within each.
    fn collect(&self, next_id: NonZeroUsize) -> Vec<Cluster<'a, T>> {
        let mut groups: Vec<Vec<&'a T>> = vec![Vec::new(); next_id.get() - 1];
        for (point, tag) in self.points.iter().zip(&self.tags) {
            if let Some(id) = tag.cluster_id() {
                groups[id.get() - 1].push(point);
            }
        }

        groups
            .into_iter()
            .zip(1..)
            .filter(|(members, _)| !members.is_empty())
            .filter_map(|(members, id)| {
                NonZeroUsize::new(id).map(|id| Cluster { id, members })
            })
            .collect()
    }
}

/// Returns the cluster with the most members; the lowest ID wins ties.
pub fn largest<'c, 'a, T>(clusters: &'c [Cluster<'a, T>]) -> Option<&'c Cluster<'a, T>> {
    clusters
        .iter()
        .rev()
        .max_by_key(|cluster| cluster.len())
}
