//! Cluster center selection.

use crate::cluster::{ClusterError, HasTimeline};
use crate::compare::Comparer;

/// Picks the representative member of a cluster.
///
/// The center is the member with the lowest total distance to every other
/// member. Ties go to the longer timeline, then to the earlier member.
/// A member at distance 0 from that center with a longer timeline replaces
/// it: it is just as central and shows more of the build.
pub fn center_of<'a, T: HasTimeline>(
    members: &[&'a T],
    comparer: &Comparer,
) -> Result<&'a T, ClusterError> {
    if members.is_empty() {
        return Err(ClusterError::EmptyCluster);
    }

    let distances = distance_matrix(members, comparer);
    let row_sums: Vec<usize> = distances.iter().map(|row| row.iter().sum()).collect();
    let length = |index: usize| members[index].timeline().len();

    let mut best = 0;
    for index in 1..members.len() {
        let lower = row_sums[index] < row_sums[best];
        let tied_but_longer = row_sums[index] == row_sums[best] && length(index) > length(best);
        if lower || tied_but_longer {
            best = index;
        }
    }

    let mut center = best;
    for (index, &distance) in distances[best].iter().enumerate() {
        if distance == 0 && length(index) > length(center) {
            center = index;
        }
    }

    tracing::debug!(
        members = members.len(),
        row_sum = row_sums[best],
        center,
        "selected cluster center"
    );
    Ok(members[center])
}

/// Symmetric pairwise distances; each unordered pair is computed once.
fn distance_matrix<T: HasTimeline>(members: &[&T], comparer: &Comparer) -> Vec<Vec<usize>> {
    let n = members.len();
    let mut distances = vec![vec![0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let distance = comparer.distance(members[i].timeline(), members[j].timeline());
            distances[i][j] = distance;
            distances[j][i] = distance;
        }
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{DbscanConfig, dbscan};
    use crate::testing::spaced;
    use crate::timeline::Timeline;

    fn position(points: &[Timeline], chosen: &Timeline) -> usize {
        points
            .iter()
            .position(|point| std::ptr::eq(point, chosen))
            .unwrap()
    }

    #[test]
    fn empty_cluster_is_rejected() {
        let members: Vec<&Timeline> = Vec::new();
        assert_eq!(
            center_of(&members, &Comparer::default()).unwrap_err(),
            ClusterError::EmptyCluster
        );
    }

    #[test]
    fn single_member_is_its_own_center() {
        let points = vec![spaced(&[1055, 1038], 16)];
        let members: Vec<&Timeline> = points.iter().collect();
        let center = center_of(&members, &Comparer::default()).unwrap();
        assert_eq!(position(&points, center), 0);
    }

    #[test]
    fn strict_minimum_row_sum_wins() {
        // Distances from member 1: 1, 1, 1. Every other member sums higher.
        let points = vec![
            spaced(&[1055, 1038, 1036, 3087], 16),
            spaced(&[1055, 1038, 1036, 1037], 16),
            spaced(&[1055, 1038, 1039, 1037], 16),
            spaced(&[1055, 1052, 1036, 1037], 16),
        ];
        let members: Vec<&Timeline> = points.iter().collect();
        let center = center_of(&members, &Comparer::default()).unwrap();
        assert_eq!(position(&points, center), 1);
    }

    #[test]
    fn row_sum_tie_goes_to_longer_timeline() {
        // Both members sum to 3, but member 1 has more items.
        let points = vec![
            spaced(&[1055, 1038], 16),
            spaced(&[1036, 1037, 1039], 16),
        ];
        let members: Vec<&Timeline> = points.iter().collect();
        let center = center_of(&members, &Comparer::default()).unwrap();
        assert_eq!(position(&points, center), 1);
    }

    #[test]
    fn row_sum_tie_with_equal_length_keeps_first() {
        let points = vec![spaced(&[1055, 1038], 16), spaced(&[1036, 1037], 16)];
        let members: Vec<&Timeline> = points.iter().collect();
        let center = center_of(&members, &Comparer::default()).unwrap();
        assert_eq!(position(&points, center), 0);
    }

    #[test]
    fn longer_zero_distance_twin_overrides_row_sum_winner() {
        // Member 0 has the lowest row sum; member 2 extends it and is at
        // distance 0 from it, so member 2 is returned.
        let points = vec![
            spaced(&[3340, 1055, 1038, 1054], 16),
            spaced(&[3340, 1055, 1038, 2049], 16),
            spaced(&[3340, 1055, 1038, 1054, 2049, 1037, 1036, 1039, 1038], 16),
            spaced(&[3340, 1055, 1036, 1054], 16),
        ];
        let members: Vec<&Timeline> = points.iter().collect();
        let center = center_of(&members, &Comparer::default()).unwrap();
        assert_eq!(position(&points, center), 2);
    }

    #[test]
    fn centers_of_clustered_builds() {
        let points = vec![
            spaced(&[3340, 2003, 1055, 1038, 1054], 16),
            spaced(&[3340, 2003, 1055, 1038, 2049], 16),
            spaced(
                &[3340, 2003, 1055, 1038, 1054, 2049, 1037, 1036, 1039, 1038],
                16,
            ),
            spaced(&[3041, 3181, 3042, 3301, 1052], 16),
            spaced(&[3041, 3181, 3042, 3301, 1052], 16),
        ];
        let comparer = Comparer::default();
        let clusters = dbscan(&points, &DbscanConfig { eps: 3, min_pts: 2 }, &comparer).unwrap();
        assert_eq!(clusters.len(), 2);

        let first = clusters[0].center(&comparer).unwrap();
        assert_eq!(position(&points, first), 2);

        // Identical members: the first one stays the center
        let second = clusters[1].center(&comparer).unwrap();
        assert_eq!(position(&points, second), 3);
    }
}
