//! Distance between purchase timelines.
//!
//! # Algorithm Summary
//!
//! 1. Strip consumables from both timelines (if configured)
//! 2. Optionally regroup: split into purchase windows and sort each window by
//!    item ID, so items bought together compare equal in any order
//! 3. Timelines that agree up to the end of the shorter one are distance 0
//! 4. Otherwise take the edit distance, keeping the smaller of the plain and
//!    regrouped variants
//!
//! Taking the minimum of two strategies keeps the result symmetric but does
//! not satisfy the triangle inequality.

use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::timeline::Timeline;

/// Configuration for timeline comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparerConfig {
    /// Drop consumables (potions, wards, ...) before comparing.
    /// Default: true.
    pub ignore_consumables: bool,

    /// Allow items bought within one purchase window to match in any order.
    /// Default: true.
    pub group_by_time: bool,

    /// Purchase window length used when `group_by_time` is set.
    /// Default: 15 seconds.
    pub window_seconds: u32,
}

impl Default for ComparerConfig {
    fn default() -> Self {
        Self {
            ignore_consumables: true,
            group_by_time: true,
            window_seconds: 15,
        }
    }
}

/// Computes distances between timelines under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Comparer {
    config: ComparerConfig,
}

impl Comparer {
    pub const fn new(config: ComparerConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ComparerConfig {
        &self.config
    }

    /// Returns the distance between two timelines.
    ///
    /// A timeline that continues another one identically is distance 0 from
    /// it, whatever its extra length.
    pub fn distance(&self, a: &Timeline, b: &Timeline) -> usize {
        let a = self.strip(a);
        let b = self.strip(b);
        let plain_a: Vec<ItemId> = a.ids().collect();
        let plain_b: Vec<ItemId> = b.ids().collect();

        if identical_ignoring_length(&plain_a, &plain_b) {
            return 0;
        }

        if !self.config.group_by_time {
            return edit_distance(&plain_a, &plain_b);
        }

        let grouped_a = self.regroup(&a);
        let grouped_b = self.regroup(&b);
        if identical_ignoring_length(&grouped_a, &grouped_b) {
            return 0;
        }

        // Regrouping one side but not the other can make things look worse
        edit_distance(&plain_a, &plain_b).min(edit_distance(&grouped_a, &grouped_b))
    }

    fn strip(&self, timeline: &Timeline) -> Timeline {
        if self.config.ignore_consumables {
            timeline.filtered(|item| !item.is_consumable)
        } else {
            timeline.clone()
        }
    }

    /// Flattens the purchase windows back into one sequence, each window
    /// sorted by item ID. Offsets are not needed past this point.
    fn regroup(&self, timeline: &Timeline) -> Vec<ItemId> {
        let mut ids = Vec::with_capacity(timeline.len());
        for block in timeline.segment(self.config.window_seconds) {
            let start = ids.len();
            ids.extend(block.ids());
            ids[start..].sort_unstable();
        }
        ids
    }
}

/// True if both sequences match over the length of the shorter one.
fn identical_ignoring_length(a: &[ItemId], b: &[ItemId]) -> bool {
    a.iter().zip(b).all(|(x, y)| x == y)
}

/// Levenshtein distance with unit insert, delete and substitute costs.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows are enough: the previous row and the one being filled
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(x != y);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(substitution);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
