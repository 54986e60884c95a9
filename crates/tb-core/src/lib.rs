//! Core domain logic for typical build detection.
//!
//! This crate contains the fundamental types and logic for:
//! - Items and catalog resolution (with the legacy item-id remap)
//! - Purchase timelines and their segmentation into purchase windows
//! - Timeline comparison: the edit-distance based metric
//! - Density-based clustering (DBSCAN) and cluster center selection
//! - Grouping a purchase feed into per-subject game sets

mod catalog;
mod center;
mod cluster;
mod compare;
mod feed;
mod item;
mod timeline;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogError, ItemCatalog, LEGACY_ITEM_IDS, StaticCatalog, legacy_replacement};
pub use center::center_of;
pub use cluster::{Cluster, ClusterError, ClusterTag, DbscanConfig, HasTimeline, dbscan, largest};
pub use compare::{Comparer, ComparerConfig, edit_distance};
pub use feed::{Game, GameGroup, PurchaseEvent, build_games, group_games};
pub use item::{Item, ItemId, ItemInfo};
pub use timeline::{FIRST_PURCHASE, ItemBlock, NEXT_PURCHASE, Timeline, TimelineError};
