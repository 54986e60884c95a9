//! Item purchase timelines.
//!
//! A timeline is the chronological list of items one player bought in one
//! game. Purchases are append-only and must never go back in time.

use std::fmt;
use std::ops::Index;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogError, ItemCatalog};
use crate::item::{Item, ItemId};

/// Name of the first block produced by [`Timeline::segment`].
pub const FIRST_PURCHASE: &str = "First Purchase";

/// Name of every block after the first.
pub const NEXT_PURCHASE: &str = "Next Purchase";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// The item was bought before the current last item.
    #[error("item {id} at {offset_ms} ms is earlier than the last purchase at {last_ms} ms")]
    OutOfOrder {
        id: ItemId,
        offset_ms: i64,
        last_ms: i64,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A group of items bought in one store visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemBlock {
    pub name: String,
    pub items: Vec<Item>,
}

impl ItemBlock {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }
}

/// Items in chronological purchase order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct Timeline {
    items: Vec<Item>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a timeline from `(item id, offset)` purchases in feed order.
    ///
    /// Purchases that cannot be resolved, or that arrive earlier than the
    /// purchase before them, are dropped with a warning.
    pub fn from_purchases<I, C>(purchases: I, catalog: &C) -> Self
    where
        I: IntoIterator<Item = (ItemId, TimeDelta)>,
        C: ItemCatalog + ?Sized,
    {
        let mut timeline = Self::new();
        for (id, offset) in purchases {
            if let Err(e) = timeline.push_resolved(id, offset, catalog) {
                tracing::warn!(error = %e, item = %id, "dropping purchase");
            }
        }
        timeline
    }

    /// Appends an item to the end of the timeline.
    pub fn push(&mut self, item: Item) -> Result<(), TimelineError> {
        if let Some(last) = self.items.last() {
            if last.purchase_offset > item.purchase_offset {
                return Err(TimelineError::OutOfOrder {
                    id: item.id,
                    offset_ms: item.purchase_offset.num_milliseconds(),
                    last_ms: last.purchase_offset.num_milliseconds(),
                });
            }
        }
        self.items.push(item);
        Ok(())
    }

    /// Resolves an item through the catalog and appends it.
    pub fn push_resolved<C: ItemCatalog + ?Sized>(
        &mut self,
        id: ItemId,
        offset: TimeDelta,
        catalog: &C,
    ) -> Result<(), TimelineError> {
        let item = Item::resolve(id, offset, catalog)?;
        self.push(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    /// Returns a copy holding only the items that match `keep`.
    ///
    /// A subsequence of a chronological list is still chronological.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&Item) -> bool) -> Self {
        Self {
            items: self.items.iter().filter(|item| keep(item)).cloned().collect(),
        }
    }

    /// Splits the timeline into store visits.
    ///
    /// Each block opens at its first unplaced item and takes every following
    /// item bought less than `window_seconds` after it. The next block opens
    /// at the first item outside that window. The first block is named
    /// [`FIRST_PURCHASE`], the rest [`NEXT_PURCHASE`].
    pub fn segment(&self, window_seconds: u32) -> Vec<ItemBlock> {
        let window = TimeDelta::seconds(i64::from(window_seconds));
        let mut blocks = Vec::new();
        let mut start = 0;

        while start < self.items.len() {
            let opened_at = self.items[start].purchase_offset;
            let end = self.items[start + 1..]
                .iter()
                .position(|item| {
                    item.purchase_offset
                        .checked_sub(&opened_at)
                        .is_none_or(|elapsed| elapsed >= window)
                })
                .map_or(self.items.len(), |pos| start + 1 + pos);

            blocks.push(ItemBlock::new(NEXT_PURCHASE, self.items[start..end].to_vec()));
            start = end;
        }

        if let Some(first) = blocks.first_mut() {
            first.name = FIRST_PURCHASE.to_string();
        }
        blocks
    }
}

impl TryFrom<Vec<Item>> for Timeline {
    type Error = TimelineError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        let mut timeline = Self {
            items: Vec::with_capacity(items.len()),
        };
        for item in items {
            timeline.push(item)?;
        }
        Ok(timeline)
    }
}

impl From<Timeline> for Vec<Item> {
    fn from(timeline: Timeline) -> Self {
        timeline.items
    }
}

impl Index<usize> for Timeline {
    type Output = Item;

    fn index(&self, index: usize) -> &Item {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Renders item names joined by arrows; purchase times are omitted.
impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(&item.name)?;
        }
        Ok(())
    }
}
