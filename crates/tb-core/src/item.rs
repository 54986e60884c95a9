//! Purchasable items.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, ItemCatalog};

/// Numeric item identifier as issued by the item catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates an item ID from its raw catalog value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw catalog value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Catalog metadata for a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// English display name.
    pub name: String,
    /// Whether the item is used up on purchase or use (potions, wards, ...).
    #[serde(default, rename = "consumed")]
    pub is_consumable: bool,
}

impl ItemInfo {
    pub fn new(name: impl Into<String>, is_consumable: bool) -> Self {
        Self {
            name: name.into(),
            is_consumable,
        }
    }
}

/// A single purchase: what was bought and when.
///
/// Equality, hashing and ordering consider only the item ID. The name is
/// display-only and the offset only matters for timeline ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub is_consumable: bool,
    /// Offset of the purchase from the start of the game.
    #[serde(rename = "purchase_offset_ms", with = "offset_ms")]
    pub purchase_offset: TimeDelta,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        is_consumable: bool,
        purchase_offset: TimeDelta,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            is_consumable,
            purchase_offset,
        }
    }

    /// Builds an item by resolving its metadata through a catalog.
    ///
    /// Fails with [`CatalogError::UnknownItem`] if neither the catalog nor
    /// the legacy remap table knows the ID.
    pub fn resolve<C: ItemCatalog + ?Sized>(
        id: ItemId,
        purchase_offset: TimeDelta,
        catalog: &C,
    ) -> Result<Self, CatalogError> {
        let info = catalog.resolve(id)?;
        Ok(Self::new(id, info.name.clone(), info.is_consumable, purchase_offset))
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// Serializes a purchase offset as whole milliseconds.
mod offset_ms {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(offset: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(offset.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        TimeDelta::try_milliseconds(ms)
            .ok_or_else(|| serde::de::Error::custom(format!("purchase offset out of range: {ms} ms")))
    }
}
