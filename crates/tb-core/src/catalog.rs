//! Item catalog lookup.
//!
//! The catalog is an injected capability: the core never fetches item data
//! itself. Callers provide an [`ItemCatalog`], typically a [`StaticCatalog`]
//! loaded from a local catalog document.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::item::{ItemId, ItemInfo};

/// Errors raised while resolving or loading item metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Neither the catalog nor the legacy remap table knows this ID.
    #[error("unknown item id: {0}")]
    UnknownItem(ItemId),

    /// A catalog document used a key that is not a numeric item ID.
    #[error("invalid item id in catalog: {0:?}")]
    InvalidKey(String),

    /// The catalog document could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(String),
}

/// Retired item IDs and the current IDs that replaced them.
///
/// Old games reference these IDs, but current catalogs only list the
/// replacements. Comparison is by ID, so the remap has to stay stable.
pub const LEGACY_ITEM_IDS: &[(u32, u32)] = &[
    (3250, 1304),
    (3251, 1302),
    (3252, 1300),
    (3253, 1303),
    (3254, 1301),
    (3255, 1314),
    (3256, 1312),
    (3257, 1310),
    (3258, 1313),
    (3259, 1311),
    (3260, 1319),
    (3261, 1317),
    (3262, 1315),
    (3263, 1318),
    (3264, 1316),
    (3265, 1324),
    (3266, 1322),
    (3267, 1320),
    (3268, 1323),
    (3269, 1321),
    (3270, 1329),
    (3271, 1327),
    (3272, 1325),
    (3273, 1328),
    (3274, 1326),
    (3275, 1334),
    (3276, 1332),
    (3277, 1330),
    (3278, 1333),
    (3279, 1331),
    (3280, 1309),
    (3281, 1307),
    (3282, 1305),
    (3283, 1308),
    (3284, 1306),
];

/// Returns the current ID for a retired item ID, if it has one.
pub fn legacy_replacement(id: ItemId) -> Option<ItemId> {
    LEGACY_ITEM_IDS
        .binary_search_by_key(&id.get(), |&(legacy, _)| legacy)
        .ok()
        .map(|index| ItemId::new(LEGACY_ITEM_IDS[index].1))
}

/// A source of item metadata.
pub trait ItemCatalog {
    /// Looks up an ID in the primary catalog only.
    fn lookup(&self, id: ItemId) -> Option<&ItemInfo>;

    /// Resolves an ID, falling back to the legacy remap table on a miss.
    fn resolve(&self, id: ItemId) -> Result<&ItemInfo, CatalogError> {
        if let Some(info) = self.lookup(id) {
            return Ok(info);
        }

        legacy_replacement(id)
            .and_then(|current| self.lookup(current))
            .ok_or(CatalogError::UnknownItem(id))
    }
}

/// An in-memory item catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: HashMap<ItemId, ItemInfo>,
}

/// Catalog document layout: `{"data": {"<id>": {"name": ..., "consumed": ...}}}`.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    data: HashMap<String, ItemInfo>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog document.
    ///
    /// Entries may carry extra fields; only `name` and `consumed` are read.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

        document
            .data
            .into_iter()
            .map(|(key, info)| {
                key.parse::<ItemId>()
                    .map(|id| (id, info))
                    .map_err(|_| CatalogError::InvalidKey(key))
            })
            .collect()
    }

    pub fn insert(&mut self, id: ItemId, info: ItemInfo) -> Option<ItemInfo> {
        self.items.insert(id, info)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for StaticCatalog {
    fn lookup(&self, id: ItemId) -> Option<&ItemInfo> {
        self.items.get(&id)
    }
}

impl FromIterator<(ItemId, ItemInfo)> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = (ItemId, ItemInfo)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
