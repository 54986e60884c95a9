//! Shared fixtures for unit tests.

use chrono::TimeDelta;

use crate::catalog::StaticCatalog;
use crate::item::{ItemId, ItemInfo};
use crate::timeline::Timeline;

pub const BLADE: ItemId = ItemId::new(1055);
pub const POTION: ItemId = ItemId::new(2003);
pub const TRINKET: ItemId = ItemId::new(3340);
pub const BISCUIT: ItemId = ItemId::new(2009);
pub const SHIV: ItemId = ItemId::new(3087);

/// A small catalog covering every ID used by the unit tests.
pub fn catalog() -> StaticCatalog {
    [
        (1036, "Long Sword", false),
        (1037, "Pickaxe", false),
        (1038, "B. F. Sword", false),
        (1039, "Hunter's Machete", false),
        (1052, "Amplifying Tome", false),
        (1054, "Doran's Shield", false),
        (1055, "Doran's Blade", false),
        (2003, "Health Potion", true),
        (2009, "Total Biscuit of Rejuvenation", true),
        (2049, "Sightstone", false),
        (3041, "Mejai's Soulstealer", false),
        (3042, "Muramana", false),
        (3048, "Seraph's Embrace", false),
        (3083, "Warmog's Armor", false),
        (3086, "Zeal", false),
        (3087, "Statikk Shiv", false),
        (3181, "Sanguine Blade", false),
        (3301, "Ancient Coin", false),
        (3340, "Warding Totem (Trinket)", false),
    ]
    .into_iter()
    .map(|(id, name, consumed)| (ItemId::new(id), ItemInfo::new(name, consumed)))
    .collect()
}

/// Builds a timeline from `(item id, purchase second)` pairs.
pub fn timeline(purchases: &[(u32, i64)]) -> Timeline {
    let catalog = catalog();
    let mut timeline = Timeline::new();
    for &(id, second) in purchases {
        timeline
            .push_resolved(ItemId::new(id), TimeDelta::seconds(second), &catalog)
            .unwrap();
    }
    timeline
}

/// Builds a timeline whose purchases are spaced `step` seconds apart.
pub fn spaced(ids: &[u32], step: i64) -> Timeline {
    let purchases: Vec<(u32, i64)> = (0_i64..)
        .zip(ids)
        .map(|(index, &id)| (id, index * step))
        .collect();
    timeline(&purchases)
}
