//! Consumable item counters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest count a mutated counter can hold.
pub const MAX_ITEM_COUNT: i32 = 99;

/// Starting count of the premium item. Clamped on first mutation.
pub const PREMIUM_START_COUNT: i32 = 299;

/// The four consumable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    /// Basic food (item1)
    Kibble,
    /// Better food (item2)
    Fish,
    /// Sugary gift (item3)
    Candy,
    /// Premium gift (item4)
    Feast,
}

impl Item {
    /// All items in slot order.
    pub const ALL: [Self; 4] = [Self::Kibble, Self::Fish, Self::Candy, Self::Feast];

    /// Whether the item can be fed.
    #[must_use]
    pub const fn is_food(self) -> bool {
        matches!(self, Self::Kibble | Self::Fish)
    }

    /// Whether the item can be gifted.
    #[must_use]
    pub const fn is_gift(self) -> bool {
        matches!(self, Self::Candy | Self::Feast)
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kibble => "kibble",
            Self::Fish => "fish",
            Self::Candy => "candy",
            Self::Feast => "feast",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Item {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kibble" | "item1" => Ok(Self::Kibble),
            "fish" | "item2" => Ok(Self::Fish),
            "candy" | "item3" => Ok(Self::Candy),
            "feast" | "item4" => Ok(Self::Feast),
            other => Err(format!("unknown item: {other}")),
        }
    }
}

/// Item counts, stored as `item1..item4` on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredInventory")]
pub struct Inventory {
    item1: i32,
    item2: i32,
    item3: i32,
    item4: i32,
}

#[derive(Deserialize)]
struct StoredInventory {
    item1: i32,
    item2: i32,
    item3: i32,
    item4: i32,
}

// The premium counter may legitimately sit at its untouched starting count.
impl From<StoredInventory> for Inventory {
    fn from(stored: StoredInventory) -> Self {
        Self {
            item1: stored.item1.clamp(0, MAX_ITEM_COUNT),
            item2: stored.item2.clamp(0, MAX_ITEM_COUNT),
            item3: stored.item3.clamp(0, MAX_ITEM_COUNT),
            item4: stored.item4.clamp(0, PREMIUM_START_COUNT),
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            item1: MAX_ITEM_COUNT,
            item2: MAX_ITEM_COUNT,
            item3: MAX_ITEM_COUNT,
            item4: PREMIUM_START_COUNT,
        }
    }
}

impl Inventory {
    /// Creates a default inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count of an item.
    #[must_use]
    pub const fn count(&self, item: Item) -> i32 {
        match item {
            Item::Kibble => self.item1,
            Item::Fish => self.item2,
            Item::Candy => self.item3,
            Item::Feast => self.item4,
        }
    }

    /// Checks if at least one unit is available.
    #[must_use]
    pub const fn has(&self, item: Item) -> bool {
        self.count(item) > 0
    }

    /// Sets a count, clamped to `0..=99`.
    pub fn set(&mut self, item: Item, count: i32) {
        let count = count.clamp(0, MAX_ITEM_COUNT);
        match item {
            Item::Kibble => self.item1 = count,
            Item::Fish => self.item2 = count,
            Item::Candy => self.item3 = count,
            Item::Feast => self.item4 = count,
        }
    }

    /// Adds units, clamped.
    pub fn add(&mut self, item: Item, amount: i32) {
        self.set(item, self.count(item).saturating_add(amount));
    }

    /// Removes units, clamped at zero.
    pub fn decrease(&mut self, item: Item, amount: i32) {
        self.set(item, self.count(item).saturating_sub(amount));
    }

    /// Uses up one unit. Returns false when out of stock.
    pub fn consume(&mut self, item: Item) -> bool {
        if !self.has(item) {
            return false;
        }
        self.decrease(item, 1);
        true
    }
}
