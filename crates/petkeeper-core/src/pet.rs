//! The pet aggregate and the game-state envelope written to save slots.

use chrono::{DateTime, NaiveTime, Utc};
use petkeeper_common::{SaveSlot, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, Item};
use crate::playtime::{format_play_time, AllowedWindow};
use crate::species::Species;
use crate::vitals::VitalStats;

const fn default_food() -> Item {
    Item::Kibble
}

const fn default_gift() -> Item {
    Item::Candy
}

/// A pet: identity, vital stats, inventory, score and play-time accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    name: String,
    species: Species,
    save_id: SaveSlot,
    #[serde(default)]
    stats: VitalStats,
    #[serde(default)]
    inventory: Inventory,
    #[serde(default)]
    score: i64,
    /// Seconds, across all sessions
    #[serde(default)]
    total_time_spent: u64,
    /// Seconds, this session only
    #[serde(default)]
    current_play_time: u64,
    /// Seconds per session; zero is unlimited
    #[serde(default)]
    time_limit: u64,
    #[serde(default)]
    start_time: Option<NaiveTime>,
    #[serde(default)]
    end_time: Option<NaiveTime>,
    #[serde(default = "default_food")]
    food_item: Item,
    #[serde(default = "default_gift")]
    gift_item: Item,
}

impl Pet {
    /// Creates a fresh pet with default stats and inventory.
    #[must_use]
    pub fn new(name: impl Into<String>, species: Species, save_id: SaveSlot) -> Self {
        Self {
            name: name.into(),
            species,
            save_id,
            stats: VitalStats::default(),
            inventory: Inventory::default(),
            score: 0,
            total_time_spent: 0,
            current_play_time: 0,
            time_limit: 0,
            start_time: None,
            end_time: None,
            food_item: default_food(),
            gift_item: default_gift(),
        }
    }

    /// Pet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Species.
    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    /// Slot this pet is saved to.
    #[must_use]
    pub const fn save_id(&self) -> SaveSlot {
        self.save_id
    }

    /// Vital stats.
    #[must_use]
    pub const fn stats(&self) -> &VitalStats {
        &self.stats
    }

    /// Mutable vital stats.
    pub fn stats_mut(&mut self) -> &mut VitalStats {
        &mut self.stats
    }

    /// Inventory.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable inventory.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Score as last synced from the session.
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Stores the score.
    pub fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    /// Total seconds played across sessions.
    #[must_use]
    pub const fn total_time_spent(&self) -> u64 {
        self.total_time_spent
    }

    /// Seconds played in the current session.
    #[must_use]
    pub const fn current_play_time(&self) -> u64 {
        self.current_play_time
    }

    /// Total play time as `HH:MM:SS`.
    #[must_use]
    pub fn formatted_play_time(&self) -> String {
        format_play_time(self.total_time_spent)
    }

    /// Counts one played second.
    pub fn record_play_second(&mut self) {
        self.total_time_spent = self.total_time_spent.saturating_add(1);
        self.current_play_time = self.current_play_time.saturating_add(1);
    }

    /// Starts session accounting from zero.
    pub fn reset_current_play_time(&mut self) {
        self.current_play_time = 0;
    }

    /// Clears the lifetime counter.
    pub fn reset_total_time(&mut self) {
        self.total_time_spent = 0;
    }

    /// Session time limit in seconds; zero is unlimited.
    #[must_use]
    pub const fn time_limit(&self) -> u64 {
        self.time_limit
    }

    /// Sets the session time limit in seconds.
    pub fn set_time_limit(&mut self, seconds: u64) {
        self.time_limit = seconds;
    }

    /// Whether the session time limit has been used up.
    #[must_use]
    pub const fn time_limit_reached(&self) -> bool {
        self.time_limit > 0 && self.current_play_time >= self.time_limit
    }

    /// Allowed play window, if both ends are set.
    #[must_use]
    pub fn allowed_window(&self) -> Option<AllowedWindow> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(AllowedWindow::new(start, end)),
            _ => None,
        }
    }

    /// Sets or clears the allowed window.
    pub fn set_allowed_window(&mut self, window: Option<AllowedWindow>) {
        self.start_time = window.map(|w| w.start);
        self.end_time = window.map(|w| w.end);
    }

    /// Item used by Feed.
    #[must_use]
    pub const fn food_item(&self) -> Item {
        self.food_item
    }

    /// Item used by Gift.
    #[must_use]
    pub const fn gift_item(&self) -> Item {
        self.gift_item
    }

    /// Selects the food item. Returns false if `item` is not food.
    pub fn select_food(&mut self, item: Item) -> bool {
        if !item.is_food() {
            return false;
        }
        self.food_item = item;
        true
    }

    /// Selects the gift item. Returns false if `item` is not a gift.
    pub fn select_gift(&mut self, item: Item) -> bool {
        if !item.is_gift() {
            return false;
        }
        self.gift_item = item;
        true
    }
}

/// Unit of serialization: one pet plus session-level flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Save format version
    #[serde(default)]
    pub version: SchemaVersion,
    /// When the state was last written
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
    /// The pet
    pub pet: Pet,
    /// Whether time limits and the allowed window are enforced
    #[serde(default)]
    pub parent_controls_enabled: bool,
}

impl GameState {
    /// Wraps a pet in a current-version envelope.
    #[must_use]
    pub fn new(pet: Pet, parent_controls_enabled: bool) -> Self {
        Self {
            version: SchemaVersion::SAVE_FORMAT,
            saved_at: Utc::now(),
            pet,
            parent_controls_enabled,
        }
    }

    /// Stamps the save time.
    pub fn touch(&mut self) {
        self.saved_at = Utc::now();
    }
}
