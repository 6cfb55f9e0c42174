//! Discrete player actions.
//!
//! Each action resolves to an [`ActionEffect`]: a delta per metric, an
//! optional one-unit inventory cost, and a score bonus. Applying an effect
//! is all-or-nothing; checks happen in [`PetAction::prepare`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::inventory::Item;
use crate::pet::Pet;
use crate::vitals::Metric;

/// Player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetAction {
    /// Consume the selected food item
    Feed,
    /// Play together
    Play,
    /// Hand over the selected gift item
    Gift,
    /// Go for a run
    Exercise,
    /// Visit the vet
    Vet,
    /// Take a nap
    Sleep,
}

impl PetAction {
    /// All actions.
    pub const ALL: [Self; 6] = [
        Self::Feed,
        Self::Play,
        Self::Gift,
        Self::Exercise,
        Self::Vet,
        Self::Sleep,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Gift => "gift",
            Self::Exercise => "exercise",
            Self::Vet => "vet",
            Self::Sleep => "sleep",
        }
    }

    /// Resolves the effect, using the pet's selected items for Feed and Gift.
    #[must_use]
    pub const fn effect(self, food: Item, gift: Item) -> ActionEffect {
        match self {
            Self::Feed => ActionEffect::consume(food),
            Self::Gift => ActionEffect::consume(gift),
            Self::Play => ActionEffect::free([-10, 20, -15, 0], 50),
            Self::Exercise => ActionEffect::free([-20, -5, 10, 0], 25),
            Self::Vet => ActionEffect::free([0, -10, 30, 50], 0),
            Self::Sleep => ActionEffect::free([0, 0, 10, 0], 0),
        }
    }

    /// Resolves the effect for `pet` and checks mood and stock.
    ///
    /// Session-level checks (paused, asleep, game over) are the caller's.
    ///
    /// # Errors
    ///
    /// [`RejectReason::Angry`] if the pet is angry and the action would not
    /// cheer it up, [`RejectReason::OutOfStock`] if the item cost can't be paid.
    pub fn prepare(self, pet: &Pet) -> Result<ActionEffect, RejectReason> {
        let effect = self.effect(pet.food_item(), pet.gift_item());
        if pet.stats().is_angry() && !effect.cheers_up() {
            return Err(RejectReason::Angry);
        }
        if let Some(item) = effect.cost {
            if !pet.inventory().has(item) {
                return Err(RejectReason::OutOfStock(item));
            }
        }
        Ok(effect)
    }
}

impl fmt::Display for PetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PetAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// What an action does once accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEffect {
    /// Deltas in `[hunger, happiness, energy, health]` order
    pub deltas: [i32; 4],
    /// Item consumed, one unit
    pub cost: Option<Item>,
    /// Points added to the score
    pub score: i64,
}

impl ActionEffect {
    const fn free(deltas: [i32; 4], score: i64) -> Self {
        Self {
            deltas,
            cost: None,
            score,
        }
    }

    /// Effect of consuming one unit of `item`.
    #[must_use]
    pub const fn consume(item: Item) -> Self {
        let deltas = match item {
            Item::Kibble => [20, 10, 0, 0],
            Item::Fish => [30, 5, 0, 0],
            Item::Candy => [0, 10, 20, -40],
            Item::Feast => [60, 15, 0, 0],
        };
        Self {
            deltas,
            cost: Some(item),
            score: 0,
        }
    }

    /// Delta for one metric.
    #[must_use]
    pub const fn delta(&self, metric: Metric) -> i32 {
        self.deltas[metric.index()]
    }

    /// Whether the action makes the pet happier.
    #[must_use]
    pub const fn cheers_up(&self) -> bool {
        self.delta(Metric::Happiness) > 0
    }

    /// Applies cost and deltas to the pet. Does not touch the score.
    ///
    /// # Errors
    ///
    /// [`RejectReason::OutOfStock`] if the item ran out. The pet is untouched.
    pub fn apply(&self, pet: &mut Pet) -> Result<(), RejectReason> {
        if let Some(item) = self.cost {
            if !pet.inventory_mut().consume(item) {
                return Err(RejectReason::OutOfStock(item));
            }
        }
        let stats = pet.stats_mut();
        for metric in Metric::ALL {
            let delta = self.delta(metric);
            if delta != 0 {
                stats.increase(metric, delta);
            }
        }
        Ok(())
    }
}

/// Why an action was refused. Refusals never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    /// Session is paused or stopped
    #[error("the game is not running")]
    NotRunning,
    /// Pet is dead
    #[error("the game is over")]
    GameOver,
    /// Only Sleep is accepted while asleep
    #[error("the pet is asleep")]
    Asleep,
    /// Happiness is critical
    #[error("the pet is angry")]
    Angry,
    /// Selected item has run out
    #[error("out of {0}")]
    OutOfStock(Item),
}

/// Result of dispatching an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Effect was applied
    Applied(ActionEffect),
    /// Nothing changed
    Rejected(RejectReason),
}

impl ActionOutcome {
    /// Whether the action went through.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;
    use petkeeper_common::SaveSlot;

    fn pet() -> Pet {
        Pet::new("Buddy", Species::Mole, SaveSlot::new(1))
    }

    #[test]
    fn test_effect_table() {
        let food = Item::Kibble;
        let gift = Item::Candy;
        assert_eq!(PetAction::Feed.effect(food, gift).deltas, [20, 10, 0, 0]);
        assert_eq!(PetAction::Feed.effect(Item::Fish, gift).deltas, [30, 5, 0, 0]);
        assert_eq!(PetAction::Gift.effect(food, gift).deltas, [0, 10, 20, -40]);
        assert_eq!(PetAction::Gift.effect(food, Item::Feast).deltas, [60, 15, 0, 0]);
        assert_eq!(PetAction::Play.effect(food, gift).score, 50);
        assert_eq!(PetAction::Exercise.effect(food, gift).score, 25);
        assert_eq!(PetAction::Vet.effect(food, gift).cost, None);
    }

    #[test]
    fn test_feed_applies_cost() {
        let mut pet = pet();
        let effect = PetAction::Feed.prepare(&pet).expect("accepted");
        effect.apply(&mut pet).expect("in stock");
        assert_eq!(pet.stats().hunger(), 100);
        assert_eq!(pet.stats().happiness(), 80);
        assert_eq!(pet.inventory().count(Item::Kibble), 98);
    }

    #[test]
    fn test_angry_accepts_only_cheering_actions() {
        let mut pet = pet();
        pet.stats_mut().set_happiness(10);
        assert_eq!(PetAction::Exercise.prepare(&pet), Err(RejectReason::Angry));
        assert_eq!(PetAction::Vet.prepare(&pet), Err(RejectReason::Angry));
        assert!(PetAction::Play.prepare(&pet).is_ok());
        assert!(PetAction::Feed.prepare(&pet).is_ok());
        assert_eq!(PetAction::Sleep.prepare(&pet), Err(RejectReason::Angry));
    }

    #[test]
    fn test_out_of_stock() {
        let mut pet = pet();
        pet.inventory_mut().set(Item::Candy, 0);
        assert_eq!(
            PetAction::Gift.prepare(&pet),
            Err(RejectReason::OutOfStock(Item::Candy))
        );
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("Exercise".parse::<PetAction>(), Ok(PetAction::Exercise));
        assert!("dance".parse::<PetAction>().is_err());
    }

    #[test]
    fn test_reject_messages() {
        assert_eq!(RejectReason::OutOfStock(Item::Fish).to_string(), "out of fish");
        assert_eq!(RejectReason::Asleep.to_string(), "the pet is asleep");
    }
}
