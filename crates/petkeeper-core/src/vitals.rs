//! Vital statistics (hunger, happiness, energy, health).
//!
//! Every metric is an integer clamped to `0..=100`. After each mutation the
//! critical flags, the decay modifiers and the alive flag are re-derived from
//! the current values using the active [`VitalRules`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value any metric can hold.
pub const STAT_MIN: i32 = 0;
/// Highest value any metric can hold.
pub const STAT_MAX: i32 = 100;

/// One of the four vital metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Satiation; low means hungry
    Hunger,
    /// Mood; critical means angry
    Happiness,
    /// Stamina; zero means asleep
    Energy,
    /// Health; zero means dead
    Health,
}

impl Metric {
    /// All metrics, in state-array order.
    pub const ALL: [Self; 4] = [Self::Hunger, Self::Happiness, Self::Energy, Self::Health];

    /// Position of this metric in the state array and rule tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Hunger => 0,
            Self::Happiness => 1,
            Self::Energy => 2,
            Self::Health => 3,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hunger => "hunger",
            Self::Happiness => "happiness",
            Self::Energy => "energy",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A band of the step function: values strictly below `below` get `modifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierStep {
    /// Exclusive upper bound of the band
    pub below: i32,
    /// Modifier applied inside the band
    pub modifier: i32,
}

impl ModifierStep {
    /// Creates a new step.
    #[must_use]
    pub const fn new(below: i32, modifier: i32) -> Self {
        Self { below, modifier }
    }
}

/// Threshold tables driving critical detection and decay modifiers.
///
/// Step bands are checked in order, so list the most severe band first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalRules {
    /// A metric is critical while its value is below this bound
    pub critical_below: [i32; 4],
    /// Row: critical metric. Column: modifier it adds to.
    pub compounding: [[i32; 4]; 4],
    /// Hunger step bands
    pub hunger_steps: Vec<ModifierStep>,
    /// Happiness step bands
    pub happiness_steps: Vec<ModifierStep>,
    /// Energy step bands
    pub energy_steps: Vec<ModifierStep>,
    /// Health step bands
    pub health_steps: Vec<ModifierStep>,
}

impl Default for VitalRules {
    fn default() -> Self {
        Self {
            critical_below: [20, 20, 1, 1],
            compounding: [
                [0, 1, 1, 1], // hungry
                [0, 0, 1, 1], // angry
                [1, 1, 0, 1], // exhausted
                [0, 1, 2, 0], // dying
            ],
            hunger_steps: vec![ModifierStep::new(20, 5), ModifierStep::new(50, 3)],
            happiness_steps: vec![ModifierStep::new(20, 3), ModifierStep::new(50, 1)],
            energy_steps: vec![ModifierStep::new(20, 2), ModifierStep::new(50, 1)],
            health_steps: Vec::new(),
        }
    }
}

impl VitalRules {
    /// Step bands for a metric.
    #[must_use]
    pub fn steps(&self, metric: Metric) -> &[ModifierStep] {
        match metric {
            Metric::Hunger => &self.hunger_steps,
            Metric::Happiness => &self.happiness_steps,
            Metric::Energy => &self.energy_steps,
            Metric::Health => &self.health_steps,
        }
    }

    /// Modifier contributed by the metric's own value.
    #[must_use]
    pub fn step_modifier(&self, metric: Metric, value: i32) -> i32 {
        self.steps(metric)
            .iter()
            .find(|step| value < step.below)
            .map_or(0, |step| step.modifier)
    }

    /// Whether `value` is critical for `metric`.
    #[must_use]
    pub fn is_critical(&self, metric: Metric, value: i32) -> bool {
        value < self.critical_below[metric.index()]
    }

    /// Computes all four modifiers from values and critical flags.
    #[must_use]
    pub fn modifiers_for(&self, values: [i32; 4], state: [u8; 4]) -> Modifiers {
        let mut out = [0i32; 4];
        for metric in Metric::ALL {
            let m = metric.index();
            let compounded: i32 = (0..4)
                .filter(|&c| state[c] != 0)
                .map(|c| self.compounding[c][m])
                .sum();
            out[m] = self.step_modifier(metric, values[m]).saturating_add(compounded);
        }
        Modifiers {
            hunger: out[0],
            happiness: out[1],
            energy: out[2],
            health: out[3],
        }
    }
}

/// Per-metric decay adjustments, added to the species base decay each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Hunger modifier
    pub hunger: i32,
    /// Happiness modifier
    pub happiness: i32,
    /// Energy modifier
    pub energy: i32,
    /// Health modifier
    pub health: i32,
}

impl Modifiers {
    /// Modifier for a metric.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> i32 {
        match metric {
            Metric::Hunger => self.hunger,
            Metric::Happiness => self.happiness,
            Metric::Energy => self.energy,
            Metric::Health => self.health,
        }
    }
}

/// The pet's vital statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredVitals")]
pub struct VitalStats {
    hunger: i32,
    happiness: i32,
    energy: i32,
    health: i32,
    modifiers: Modifiers,
    state: [u8; 4],
    alive: bool,
    #[serde(skip)]
    rules: VitalRules,
}

/// On-disk shape of [`VitalStats`], before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredVitals {
    hunger: i32,
    happiness: i32,
    energy: i32,
    health: i32,
    modifiers: Modifiers,
    state: [u8; 4],
    alive: bool,
}

// Saved flags and modifiers are kept as written; only the values are clamped.
impl From<StoredVitals> for VitalStats {
    fn from(stored: StoredVitals) -> Self {
        let health = stored.health.clamp(STAT_MIN, STAT_MAX);
        Self {
            hunger: stored.hunger.clamp(STAT_MIN, STAT_MAX),
            happiness: stored.happiness.clamp(STAT_MIN, STAT_MAX),
            energy: stored.energy.clamp(STAT_MIN, STAT_MAX),
            health,
            modifiers: stored.modifiers,
            state: stored.state.map(|flag| u8::from(flag != 0)),
            alive: stored.alive && health > 0,
            rules: VitalRules::default(),
        }
    }
}

impl Default for VitalStats {
    fn default() -> Self {
        Self::with_rules(VitalRules::default())
    }
}

// Rules are runtime configuration, not part of the pet.
impl PartialEq for VitalStats {
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
            && self.modifiers == other.modifiers
            && self.state == other.state
            && self.alive == other.alive
    }
}

impl Eq for VitalStats {}

impl VitalStats {
    /// Creates default stats (80/70/100/100) under the given rules.
    #[must_use]
    pub fn with_rules(rules: VitalRules) -> Self {
        let mut stats = Self {
            hunger: 80,
            happiness: 70,
            energy: 100,
            health: 100,
            modifiers: Modifiers::default(),
            state: [0; 4],
            alive: true,
            rules,
        };
        stats.refresh();
        stats
    }

    /// Current value of a metric.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> i32 {
        match metric {
            Metric::Hunger => self.hunger,
            Metric::Happiness => self.happiness,
            Metric::Energy => self.energy,
            Metric::Health => self.health,
        }
    }

    /// All four values in state-array order.
    #[must_use]
    pub const fn values(&self) -> [i32; 4] {
        [self.hunger, self.happiness, self.energy, self.health]
    }

    /// Sets a metric, clamped to `0..=100`.
    pub fn set(&mut self, metric: Metric, value: i32) {
        let value = value.clamp(STAT_MIN, STAT_MAX);
        match metric {
            Metric::Hunger => self.hunger = value,
            Metric::Happiness => self.happiness = value,
            Metric::Energy => self.energy = value,
            Metric::Health => self.health = value,
        }
        self.refresh();
    }

    /// Raises a metric by `amount`, clamped.
    pub fn increase(&mut self, metric: Metric, amount: i32) {
        self.set(metric, self.get(metric).saturating_add(amount));
    }

    /// Lowers a metric by `amount`, clamped.
    pub fn decrease(&mut self, metric: Metric, amount: i32) {
        self.set(metric, self.get(metric).saturating_sub(amount));
    }

    /// Hunger value.
    #[must_use]
    pub const fn hunger(&self) -> i32 {
        self.hunger
    }

    /// Happiness value.
    #[must_use]
    pub const fn happiness(&self) -> i32 {
        self.happiness
    }

    /// Energy value.
    #[must_use]
    pub const fn energy(&self) -> i32 {
        self.energy
    }

    /// Health value.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Sets hunger.
    pub fn set_hunger(&mut self, value: i32) {
        self.set(Metric::Hunger, value);
    }

    /// Sets happiness.
    pub fn set_happiness(&mut self, value: i32) {
        self.set(Metric::Happiness, value);
    }

    /// Sets energy.
    pub fn set_energy(&mut self, value: i32) {
        self.set(Metric::Energy, value);
    }

    /// Sets health.
    pub fn set_health(&mut self, value: i32) {
        self.set(Metric::Health, value);
    }

    /// Critical flags in `[hunger, happiness, energy, health]` order.
    #[must_use]
    pub const fn state(&self) -> [u8; 4] {
        self.state
    }

    /// Overrides the critical flags and recomputes modifiers from them.
    ///
    /// The next metric mutation re-derives the flags from the values.
    pub fn set_state(&mut self, state: [u8; 4]) {
        self.state = state.map(|flag| u8::from(flag != 0));
        self.modifiers = self.rules.modifiers_for(self.values(), self.state);
    }

    /// Whether a metric is flagged critical.
    #[must_use]
    pub const fn is_critical(&self, metric: Metric) -> bool {
        self.state[metric.index()] != 0
    }

    /// Critical happiness makes the pet refuse anything that doesn't cheer it up.
    #[must_use]
    pub const fn is_angry(&self) -> bool {
        self.is_critical(Metric::Happiness)
    }

    /// Decay modifier for a metric.
    #[must_use]
    pub const fn modifier(&self, metric: Metric) -> i32 {
        self.modifiers.get(metric)
    }

    /// All decay modifiers.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether the pet is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Forces the alive flag, adjusting health to match.
    pub fn set_alive(&mut self, alive: bool) {
        if alive && self.health == 0 {
            self.set(Metric::Health, 1);
        } else if !alive {
            self.set(Metric::Health, 0);
        }
    }

    /// Full heal: every metric to 100, modifiers cleared, alive.
    pub fn restore_all(&mut self) {
        self.hunger = STAT_MAX;
        self.happiness = STAT_MAX;
        self.energy = STAT_MAX;
        self.health = STAT_MAX;
        self.refresh();
    }

    /// Active rule tables.
    #[must_use]
    pub const fn rules(&self) -> &VitalRules {
        &self.rules
    }

    /// Replaces the rule tables and re-derives state and modifiers.
    pub fn set_rules(&mut self, rules: VitalRules) {
        self.rules = rules;
        self.refresh();
    }

    fn refresh(&mut self) {
        let values = self.values();
        for metric in Metric::ALL {
            self.state[metric.index()] = u8::from(self.rules.is_critical(metric, values[metric.index()]));
        }
        self.modifiers = self.rules.modifiers_for(values, self.state);
        self.alive = self.health > 0;
    }
}
