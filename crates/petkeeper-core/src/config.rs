//! Simulation tuning.

use serde::{Deserialize, Serialize};

use crate::events::DEFAULT_EVENT_CAPACITY;
use crate::score::DEFAULT_POINTS_PER_SECOND;
use crate::vitals::VitalRules;

/// Parameters of the simulation loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Milliseconds between score ticks
    pub score_interval_ms: u64,
    /// Points per score tick
    pub points_per_second: i64,
    /// Energy regained per tick while asleep
    pub sleep_recovery_per_tick: i32,
    /// Energy at which a sleeping pet wakes
    pub wake_energy: i32,
    /// Event bus capacity
    pub event_capacity: usize,
    /// Critical thresholds and modifier tables
    pub vitals: VitalRules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            score_interval_ms: 1000,
            points_per_second: DEFAULT_POINTS_PER_SECOND,
            sleep_recovery_per_tick: 10,
            wake_energy: 100,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            vitals: VitalRules::default(),
        }
    }
}

impl SimConfig {
    /// Clamps values to valid ranges.
    pub fn validate(&mut self) {
        self.tick_interval_ms = self.tick_interval_ms.clamp(10, 60_000);
        self.score_interval_ms = self.score_interval_ms.clamp(10, 60_000);
        self.points_per_second = self.points_per_second.max(0);
        self.sleep_recovery_per_tick = self.sleep_recovery_per_tick.clamp(1, 100);
        self.wake_energy = self.wake_energy.clamp(1, 100);
        self.event_capacity = self.event_capacity.clamp(16, 65_536);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.points_per_second, 10);
        assert_eq!(config.wake_energy, 100);
    }

    #[test]
    fn test_validate() {
        let mut config = SimConfig {
            tick_interval_ms: 0,
            points_per_second: -5,
            sleep_recovery_per_tick: 0,
            wake_energy: 500,
            event_capacity: 0,
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.tick_interval_ms, 10);
        assert_eq!(config.points_per_second, 0);
        assert_eq!(config.sleep_recovery_per_tick, 1);
        assert_eq!(config.wake_energy, 100);
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{"points_per_second": 20}"#).expect("deserialize");
        assert_eq!(config.points_per_second, 20);
        assert_eq!(config.vitals, VitalRules::default());
    }
}
