//! Event bus for observers of the simulation.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::actions::{PetAction, RejectReason};
use crate::session::PauseReason;
use crate::vitals::Metric;

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetEvent {
    /// Stats changed after a tick or an action
    StatsChanged {
        /// Values in `[hunger, happiness, energy, health]` order
        values: [i32; 4],
    },
    /// A metric dropped below its critical bound
    CriticalEntered {
        /// Metric affected
        metric: Metric,
    },
    /// A metric recovered
    CriticalCleared {
        /// Metric affected
        metric: Metric,
    },
    /// Energy ran out
    FellAsleep,
    /// Energy recovered
    WokeUp,
    /// Session paused
    Paused {
        /// Why
        reason: PauseReason,
    },
    /// Session resumed
    Resumed,
    /// Health reached zero
    GameOver {
        /// Final score
        score: i64,
    },
    /// Pet was revived by a parent
    Revived,
    /// Action went through
    ActionApplied {
        /// Action taken
        action: PetAction,
    },
    /// Action was refused
    ActionRejected {
        /// Action attempted
        action: PetAction,
        /// Why
        reason: RejectReason,
    },
}

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<PetEvent>,
    receiver: Receiver<PetEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: PetEvent) {
        // Non-blocking; dropped when nobody drains a full bus
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<PetEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<PetEvent> {
        self.sender.clone()
    }
}
