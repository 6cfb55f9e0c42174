//! # Petkeeper Core
//!
//! Simulation core for Petkeeper.
//!
//! This crate provides everything that decides what happens to a pet:
//! - Vital stats with clamping, decay modifiers and critical states
//! - Species decay profiles
//! - Inventory and score keeping
//! - Player actions
//! - The tick-driven session loop with parental guards
//! - Parental controls (PIN, revival, time limits)
//! - Save slots and preferences on disk
//! - Event bus for observers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod actions;
pub mod config;
pub mod events;
pub mod inventory;
pub mod parental;
pub mod pet;
pub mod playtime;
pub mod prefs;
pub mod save;
pub mod score;
pub mod session;
pub mod species;
pub mod vitals;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::actions::*;
    pub use crate::config::*;
    pub use crate::events::*;
    pub use crate::inventory::*;
    pub use crate::parental::*;
    pub use crate::pet::*;
    pub use crate::playtime::*;
    pub use crate::prefs::*;
    pub use crate::save::*;
    pub use crate::score::*;
    pub use crate::session::*;
    pub use crate::species::*;
    pub use crate::vitals::*;
}

pub use prelude::*;
