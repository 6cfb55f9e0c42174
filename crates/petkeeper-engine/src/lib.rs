//! # Petkeeper Engine
//!
//! Headless runtime for Petkeeper.
//!
//! This crate ties the simulation core to the outside world:
//! - Engine configuration (TOML)
//! - The async driver: simulation and score timers plus the command queue

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod driver;

pub use config::EngineConfig;
pub use driver::{status_line, Command, Driver, COMMAND_QUEUE};
