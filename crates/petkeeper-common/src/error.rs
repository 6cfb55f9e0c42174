//! Error types for Petkeeper.

use thiserror::Error;

/// Top-level error type for Petkeeper operations.
#[derive(Debug, Error)]
pub enum PetError {
    /// Species name is not one of the known archetypes
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    /// Save slot identifier could not be parsed
    #[error("Invalid save slot: {0}")]
    InvalidSlot(String),

    /// Wall-clock time could not be parsed
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
}

/// Result type alias for Petkeeper operations.
pub type PetResult<T> = Result<T, PetError>;
