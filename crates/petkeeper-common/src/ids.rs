//! Identifier types for persisted resources.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PetError;

/// File name prefix shared by every save slot.
const SLOT_PREFIX: &str = "slot";

/// File extension used by save slots.
pub const SLOT_EXTENSION: &str = "json";

/// Save slot identifier.
///
/// Serialized as a bare number; rendered as `slot<N>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveSlot(u32);

impl SaveSlot {
    /// Create a new save slot.
    #[must_use]
    pub const fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// Get the slot number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Get save filename.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{self}.{SLOT_EXTENSION}")
    }

    /// Parses a file name such as `slot2.json` back into a slot.
    ///
    /// Returns `None` for anything that is not exactly a slot's own file
    /// name, so `7.json` and `slot01.json` are ignored.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(SLOT_EXTENSION)?.strip_suffix('.')?;
        if !stem.starts_with(SLOT_PREFIX) {
            return None;
        }
        let slot: Self = stem.parse().ok()?;
        (slot.file_name() == file_name).then_some(slot)
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SLOT_PREFIX}{}", self.0)
    }
}

impl FromStr for SaveSlot {
    type Err = PetError;

    /// Accepts `slot<N>` or a bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(SLOT_PREFIX).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PetError::InvalidSlot(s.to_string()));
        }
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| PetError::InvalidSlot(s.to_string()))
    }
}

impl From<u32> for SaveSlot {
    fn from(slot: u32) -> Self {
        Self(slot)
    }
}
