//! # Petkeeper Common
//!
//! Common types shared by every Petkeeper crate.
//!
//! This crate provides the leaf types the simulation core and the engine agree on:
//! - Save slot identifiers
//! - Version information for the save format
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::version::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_file_name_round_trip() {
        let slot = SaveSlot::new(3);
        let file_name = slot.file_name();

        assert_eq!(file_name, "slot3.json");
        assert_eq!(SaveSlot::from_file_name(&file_name), Some(slot));
    }

    #[test]
    fn test_version_compatibility() {
        let v1 = SchemaVersion::new(1, 0, 0);
        let v2 = SchemaVersion::new(1, 1, 0);
        let v3 = SchemaVersion::new(2, 0, 0);

        // v2 can read v1 data (newer version reading older data)
        assert!(v2.is_compatible_with(&v1));
        // Different major versions are incompatible
        assert!(!v1.is_compatible_with(&v3));
    }
}
