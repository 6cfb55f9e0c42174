//! Save slots and preferences on disk.
//!
//! Provides:
//! - Atomic writes (temp file + rename)
//! - Slot listing with summaries for the load menu
//! - Play-time statistics across slots
//! - Self-healing preferences: a corrupted file is discarded

use chrono::{DateTime, Utc};
use petkeeper_common::{SaveSlot, SchemaVersion};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::pet::GameState;
use crate::playtime::format_play_time;
use crate::prefs::UserPreferences;
use crate::species::Species;

/// Default save directory, relative to the working directory.
pub const DEFAULT_SAVE_DIR: &str = "saves";

/// Preferences file name inside the save directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Errors that can occur during save operations.
#[derive(Debug, Error)]
pub enum SaveError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Save slot not found.
    #[error("Save slot not found: {0}")]
    NotFound(SaveSlot),

    /// Slot file exists but could not be parsed.
    #[error("Corrupted save file {slot}: {reason}")]
    Corrupted {
        /// Slot that failed to parse
        slot: SaveSlot,
        /// Parser message
        reason: String,
    },

    /// Version mismatch.
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version this build writes
        expected: SchemaVersion,
        /// Version found in the file
        found: SchemaVersion,
    },
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// What the load menu shows for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    /// Slot
    pub slot: SaveSlot,
    /// Pet name
    pub name: String,
    /// Pet species
    pub species: Species,
    /// Last save time
    pub saved_at: DateTime<Utc>,
    /// Lifetime play seconds
    pub total_time_spent: u64,
    /// Last synced score
    pub score: i64,
    /// Whether the pet is alive
    pub alive: bool,
}

impl SaveSummary {
    fn from_state(slot: SaveSlot, state: &GameState) -> Self {
        Self {
            slot,
            name: state.pet.name().to_string(),
            species: state.pet.species(),
            saved_at: state.saved_at,
            total_time_spent: state.pet.total_time_spent(),
            score: state.pet.score(),
            alive: state.pet.stats().is_alive(),
        }
    }

    /// Play time as `HH:MM:SS`.
    #[must_use]
    pub fn formatted_playtime(&self) -> String {
        format_play_time(self.total_time_spent)
    }

    /// Save time in the local timezone.
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.saved_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

/// Play-time statistics across all readable slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayTimeReport {
    /// Slots counted
    pub slots: usize,
    /// Sum of lifetime play seconds
    pub total_seconds: u64,
    /// Mean lifetime play seconds per slot
    pub average_seconds: u64,
}

/// Directory-backed store for save slots and preferences.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }
}

impl SaveStore {
    /// Creates a store rooted at `dir`. Nothing is touched until first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the save directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a slot file.
    #[must_use]
    pub fn slot_path(&self, slot: SaveSlot) -> PathBuf {
        self.dir.join(slot.file_name())
    }

    /// Path of the preferences file.
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }

    /// Creates the save directory if needed.
    pub fn ensure_dir(&self) -> SaveResult<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
            info!("Created save directory: {}", self.dir.display());
        }
        Ok(())
    }

    /// Whether a slot file exists.
    #[must_use]
    pub fn slot_exists(&self, slot: SaveSlot) -> bool {
        self.slot_path(slot).is_file()
    }

    /// Writes a game state to a slot.
    pub fn save_game(&self, slot: SaveSlot, state: &GameState) -> SaveResult<()> {
        self.write_json_atomic(&self.slot_path(slot), state)?;
        info!(%slot, pet = state.pet.name(), "Saved game");
        Ok(())
    }

    /// Reads a game state from a slot.
    pub fn load_game(&self, slot: SaveSlot) -> SaveResult<GameState> {
        let path = self.slot_path(slot);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SaveError::NotFound(slot)),
            Err(e) => return Err(e.into()),
        };

        let state: GameState =
            serde_json::from_str(&contents).map_err(|e| SaveError::Corrupted {
                slot,
                reason: e.to_string(),
            })?;

        if !SchemaVersion::SAVE_FORMAT.is_compatible_with(&state.version) {
            return Err(SaveError::VersionMismatch {
                expected: SchemaVersion::SAVE_FORMAT,
                found: state.version,
            });
        }

        info!(%slot, pet = state.pet.name(), "Loaded game");
        Ok(state)
    }

    /// Deletes a slot. Missing slots are not an error.
    pub fn delete_save(&self, slot: SaveSlot) -> SaveResult<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => {
                info!(%slot, "Deleted save slot");
                Ok(())
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Existing slots, ascending. Other files in the directory are ignored.
    pub fn list_save_files(&self) -> SaveResult<Vec<SaveSlot>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut slots = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(slot) = entry.file_name().to_str().and_then(SaveSlot::from_file_name) {
                slots.push(slot);
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }

    /// Summaries of every readable slot. Unreadable slots are skipped.
    pub fn list_saves(&self) -> SaveResult<Vec<SaveSummary>> {
        Ok(self
            .readable_states()?
            .iter()
            .map(|(slot, state)| SaveSummary::from_state(*slot, state))
            .collect())
    }

    /// Total and average play time across readable slots.
    pub fn play_time_report(&self) -> SaveResult<PlayTimeReport> {
        let states = self.readable_states()?;
        let total_seconds: u64 = states
            .iter()
            .map(|(_, state)| state.pet.total_time_spent())
            .sum();
        let slots = states.len();
        let average_seconds = if slots == 0 {
            0
        } else {
            total_seconds / slots as u64
        };
        Ok(PlayTimeReport {
            slots,
            total_seconds,
            average_seconds,
        })
    }

    /// Writes the preferences file.
    pub fn save_preferences(&self, prefs: &UserPreferences) -> SaveResult<()> {
        self.write_json_atomic(&self.preferences_path(), prefs)?;
        debug!("Saved preferences");
        Ok(())
    }

    /// Reads the preferences file.
    ///
    /// Never fails: a missing file yields defaults, and an unreadable or
    /// unparsable file is deleted before defaults are returned.
    #[must_use]
    pub fn load_preferences(&self) -> UserPreferences {
        let path = self.preferences_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Preferences not found, using defaults");
                return UserPreferences::default();
            },
            Err(e) => {
                warn!("Failed to read preferences: {e}");
                Self::discard(&path);
                return UserPreferences::default();
            },
        };

        match serde_json::from_str::<UserPreferences>(&contents) {
            Ok(mut prefs) => {
                prefs.validate();
                prefs
            },
            Err(e) => {
                warn!("Corrupted preferences, resetting: {e}");
                Self::discard(&path);
                UserPreferences::default()
            },
        }
    }

    fn readable_states(&self) -> SaveResult<Vec<(SaveSlot, GameState)>> {
        let mut states = Vec::new();
        for slot in self.list_save_files()? {
            match self.load_game(slot) {
                Ok(state) => states.push((slot, state)),
                Err(e) => warn!(%slot, "Skipping unreadable save: {e}"),
            }
        }
        Ok(states)
    }

    fn write_json_atomic<T: Serialize>(&self, path: &Path, value: &T) -> SaveResult<()> {
        self.ensure_dir()?;
        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        let temp_path = PathBuf::from(temp);

        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)
                .map_err(|e| SaveError::Serialization(e.to_string()))?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SaveError::Io(e)
        })?;
        Ok(())
    }

    fn discard(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove {}: {e}", path.display());
            }
        }
    }
}
