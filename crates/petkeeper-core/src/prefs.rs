//! User preferences shared across save slots.

use serde::{Deserialize, Serialize};

/// Global preferences, stored next to the save slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    /// Whether parental guards are enforced
    pub parent_controls_enabled: bool,
    /// Master volume (0.0 - 100.0)
    pub volume: f32,
    /// Parent display name
    pub parent_username: String,
    /// Parent PIN, stored as entered
    pub parent_password: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            parent_controls_enabled: false,
            volume: 50.0,
            parent_username: String::new(),
            parent_password: String::new(),
        }
    }
}

impl UserPreferences {
    /// Clamps values to valid ranges.
    pub fn validate(&mut self) {
        if self.volume.is_nan() {
            self.volume = Self::default().volume;
        }
        self.volume = self.volume.clamp(0.0, 100.0);
    }

    /// Whether a parent PIN has been created.
    #[must_use]
    pub fn has_pin(&self) -> bool {
        !self.parent_password.is_empty()
    }
}
