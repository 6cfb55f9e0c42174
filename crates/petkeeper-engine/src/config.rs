//! Engine configuration.
//!
//! Where saves live, how much to log, whether to autosave, and the nested
//! simulation tuning. Loaded from and saved to a TOML file.

use petkeeper_core::{SimConfig, DEFAULT_SAVE_DIR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "petkeeper.toml";

/// Directory under the platform config dir.
const CONFIG_DIR: &str = "petkeeper";

/// Default tracing directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "petkeeper=info";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding save slots and preferences
    pub save_dir: PathBuf,
    /// Tracing filter directive
    pub log_filter: String,
    /// Write the slot when the session ends
    pub autosave_on_exit: bool,
    /// Simulation tuning
    pub sim: SimConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            autosave_on_exit: true,
            sim: SimConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Config file not found, using defaults");
                return Self::default();
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                config.validate();
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(Self::config_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Default configuration file path, falling back to the working directory.
    pub fn config_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(CONFIG_FILE),
            |dir| dir.join(CONFIG_DIR).join(CONFIG_FILE),
        )
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
        if self.save_dir.as_os_str().is_empty() {
            self.save_dir = PathBuf::from(DEFAULT_SAVE_DIR);
        }
        self.sim.validate();
    }
}
