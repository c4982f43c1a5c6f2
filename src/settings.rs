//! Planner settings
//!
//! Loaded from a JSON file; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CRASH_LOCKOUT, DEFAULT_PROGRESS_INTERVAL};
use crate::error::Result;

/// Planner settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Forced-wait turns after hitting a wall or the grid edge
    pub crash_lockout_turns: u8,
    /// Generations between progress log lines (0 = only the final line)
    pub progress_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            crash_lockout_turns: DEFAULT_CRASH_LOCKOUT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from `path` if one is given, defaults otherwise
    ///
    /// A named file that cannot be read or parsed is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Whether generation `n` gets an info-level progress line
    pub fn reports_progress(&self, generation: u32) -> bool {
        self.progress_interval != 0 && generation % self.progress_interval == 0
    }
}
