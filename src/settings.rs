//! Run settings
//!
//! Read once at startup from the page query string, e.g.
//! `?seed=42&movement=per_second&fps=0`. Nothing is stored between visits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::{LevelConfig, PlayerMotion};

/// Query-string parse failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid value {value:?} for setting `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("setting `{0}` needs a value")]
    MissingValue(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Fixed seed for collectible placement (random when unset)
    pub seed: Option<u64>,
    /// How held left/right turns into displacement
    pub movement: PlayerMotion,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the on-screen touch buttons
    pub touch_controls: bool,

    // === Diagnostics ===
    /// Debug-level logging (collections, jumps, respawns)
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            movement: PlayerMotion::PerTick,
            show_fps: true,
            touch_controls: true,
            verbose: false,
        }
    }
}

impl Settings {
    /// Parse a `?key=value&...` query string on top of the defaults.
    ///
    /// Unknown keys are ignored; a bad value for a known key is an error.
    pub fn from_query(query: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };
            settings.apply(key, value)?;
        }

        Ok(settings)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "seed" => {
                if value.is_empty() {
                    return Err(SettingsError::MissingValue(key.to_string()));
                }
                self.seed = Some(value.parse().map_err(|_| invalid())?);
            }
            "movement" => {
                if value.is_empty() {
                    return Err(SettingsError::MissingValue(key.to_string()));
                }
                self.movement = PlayerMotion::from_str(value).ok_or_else(invalid)?;
            }
            "fps" => self.show_fps = parse_flag(value).ok_or_else(invalid)?,
            "touch" => self.touch_controls = parse_flag(value).ok_or_else(invalid)?,
            "verbose" | "debug" => self.verbose = parse_flag(value).ok_or_else(invalid)?,
            _ => log::debug!("Ignoring unknown setting `{}`", key),
        }
        Ok(())
    }

    /// Level configuration with these settings applied
    pub fn level_config(&self) -> LevelConfig {
        LevelConfig::default().with_player_motion(self.movement)
    }

    pub fn log_level(&self) -> log::Level {
        if self.verbose {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}

/// A bare key (`?fps`) counts as on
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
