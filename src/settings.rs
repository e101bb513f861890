//! Game tunables
//!
//! Loaded from a JSON file by the native runner; missing fields fall back to
//! the defaults in [`crate::consts`]. Table geometry is fixed and not part of
//! the settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds of holding to reach full charge
    pub charge_time: f32,
    /// Cue ball speed at full charge
    pub shot_power: f32,
    /// Speed removed from every ball each frame
    pub friction: f32,
    /// Requested frame rate (clamped by the frame clock)
    pub target_fps: u32,
    /// Seed for the demo player
    pub autoplay_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            charge_time: CHARGE_TIME,
            shot_power: SHOT_POWER,
            friction: FRICTION,
            target_fps: TARGET_FPS,
            autoplay_seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if !value.is_finite() {
                return Err(SettingsError::Invalid { field, reason: "must be finite" });
            }
            if value <= 0.0 {
                return Err(SettingsError::Invalid { field, reason: "must be positive" });
            }
            Ok(())
        }

        positive("charge_time", self.charge_time)?;
        positive("shot_power", self.shot_power)?;
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(SettingsError::Invalid {
                field: "friction",
                reason: "must be finite and non-negative",
            });
        }
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid { field: "target_fps", reason: "must be positive" });
        }
        Ok(())
    }
}
