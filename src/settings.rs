//! Game settings and preferences
//!
//! Persisted separately from player profiles, as JSON next to the binary.
//! Unknown or missing fields fall back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Difficulty;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    /// Fixed RNG seed for reproducible runs; random when unset
    pub seed: Option<u64>,
    /// Level the headless runner plays
    pub level: Difficulty,
    /// Let the autopilot play
    pub autopilot: bool,

    // === Profiles ===
    pub profile_path: PathBuf,
    /// Skip name entry by playing as this player
    pub player_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Gameplay
            seed: None,
            level: Difficulty::Easy,
            autopilot: true,

            // Profiles
            profile_path: PathBuf::from("player_profiles.json"),
            player_name: None,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "settings.json";

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }
}
