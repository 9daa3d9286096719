//! Player profiles and per-level best scores
//!
//! Persisted as JSON. A missing or unreadable file just means nobody has
//! played yet; the game never fails because of it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Difficulty;

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 15;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to access profile file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Storage for finished-session results
pub trait ScoreStore {
    /// Record a finished session. Returns true if it beat the player's
    /// previous best on that level.
    fn record_score(&mut self, player: &str, level: Difficulty, score: u32) -> bool;

    /// Best recorded score, `None` if the player never finished that level
    fn best_score(&self, player: &str, level: Difficulty) -> Option<u32>;
}

/// Trim and title-case a typed name; `None` if nothing is left
pub fn normalize_player_name(raw: &str) -> Option<String> {
    let trimmed: String = raw.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        return None;
    }

    let mut name = String::with_capacity(trimmed.len());
    let mut prev_alpha = false;
    for c in trimmed.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                name.extend(c.to_lowercase());
            } else {
                name.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            name.push(c);
            prev_alpha = false;
        }
    }
    Some(name)
}

/// Stats for one player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    /// Best score per level number
    pub high_scores: BTreeMap<u8, u32>,
    /// Finished sessions per level number
    pub games_played: BTreeMap<u8, u32>,
    pub total_score: u64,
    /// Unix timestamp (seconds) of the last finished session
    pub last_played: u64,
}

impl PlayerProfile {
    pub fn best(&self) -> u32 {
        self.high_scores.values().copied().max().unwrap_or(0)
    }

    pub fn total_games(&self) -> u32 {
        self.games_played.values().sum()
    }
}

/// All known players
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfiles {
    pub players: BTreeMap<String, PlayerProfile>,
}

impl PlayerProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player: &str) -> Option<&PlayerProfile> {
        self.players.get(player)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players ordered by best score on any level, highest first
    pub fn top_players(&self, limit: usize) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .players
            .iter()
            .map(|(name, profile)| (name.as_str(), profile.best()))
            .collect();
        // Stable sort keeps name order among ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Record a session with an explicit timestamp
    pub fn record_at(&mut self, player: &str, level: Difficulty, score: u32, now: u64) -> bool {
        let profile = self.players.entry(player.to_string()).or_default();
        let key = level.number();

        *profile.games_played.entry(key).or_insert(0) += 1;
        profile.total_score += u64::from(score);
        profile.last_played = now;

        let best = profile.high_scores.entry(key).or_insert(0);
        let new_best = score > *best;
        if new_best {
            *best = score;
        }
        new_best
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let json = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load, or start fresh if the file is missing or corrupt
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No profiles at {:?}, starting fresh", path);
            return Self::new();
        }
        match Self::load(path) {
            Ok(profiles) => {
                log::info!("Loaded {} player profiles", profiles.players.len());
                profiles
            }
            Err(e) => {
                log::warn!("{} - starting fresh", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Profiles saved ({} players)", self.players.len());
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl ScoreStore for PlayerProfiles {
    fn record_score(&mut self, player: &str, level: Difficulty, score: u32) -> bool {
        self.record_at(player, level, score, unix_now())
    }

    fn best_score(&self, player: &str, level: Difficulty) -> Option<u32> {
        self.players
            .get(player)?
            .high_scores
            .get(&level.number())
            .copied()
    }
}

/// Profiles backed by a file, written after every recorded session
#[derive(Debug)]
pub struct ProfileFile {
    path: PathBuf,
    profiles: PlayerProfiles,
}

impl ProfileFile {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profiles = PlayerProfiles::load_or_default(&path);
        Self { path, profiles }
    }

    pub fn profiles(&self) -> &PlayerProfiles {
        &self.profiles
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for ProfileFile {
    fn record_score(&mut self, player: &str, level: Difficulty, score: u32) -> bool {
        let new_best = self.profiles.record_score(player, level, score);
        // A failed write loses this result on disk only; play continues
        if let Err(e) = self.profiles.save(&self.path) {
            log::warn!("Could not save profiles: {}", e);
        }
        new_best
    }

    fn best_score(&self, player: &str, level: Difficulty) -> Option<u32> {
        self.profiles.best_score(player, level)
    }
}
