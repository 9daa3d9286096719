//! Per-difficulty tuning

use serde::{Deserialize, Serialize};

/// Difficulty tier selected from the level menu (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// Hardest tier; periodically swaps into the shooter sub-mode
    Fantastic,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Fantastic,
    ];

    /// Map a level-menu number to a tier. Anything outside 1-4 is `None`.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            4 => Some(Difficulty::Fantastic),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Fantastic => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.config().name
    }

    pub fn config(&self) -> LevelConfig {
        match self {
            Difficulty::Easy => LevelConfig {
                name: "EASY",
                jump_impulse: -6.5,
                obstacle_speed: 2.0,
                gap_size: 200.0,
                shooter_enabled: false,
            },
            Difficulty::Medium => LevelConfig {
                name: "MEDIUM",
                jump_impulse: -6.5,
                obstacle_speed: 2.5,
                gap_size: 160.0,
                shooter_enabled: false,
            },
            Difficulty::Hard => LevelConfig {
                name: "HARD",
                jump_impulse: -8.0,
                obstacle_speed: 2.5,
                gap_size: 160.0,
                shooter_enabled: false,
            },
            Difficulty::Fantastic => LevelConfig {
                name: "FANTASTIC",
                jump_impulse: -6.5,
                obstacle_speed: 2.5,
                gap_size: 160.0,
                shooter_enabled: true,
            },
        }
    }
}

/// Immutable tuning values for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelConfig {
    pub name: &'static str,
    /// Vertical velocity set (not added) on jump; negative is up
    pub jump_impulse: f32,
    /// Horizontal scroll per tick for obstacles
    pub obstacle_speed: f32,
    /// Vertical opening between the top and bottom pipe
    pub gap_size: f32,
    /// Whether score milestones swap into the shooter sub-mode
    pub shooter_enabled: bool,
}
