//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or persistence dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod level;
pub mod physics;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{ProjectileHits, Rect};
pub use entities::EntityStore;
pub use level::{Difficulty, LevelConfig};
pub use score::{ScoreTracker, obstacle_spacing};
pub use state::{
    Bird, Craft, Enemy, GameEvent, Obstacle, Particle, ParticleKind, Projectile, Session,
    ShooterCraft, SubMode,
};
pub use tick::{TickInput, tick, tick_particles, toggle_sub_mode};
