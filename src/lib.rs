//! Flappy Blaster - a side-scrolling flappy arcade game with a shooter sub-mode
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, scoring)
//! - `game`: Screen state machine driving the simulation
//! - `game_loop`: Fixed-rate tick driver
//! - `render`: Read-only snapshot handed to renderers
//! - `audio`: Fire-and-forget sound notifications
//! - `profiles`: Player profiles and per-level best scores
//! - `settings`: User configuration

pub mod audio;
pub mod game;
pub mod game_loop;
pub mod profiles;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::{Game, Mode, Screen, SessionResult};
pub use game_loop::GameLoop;
pub use profiles::{PlayerProfiles, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 500.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;
    /// Ground strip at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Downward acceleration applied to the bird every tick
    pub const GRAVITY: f32 = 0.3;

    /// Bird defaults
    pub const BIRD_START_X: f32 = 50.0;
    pub const BIRD_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    pub const BIRD_RADIUS: f32 = 22.0;
    /// Hitbox is inset from the drawn radius
    pub const BIRD_HITBOX_INSET: f32 = 5.0;
    /// Degrees of tilt per unit of vertical velocity
    pub const ROTATION_GAIN: f32 = 3.0;
    pub const MAX_ROTATION_DEG: f32 = 30.0;

    /// Obstacle (pipe) defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    /// Minimum distance of the gap from the top edge and from the bottom edge
    pub const PIPE_GAP_MARGIN: i32 = 120;
    pub const BASE_PIPE_SPACING: f32 = 350.0;
    pub const MIN_PIPE_SPACING: f32 = 250.0;
    pub const PIPE_SPACING_PER_POINT: f32 = 3.0;

    /// Shooter craft defaults
    pub const SHOOTER_SIZE: f32 = 25.0;
    pub const SHOOTER_STEP: f32 = 4.0;
    pub const SHOOTER_HEALTH: u8 = 3;
    /// Craft only moves up while above this line
    pub const SHOOTER_MOVE_TOP: f32 = 50.0;
    /// Craft only moves down while below this line
    pub const SHOOTER_MOVE_BOTTOM: f32 = SCREEN_HEIGHT - 100.0;
    /// Leaving (SHOOTER_FATAL_TOP, SHOOTER_FATAL_BOTTOM) ends the run
    pub const SHOOTER_FATAL_TOP: f32 = 30.0;
    pub const SHOOTER_FATAL_BOTTOM: f32 = SCREEN_HEIGHT - 80.0;
    /// 200 ms at the fixed tick rate
    pub const SHOT_COOLDOWN_TICKS: u64 = 12;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_HALF_SIZE: f32 = 4.0;

    /// Enemy (zombie drone) defaults
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_HEALTH: u8 = 2;
    pub const ENEMY_SPAWN_X: f32 = SCREEN_WIDTH + 20.0;
    pub const ENEMY_MIN_Y: i32 = 60;
    pub const ENEMY_MAX_Y: i32 = SCREEN_HEIGHT as i32 - 150;
    pub const ENEMY_SPAWN_INTERVAL: u32 = 120;
    pub const ENEMY_HIT_FLASH_TICKS: u32 = 10;
    pub const ENEMY_DRIFT_AMPLITUDE: f32 = 0.5;

    /// Particle defaults
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const EXPLOSION_PARTICLES: usize = 15;
    pub const SCORE_PARTICLES: usize = 8;

    /// Every positive multiple of this score toggles the sub-mode on shooter levels
    pub const MODE_SWITCH_INTERVAL: u32 = 10;
}

/// Vertical tilt (degrees) for a given vertical velocity
#[inline]
pub fn tilt_for_velocity(velocity: f32) -> f32 {
    use consts::{MAX_ROTATION_DEG, ROTATION_GAIN};
    (velocity * ROTATION_GAIN).clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG)
}

