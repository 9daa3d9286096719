//! Session state and core simulation types
//!
//! Everything the tick pipeline mutates lives here. Renderers only ever see
//! a finished tick's `Session` through a shared reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entities::EntityStore;
use super::level::{Difficulty, LevelConfig};
use super::score::ScoreTracker;
use crate::consts::*;

/// Gameplay variant active while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubMode {
    /// Obstacle avoidance
    Flappy,
    /// Zombie-drone shoot-em-up (shooter levels only)
    Shooter,
}

/// Something that happened during a tick, drained by the mode controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Jumped,
    Shot,
    /// Obstacle passed or enemy killed
    Scored,
    EnemyHit,
    EnemyKilled,
    /// Shooter craft rammed by an enemy
    CraftHit,
    ModeSwitched(SubMode),
    GameOver,
}

/// The flappy-mode craft
#[derive(Debug, Clone, Serialize)]
pub struct Bird {
    /// Centre of the bird
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vel: f32,
    pub radius: f32,
    /// Tilt in degrees, derived from velocity
    pub rotation: f32,
    pub jump_impulse: f32,
}

impl Bird {
    pub fn new(jump_impulse: f32) -> Self {
        Self::at(Vec2::new(BIRD_START_X, BIRD_START_Y), jump_impulse)
    }

    pub fn at(pos: Vec2, jump_impulse: f32) -> Self {
        Self {
            pos,
            vel: 0.0,
            radius: BIRD_RADIUS,
            rotation: 0.0,
            jump_impulse,
        }
    }

    /// Collision box, slightly smaller than the drawn bird
    pub fn hitbox(&self) -> Rect {
        let half = self.radius - BIRD_HITBOX_INSET;
        Rect::new(self.pos.x - half, self.pos.y - half, half * 2.0, half * 2.0)
    }
}

/// The shooter-mode craft
#[derive(Debug, Clone, Serialize)]
pub struct ShooterCraft {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub health: u8,
    /// Tick of the last accepted shot
    last_shot_tick: Option<u64>,
}

impl ShooterCraft {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: SHOOTER_SIZE,
            health: SHOOTER_HEALTH,
            last_shot_tick: None,
        }
    }

    pub fn can_shoot(&self, now: u64) -> bool {
        match self.last_shot_tick {
            Some(last) => now.saturating_sub(last) >= SHOT_COOLDOWN_TICKS,
            None => true,
        }
    }

    /// Try to fire. Returns the muzzle position if the cooldown allowed it.
    pub fn fire(&mut self, now: u64) -> Option<Vec2> {
        if !self.can_shoot(now) {
            return None;
        }
        self.last_shot_tick = Some(now);
        Some(self.muzzle())
    }

    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size, self.pos.y + (self.size / 2.0).floor())
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// The single active player craft; its variant is the active sub-mode
#[derive(Debug, Clone, Serialize)]
pub enum Craft {
    Bird(Bird),
    Shooter(ShooterCraft),
}

impl Craft {
    pub fn sub_mode(&self) -> SubMode {
        match self {
            Craft::Bird(_) => SubMode::Flappy,
            Craft::Shooter(_) => SubMode::Shooter,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Craft::Bird(bird) => bird.pos,
            Craft::Shooter(craft) => craft.pos,
        }
    }
}

/// A pipe pair scrolling toward the bird
#[derive(Debug, Clone, Serialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the top pipe (where the gap starts)
    pub gap_top: f32,
    pub gap_size: f32,
    pub speed: f32,
    /// Set once the bird clears the trailing edge
    pub passed: bool,
}

impl Obstacle {
    pub fn trailing_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, PIPE_WIDTH, self.gap_top)
    }

    pub fn bottom_rect(&self) -> Rect {
        let top = self.gap_top + self.gap_size;
        Rect::new(self.x, top, PIPE_WIDTH, SCREEN_HEIGHT - top - GROUND_HEIGHT)
    }

    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap_size / 2.0
    }
}

/// A bullet fired by the shooter craft
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: u32,
    /// Centre
    pub pos: Vec2,
    pub speed: f32,
    /// Cleared once when spent or off-screen; never set again
    pub active: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            speed: PROJECTILE_SPEED,
            active: true,
        }
    }

    pub fn hitbox(&self) -> Rect {
        let h = PROJECTILE_HALF_SIZE;
        Rect::new(self.pos.x - h, self.pos.y - h, h * 2.0, h * 2.0)
    }
}

/// A zombie drone
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: u8,
    /// Ticks left on the hit flash
    pub hit_timer: u32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            size: ENEMY_SIZE,
            speed: ENEMY_SPEED,
            health: ENEMY_HEALTH,
            hit_timer: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn hit_recently(&self) -> bool {
        self.hit_timer > 0
    }

    /// Remove one health point. Returns true if this hit killed it.
    pub fn take_hit(&mut self) -> bool {
        let was_alive = !self.is_dead();
        self.health = self.health.saturating_sub(1);
        self.hit_timer = ENEMY_HIT_FLASH_TICKS;
        was_alive && self.is_dead()
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Particle flavour, used by renderers for colour lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleKind {
    Explosion,
    Score,
}

/// A particle for visual effects (never affects gameplay)
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// Ticks left; removed once it reaches zero
    pub life: u32,
}

/// One play session: everything from level select to game over
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Seed this session's RNG was created from
    pub seed: u64,
    pub level: Difficulty,
    pub config: LevelConfig,
    pub craft: Craft,
    pub entities: EntityStore,
    pub score: ScoreTracker,
    /// Physics stays frozen until the first jump/shoot input
    pub started: bool,
    pub game_over: bool,
    /// Simulation ticks since the session started moving
    pub time_ticks: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Fresh session in the flappy sub-mode with one obstacle queued at the right edge
    pub fn new(level: Difficulty, seed: u64) -> Self {
        let config = level.config();
        let mut session = Self {
            seed,
            level,
            config,
            craft: Craft::Bird(Bird::new(config.jump_impulse)),
            entities: EntityStore::default(),
            score: ScoreTracker::default(),
            started: false,
            game_over: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.entities.spawn_obstacle(&session.config, &mut session.rng);
        session
    }

    pub fn sub_mode(&self) -> SubMode {
        self.craft.sub_mode()
    }

    /// Elapsed simulated time in seconds
    pub fn time_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter the game-over state. Only the first call has any effect.
    ///
    /// Returns true if this call ended the session.
    pub fn trigger_game_over(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        let at = self.craft.pos();
        self.entities
            .spawn_particles(at, ParticleKind::Explosion, EXPLOSION_PARTICLES, &mut self.rng);
        self.emit(GameEvent::GameOver);
        log::info!(
            "Session over on {} with score {}",
            self.config.name,
            self.score.score()
        );
        true
    }
}
