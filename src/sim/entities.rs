//! Entity collections for one session: spawning and removal sweeps
//!
//! Lists keep spawn order, which is also id order. Collision resolution
//! relies on that for its "first match wins" rule.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::level::LevelConfig;
use super::state::{Enemy, Obstacle, Particle, ParticleKind, Projectile};
use crate::consts::*;

#[derive(Debug, Clone, Serialize)]
pub struct EntityStore {
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Ticks since the last enemy spawn
    pub enemy_spawn_timer: u32,
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            enemy_spawn_timer: 0,
            next_id: 1,
        }
    }
}

impl EntityStore {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a pipe pair at the right edge with a random gap offset
    ///
    /// The gap always lies at least `PIPE_GAP_MARGIN` below the top and the
    /// same distance above the bottom of the screen.
    pub fn spawn_obstacle(&mut self, config: &LevelConfig, rng: &mut impl Rng) {
        let gap = config.gap_size as i32;
        let max_top = (SCREEN_HEIGHT as i32 - gap - PIPE_GAP_MARGIN).max(PIPE_GAP_MARGIN);
        let gap_top = rng.random_range(PIPE_GAP_MARGIN..=max_top) as f32;
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            x: SCREEN_WIDTH,
            gap_top,
            gap_size: config.gap_size,
            speed: config.obstacle_speed,
            passed: false,
        });
    }

    /// Spawn a new obstacle if the list is empty or the newest one has
    /// scrolled far enough in. Returns true if one was spawned.
    pub fn spawn_obstacle_if_due(
        &mut self,
        config: &LevelConfig,
        spacing: f32,
        rng: &mut impl Rng,
    ) -> bool {
        let due = match self.obstacles.last() {
            Some(newest) => newest.x < SCREEN_WIDTH - spacing,
            None => true,
        };
        if due {
            self.spawn_obstacle(config, rng);
        }
        due
    }

    pub fn spawn_projectile(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, pos));
    }

    pub fn spawn_enemy(&mut self, rng: &mut impl Rng) {
        let y = rng.random_range(ENEMY_MIN_Y..=ENEMY_MAX_Y) as f32;
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, Vec2::new(ENEMY_SPAWN_X, y)));
    }

    /// Advance the enemy spawn timer; spawns one enemy per full interval
    pub fn tick_enemy_spawner(&mut self, rng: &mut impl Rng) -> bool {
        self.enemy_spawn_timer += 1;
        if self.enemy_spawn_timer < ENEMY_SPAWN_INTERVAL {
            return false;
        }
        self.enemy_spawn_timer = 0;
        self.spawn_enemy(rng);
        true
    }

    /// Burst of particles with randomised velocities
    pub fn spawn_particles(
        &mut self,
        at: Vec2,
        kind: ParticleKind,
        count: usize,
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            let vel = Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-3.0..=-1.0));
            self.particles.push(Particle {
                pos: at,
                vel,
                kind,
                life: PARTICLE_LIFE,
            });
        }
    }

    /// Drop obstacles whose trailing edge has left the screen
    pub fn sweep_obstacles(&mut self) {
        self.obstacles.retain(|o| o.trailing_edge() >= 0.0);
    }

    /// Drop spent projectiles
    pub fn sweep_projectiles(&mut self) {
        self.projectiles
            .retain(|p| p.active && p.pos.x <= SCREEN_WIDTH);
    }

    /// Drop dead enemies and those that scrolled past the left edge
    pub fn sweep_enemies(&mut self) {
        self.enemies
            .retain(|e| !e.is_dead() && e.pos.x >= -e.size);
    }

    /// Drop particles whose life has run out
    pub fn sweep_particles(&mut self) {
        self.particles.retain(|p| p.life > 0);
    }

    /// Clear the shooter lists (projectiles, enemies) and restart the spawner
    pub fn clear_shooter(&mut self) {
        self.projectiles.clear();
        self.enemies.clear();
        self.enemy_spawn_timer = 0;
    }
}
