//! Collision detection
//!
//! Everything is axis-aligned boxes. No rotated hitboxes: the bird's tilt is
//! purely cosmetic.

use serde::Serialize;

use super::state::{Bird, Enemy, Obstacle, Projectile, ShooterCraft};
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Overlap test. Touching edges do not count, and empty boxes never hit.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Bird against the top and bottom pipe of one obstacle
pub fn bird_hits_obstacle(bird: &Bird, obstacle: &Obstacle) -> bool {
    let hitbox = bird.hitbox();
    hitbox.intersects(&obstacle.top_rect()) || hitbox.intersects(&obstacle.bottom_rect())
}

/// Bird touching the ceiling or sinking into the ground
pub fn bird_out_of_bounds(bird: &Bird) -> bool {
    bird.pos.y < bird.radius || bird.pos.y > SCREEN_HEIGHT - GROUND_HEIGHT - bird.radius
}

/// Shooter craft outside its survivable band
pub fn shooter_out_of_bounds(craft: &ShooterCraft) -> bool {
    craft.pos.y < SHOOTER_FATAL_TOP || craft.pos.y > SHOOTER_FATAL_BOTTOM
}

/// Outcome of resolving projectiles against enemies for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectileHits {
    /// Enemies damaged (including killing blows)
    pub hits: u32,
    /// Enemies whose health crossed to zero
    pub kills: u32,
}

/// Resolve every active projectile against the enemy list
///
/// Each projectile hits at most one enemy (the first overlapping live enemy
/// in list order) and is deactivated by the hit. Dead enemies stay in the
/// list until the next sweep and are ignored here.
pub fn resolve_projectile_hits(projectiles: &mut [Projectile], enemies: &mut [Enemy]) -> ProjectileHits {
    let mut result = ProjectileHits::default();
    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        let hitbox = projectile.hitbox();
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| !e.is_dead() && hitbox.intersects(&e.hitbox()))
        else {
            continue;
        };
        projectile.active = false;
        result.hits += 1;
        if enemy.take_hit() {
            result.kills += 1;
        }
    }
    result
}

/// Resolve the shooter craft ramming into enemies
///
/// The first overlapping live enemy is removed and the craft loses one
/// health point. Returns true on a hit.
pub fn resolve_craft_collision(craft: &mut ShooterCraft, enemies: &mut Vec<Enemy>) -> bool {
    let hitbox = craft.hitbox();
    let Some(index) = enemies
        .iter()
        .position(|e| !e.is_dead() && hitbox.intersects(&e.hitbox()))
    else {
        return false;
    };
    enemies.remove(index);
    craft.health = craft.health.saturating_sub(1);
    true
}
