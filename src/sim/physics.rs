//! Per-tick motion integration
//!
//! All motion is in pixels per tick; the simulation never sees wall-clock time.

use super::state::{Bird, Enemy, Obstacle, Particle, Projectile, ShooterCraft};
use crate::consts::*;
use crate::tilt_for_velocity;

/// Gravity, position and tilt for the bird
pub fn integrate_bird(bird: &mut Bird) {
    bird.vel += GRAVITY;
    bird.pos.y += bird.vel;
    bird.rotation = tilt_for_velocity(bird.vel);
}

/// Jump sets the velocity outright; it never stacks with the current one
pub fn jump(bird: &mut Bird) {
    bird.vel = bird.jump_impulse;
}

/// Direct vertical steering for the shooter craft (no gravity)
pub fn steer_shooter(craft: &mut ShooterCraft, up: bool, down: bool) {
    if up && craft.pos.y > SHOOTER_MOVE_TOP {
        craft.pos.y -= SHOOTER_STEP;
    }
    if down && craft.pos.y < SHOOTER_MOVE_BOTTOM {
        craft.pos.y += SHOOTER_STEP;
    }
}

pub fn advance_obstacle(obstacle: &mut Obstacle) {
    obstacle.x -= obstacle.speed;
}

/// Constant rightward travel; goes inactive once past the right edge
pub fn advance_projectile(projectile: &mut Projectile) {
    projectile.pos.x += projectile.speed;
    if projectile.pos.x > SCREEN_WIDTH {
        projectile.active = false;
    }
}

/// Leftward travel plus a small drift that depends only on time and x
pub fn advance_enemy(enemy: &mut Enemy, time_secs: f32) {
    enemy.pos.x -= enemy.speed;
    enemy.hit_timer = enemy.hit_timer.saturating_sub(1);
    enemy.pos.y += enemy_drift(time_secs, enemy.pos.x);
}

/// Vertical drift for an enemy at horizontal position `x`
pub fn enemy_drift(time_secs: f32, x: f32) -> f32 {
    (time_secs * 3.0 + x * 0.01).sin() * ENEMY_DRIFT_AMPLITUDE
}

pub fn advance_particle(particle: &mut Particle) {
    particle.pos += particle.vel;
    particle.vel.y += PARTICLE_GRAVITY;
    particle.life = particle.life.saturating_sub(1);
}
