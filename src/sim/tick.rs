//! Fixed timestep simulation tick
//!
//! Advances a playing session by exactly one logical step. Nothing in here
//! looks at wall-clock time or global state: same session + same input
//! always yields the same result.

use glam::Vec2;

use super::autopilot;
use super::collision;
use super::physics;
use super::state::{Bird, Craft, GameEvent, ParticleKind, Session, ShooterCraft, SubMode};
use crate::consts::*;

/// Input commands for a single tick, sampled once before the tick runs
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (flappy) or fire (shooter); edge-triggered
    pub action: bool,
    /// Held: shooter craft moves up
    pub move_up: bool,
    /// Held: shooter craft moves down
    pub move_down: bool,
    /// Menu confirm (start from the home screen)
    pub confirm: bool,
    /// Back out to the home screen (or quit from it)
    pub cancel: bool,
    /// Numeric menu choice: level 1-4 or game-over option 1-3
    pub select: Option<u8>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Copy with the edge-triggered fields cleared (held state and idle mode kept)
    pub fn held_only(&self) -> Self {
        Self {
            move_up: self.move_up,
            move_down: self.move_down,
            idle_mode: self.idle_mode,
            ..Default::default()
        }
    }
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput) {
    // A finished session is frozen
    if session.game_over {
        return;
    }

    let piloted;
    let input = if input.idle_mode {
        piloted = autopilot::drive(session);
        &piloted
    } else {
        input
    };

    // Hover until the first jump/shoot
    if !session.started {
        if !input.action {
            return;
        }
        session.started = true;
        log::debug!("Session started on {}", session.config.name);
    }

    session.time_ticks += 1;

    if input.action {
        apply_action(session);
    }

    if session.config.shooter_enabled && session.score.take_switch() {
        toggle_sub_mode(session);
    }

    match session.sub_mode() {
        SubMode::Flappy => step_flappy(session),
        SubMode::Shooter => step_shooter(session, input),
    }

    tick_particles(session);
}

/// Advance and sweep cosmetic particles only
pub fn tick_particles(session: &mut Session) {
    for particle in &mut session.entities.particles {
        physics::advance_particle(particle);
    }
    session.entities.sweep_particles();
}

/// Jump or fire, depending on the active craft
fn apply_action(session: &mut Session) {
    let now = session.time_ticks;
    match &mut session.craft {
        Craft::Bird(bird) => {
            physics::jump(bird);
            session.events.push(GameEvent::Jumped);
        }
        Craft::Shooter(craft) => {
            if let Some(muzzle) = craft.fire(now) {
                session.entities.spawn_projectile(muzzle);
                session.events.push(GameEvent::Shot);
            }
        }
    }
}

/// Swap between the flappy and shooter sub-modes
///
/// The new craft takes over the old craft's position with no velocity.
/// Entering the shooter clears every gameplay list; leaving it clears the
/// shooter lists and queues a fresh obstacle.
pub fn toggle_sub_mode(session: &mut Session) {
    let next = match &session.craft {
        Craft::Bird(bird) => {
            session.entities.obstacles.clear();
            session.entities.clear_shooter();
            session.score.reset_shooter_score();
            Craft::Shooter(ShooterCraft::new(bird.pos))
        }
        Craft::Shooter(craft) => {
            session.entities.clear_shooter();
            session
                .entities
                .spawn_obstacle(&session.config, &mut session.rng);
            Craft::Bird(Bird::at(craft.pos, session.config.jump_impulse))
        }
    };
    session.craft = next;
    let mode = session.sub_mode();
    log::debug!(
        "Switched to {:?} at score {}",
        mode,
        session.score.score()
    );
    session.emit(GameEvent::ModeSwitched(mode));
}

fn step_flappy(session: &mut Session) {
    let Craft::Bird(bird) = &mut session.craft else {
        return;
    };
    physics::integrate_bird(bird);
    let bird = bird.clone();

    if collision::bird_out_of_bounds(&bird) {
        session.trigger_game_over();
    }

    for obstacle in &mut session.entities.obstacles {
        physics::advance_obstacle(obstacle);
    }

    if session
        .entities
        .obstacles
        .iter()
        .any(|o| collision::bird_hits_obstacle(&bird, o))
    {
        session.trigger_game_over();
    }

    // No points once the run has ended
    if !session.game_over {
        let mut cleared = Vec::new();
        for obstacle in &mut session.entities.obstacles {
            if !obstacle.passed && obstacle.trailing_edge() < bird.pos.x {
                obstacle.passed = true;
                cleared.push(obstacle.x + PIPE_WIDTH / 2.0);
            }
        }
        for x in cleared {
            session.score.award_pass();
            session.entities.spawn_particles(
                Vec2::new(x, bird.pos.y),
                ParticleKind::Score,
                SCORE_PARTICLES,
                &mut session.rng,
            );
            session.emit(GameEvent::Scored);
        }
    }

    session.entities.sweep_obstacles();
    let spacing = session.score.obstacle_spacing();
    session
        .entities
        .spawn_obstacle_if_due(&session.config, spacing, &mut session.rng);
}

fn step_shooter(session: &mut Session, input: &TickInput) {
    let time_secs = session.time_secs();
    let Craft::Shooter(craft) = &mut session.craft else {
        return;
    };
    physics::steer_shooter(craft, input.move_up, input.move_down);

    let entities = &mut session.entities;
    for enemy in &mut entities.enemies {
        physics::advance_enemy(enemy, time_secs);
    }
    entities.sweep_enemies();
    entities.tick_enemy_spawner(&mut session.rng);

    for projectile in &mut entities.projectiles {
        physics::advance_projectile(projectile);
    }
    entities.sweep_projectiles();

    let hits = collision::resolve_projectile_hits(&mut entities.projectiles, &mut entities.enemies);
    let rammed = collision::resolve_craft_collision(craft, &mut entities.enemies);
    let health = craft.health;
    let out_of_bounds = collision::shooter_out_of_bounds(craft);

    for _ in hits.kills..hits.hits {
        session.emit(GameEvent::EnemyHit);
    }
    if hits.kills > 0 {
        for _ in 0..hits.kills {
            session.emit(GameEvent::EnemyKilled);
        }
        session.score.award_kills(hits.kills);
        session.emit(GameEvent::Scored);
    }

    if rammed {
        session.emit(GameEvent::CraftHit);
        if health == 0 {
            session.trigger_game_over();
        }
    }
    if out_of_bounds {
        session.trigger_game_over();
    }
}
