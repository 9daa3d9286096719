//! Idle/demo mode input generator
//!
//! Reads a session and produces the input a cautious player would give.
//! Used for attract mode and the headless binary.

use super::state::{Bird, Craft, Session, ShooterCraft};
use super::tick::TickInput;
use crate::consts::*;

/// Fraction of the gap (from its top) the bird aims for; jumps carry it upward
const GAP_AIM: f32 = 0.7;
/// Dead zone for shooter steering
const STEER_TOLERANCE: f32 = 2.0;

/// Input for the next tick
pub fn drive(session: &Session) -> TickInput {
    match &session.craft {
        Craft::Bird(bird) => drive_bird(session, bird),
        Craft::Shooter(craft) => drive_shooter(session, craft),
    }
}

fn drive_bird(session: &Session, bird: &Bird) -> TickInput {
    let left = bird.pos.x - (bird.radius - BIRD_HITBOX_INSET);
    let target = session
        .entities
        .obstacles
        .iter()
        .find(|o| o.trailing_edge() >= left)
        .map(|o| o.gap_top + o.gap_size * GAP_AIM)
        .unwrap_or(BIRD_START_Y);

    let falling_below = bird.pos.y > target && bird.vel >= 0.0;
    TickInput {
        action: !session.started || falling_below,
        idle_mode: true,
        ..Default::default()
    }
}

fn drive_shooter(session: &Session, craft: &ShooterCraft) -> TickInput {
    // Line up with the closest live enemy still ahead of the craft
    let target = session
        .entities
        .enemies
        .iter()
        .filter(|e| !e.is_dead() && e.pos.x + e.size > craft.pos.x + craft.size)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|e| e.pos.y + (e.size - craft.size) / 2.0)
        .unwrap_or(SCREEN_HEIGHT / 2.0)
        .clamp(SHOOTER_MOVE_TOP, SHOOTER_MOVE_BOTTOM);

    TickInput {
        action: true,
        move_up: craft.pos.y > target + STEER_TOLERANCE,
        move_down: craft.pos.y < target - STEER_TOLERANCE,
        idle_mode: true,
        ..Default::default()
    }
}
