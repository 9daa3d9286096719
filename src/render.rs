//! Renderer seam
//!
//! Drawing happens outside the core. A renderer receives a read-only
//! snapshot once per frame, after the tick for that frame has finished.

use serde::Serialize;

use crate::game::{Mode, SessionResult};
use crate::sim::{GameEvent, Session};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub session: &'a Session,
    /// Events raised by the most recent tick
    pub events: &'a [GameEvent],
    pub player: Option<&'a str>,
    pub last_result: Option<&'a SessionResult>,
    pub best_score: Option<u32>,
}

pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Text renderer for headless runs: logs screen changes and score updates
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_mode: Option<Mode>,
    last_score: u32,
    frames: u64,
}

impl LogRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        self.frames += 1;

        if self.last_mode != Some(snapshot.mode) {
            log::info!("[frame {}] {:?}", self.frames, snapshot.mode);
            self.last_mode = Some(snapshot.mode);
        }

        let score = snapshot.session.score.score();
        if score != self.last_score {
            log::info!(
                "[frame {}] score {} (shooter {})",
                self.frames,
                score,
                snapshot.session.score.shooter_score()
            );
            self.last_score = score;
        }

        for event in snapshot.events {
            if matches!(event, GameEvent::GameOver | GameEvent::ModeSwitched(_)) {
                log::debug!("[frame {}] {:?}", self.frames, event);
            }
        }
    }
}
