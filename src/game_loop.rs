//! Fixed-rate driver
//!
//! Converts wall-clock frame time into whole simulation ticks. Each tick sees
//! the same held input. One-shot presses are queued until a tick consumes
//! them, so a press on a frame too short to tick is not lost.

use crate::consts::*;
use crate::game::Game;
use crate::render::Renderer;
use crate::sim::TickInput;

/// Longest frame we try to catch up on, in seconds
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Default)]
pub struct GameLoop {
    accumulator: f32,
    ticks: u64,
    /// One-shot presses not yet seen by a tick
    pending: TickInput,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run as many ticks as `dt` seconds cover (at most `MAX_SUBSTEPS`),
    /// then render once. Returns the number of ticks run.
    pub fn frame(
        &mut self,
        game: &mut Game,
        dt: f32,
        input: &TickInput,
        renderer: &mut dyn Renderer,
    ) -> u32 {
        // NaN maps to 0
        let dt = dt.max(0.0).min(MAX_FRAME_DT);
        self.accumulator += dt;

        self.queue_presses(input);
        let mut input = TickInput {
            move_up: input.move_up,
            move_down: input.move_down,
            idle_mode: input.idle_mode,
            ..self.pending.clone()
        };

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            game.update(&input);
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending = TickInput::default();
            input = input.held_only();
        }

        renderer.render(&game.snapshot());
        substeps
    }

    /// Merge this frame's one-shot presses into the queue; a newer menu pick wins
    fn queue_presses(&mut self, input: &TickInput) {
        self.pending.action |= input.action;
        self.pending.confirm |= input.confirm;
        self.pending.cancel |= input.cancel;
        self.pending.select = input.select.or(self.pending.select);
    }

    /// Exactly one tick and one render, for headless or replayed runs
    pub fn step(&mut self, game: &mut Game, input: &TickInput, renderer: &mut dyn Renderer) {
        game.update(input);
        self.ticks += 1;
        renderer.render(&game.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::game::{Mode, Screen};
    use crate::profiles::PlayerProfiles;
    use crate::render::Snapshot;
    use crate::sim::SubMode;

    #[derive(Default)]
    struct CountingRenderer {
        frames: u32,
        last_mode: Option<Mode>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, snapshot: &Snapshot<'_>) {
            self.frames += 1;
            self.last_mode = Some(snapshot.mode);
        }
    }

    fn playing_game() -> Game {
        let mut game = Game::new(
            11,
            Box::new(AudioManager::default()),
            Box::new(PlayerProfiles::new()),
        );
        game.update(&TickInput {
            confirm: true,
            ..Default::default()
        });
        game.update(&TickInput {
            select: Some(1),
            ..Default::default()
        });
        assert_eq!(game.screen(), Screen::Playing);
        game
    }

    #[test]
    fn test_frame_runs_whole_ticks() {
        let mut game = playing_game();
        let mut game_loop = GameLoop::new();
        let mut renderer = CountingRenderer::default();
        let input = TickInput {
            action: true,
            ..Default::default()
        };

        // 3.6 ticks worth -> 3 ticks, remainder carried
        assert_eq!(game_loop.frame(&mut game, 0.06, &input, &mut renderer), 3);
        assert_eq!(renderer.frames, 1);
        assert_eq!(game.session().time_ticks, 3);
        assert_eq!(renderer.last_mode, Some(Mode::Playing(SubMode::Flappy)));

        // Too short for a tick on its own, but the remainder tips it over
        assert_eq!(game_loop.frame(&mut game, 0.01, &TickInput::default(), &mut renderer), 1);
        assert_eq!(renderer.frames, 2);
        assert_eq!(game_loop.ticks(), 4);
    }

    #[test]
    fn test_action_applies_once_per_frame() {
        let mut game = playing_game();
        let mut game_loop = GameLoop::new();
        let mut renderer = CountingRenderer::default();
        let input = TickInput {
            action: true,
            ..Default::default()
        };

        game_loop.frame(&mut game, 0.06, &input, &mut renderer);
        // One jump then two ticks of gravity
        let vel = match &game.session().craft {
            crate::sim::Craft::Bird(bird) => bird.vel,
            _ => unreachable!(),
        };
        let expected = game.session().config.jump_impulse + 3.0 * GRAVITY;
        assert!((vel - expected).abs() < 1e-4);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut game = playing_game();
        let mut game_loop = GameLoop::new();
        let mut renderer = CountingRenderer::default();

        let ticks = game_loop.frame(&mut game, 5.0, &TickInput::default(), &mut renderer);
        assert!(ticks <= MAX_SUBSTEPS);
        assert_eq!(renderer.frames, 1);
    }

    #[test]
    fn test_press_on_short_frame_is_kept() {
        let mut game = playing_game();
        let mut game_loop = GameLoop::new();
        let mut renderer = CountingRenderer::default();
        let dt = 1.0 / 144.0;
        let press = TickInput {
            action: true,
            ..Default::default()
        };

        assert_eq!(game_loop.frame(&mut game, dt, &press, &mut renderer), 0);
        assert_eq!(game_loop.frame(&mut game, dt, &TickInput::default(), &mut renderer), 0);
        assert!(!game.session().started);

        assert_eq!(game_loop.frame(&mut game, dt, &TickInput::default(), &mut renderer), 1);
        assert!(game.session().started);
        assert_eq!(game.session().time_ticks, 1);
        assert_eq!(game.last_events(), &[crate::sim::GameEvent::Jumped]);

        // Consumed: later ticks only fall
        game_loop.frame(&mut game, 0.03, &TickInput::default(), &mut renderer);
        let vel = match &game.session().craft {
            crate::sim::Craft::Bird(bird) => bird.vel,
            _ => unreachable!(),
        };
        let ticks = game.session().time_ticks as f32;
        let expected = game.session().config.jump_impulse + ticks * GRAVITY;
        assert!((vel - expected).abs() < 1e-4);
    }

    #[test]
    fn test_menu_press_on_short_frame_is_kept() {
        let mut game = Game::new(
            3,
            Box::new(AudioManager::default()),
            Box::new(PlayerProfiles::new()),
        );
        let mut game_loop = GameLoop::new();
        let mut renderer = CountingRenderer::default();
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };

        game_loop.frame(&mut game, 0.005, &confirm, &mut renderer);
        assert_eq!(game.screen(), Screen::HomeMenu);
        game_loop.frame(&mut game, 0.015, &TickInput::default(), &mut renderer);
        assert_eq!(game.screen(), Screen::LevelSelect);
    }

    #[test]
    fn test_nan_frame_does_not_stall() {
        let mut game = playing_game();
        let mut game_loop = GameLoop::new();
        let mut renderer = CountingRenderer::default();

        assert_eq!(game_loop.frame(&mut game, f32::NAN, &TickInput::default(), &mut renderer), 0);
        assert_eq!(game_loop.frame(&mut game, 0.06, &TickInput::default(), &mut renderer), 3);
    }

    #[test]
    fn test_step_is_one_tick() {
        let mut game = playing_game();
        let mut game_loop = GameLoop::new();
        let mut renderer = CountingRenderer::default();
        let input = TickInput {
            action: true,
            ..Default::default()
        };
        game_loop.step(&mut game, &input, &mut renderer);
        game_loop.step(&mut game, &TickInput::default(), &mut renderer);
        assert_eq!(game.session().time_ticks, 2);
        assert_eq!(renderer.frames, 2);
    }
}
