//! Screen state machine
//!
//! Owns the current session and decides which screen is active. Only the
//! `Playing` screen runs the simulation; every other screen just waits for
//! menu input. Collaborators (audio, score storage) are called synchronously
//! from here at the point an event happens.

use serde::Serialize;

use crate::audio::{AudioSink, SoundEffect};
use crate::profiles::{ScoreStore, normalize_player_name};
use crate::render::Snapshot;
use crate::sim::{Difficulty, GameEvent, Session, SubMode, TickInput, tick, tick_particles};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    HomeMenu,
    LevelSelect,
    Playing,
    NameEntry,
    GameOverMenu,
}

/// Screen plus, while playing, the active sub-mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    HomeMenu,
    LevelSelect,
    Playing(SubMode),
    NameEntry,
    GameOverMenu,
}

/// Game-over menu choices
const OPTION_RESTART: u8 = 1;
const OPTION_LEVEL_SELECT: u8 = 2;
const OPTION_HOME: u8 = 3;

/// Outcome of a finished session, shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub level: Difficulty,
    pub score: u32,
    pub shooter_score: u32,
    /// Beat the player's previous best on this level
    pub new_best: bool,
}

pub struct Game {
    screen: Screen,
    session: Session,
    level: Difficulty,
    /// Established player identity; `None` until a name is committed
    player: Option<String>,
    /// Finished session waiting for a name before it can be recorded
    pending_result: Option<SessionResult>,
    last_result: Option<SessionResult>,
    /// Events from the most recent tick, kept for the renderer
    last_events: Vec<GameEvent>,
    base_seed: u64,
    sessions_started: u64,
    quit_requested: bool,
    audio: Box<dyn AudioSink>,
    scores: Box<dyn ScoreStore>,
}

impl Game {
    pub fn new(seed: u64, audio: Box<dyn AudioSink>, scores: Box<dyn ScoreStore>) -> Self {
        Self {
            screen: Screen::HomeMenu,
            session: Session::new(Difficulty::default(), seed),
            level: Difficulty::default(),
            player: None,
            pending_result: None,
            last_result: None,
            last_events: Vec::new(),
            base_seed: seed,
            sessions_started: 0,
            quit_requested: false,
            audio,
            scores,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> Mode {
        match self.screen {
            Screen::HomeMenu => Mode::HomeMenu,
            Screen::LevelSelect => Mode::LevelSelect,
            Screen::Playing => Mode::Playing(self.session.sub_mode()),
            Screen::NameEntry => Mode::NameEntry,
            Screen::GameOverMenu => Mode::GameOverMenu,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn level(&self) -> Difficulty {
        self.level
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Cancel was pressed on the home screen
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Current player's best on the current level
    pub fn best_score(&self) -> Option<u32> {
        let player = self.player.as_deref()?;
        self.scores.best_score(player, self.level)
    }

    /// Read-only view of the finished tick
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.mode(),
            session: &self.session,
            events: &self.last_events,
            player: self.player(),
            last_result: self.last_result(),
            best_score: self.best_score(),
        }
    }

    /// Run one tick with this tick's input
    pub fn update(&mut self, input: &TickInput) {
        self.last_events.clear();

        match self.screen {
            Screen::HomeMenu => {
                if input.cancel {
                    log::info!("Quit requested");
                    self.quit_requested = true;
                } else if input.confirm || input.action {
                    self.set_screen(Screen::LevelSelect);
                }
            }
            Screen::LevelSelect => {
                if input.cancel {
                    self.set_screen(Screen::HomeMenu);
                } else if let Some(n) = input.select {
                    match Difficulty::from_number(n) {
                        Some(level) => self.start_session(level),
                        None => log::debug!("Ignoring level selection {}", n),
                    }
                }
            }
            Screen::Playing => {
                if input.cancel {
                    log::info!(
                        "Session abandoned at score {}",
                        self.session.score.score()
                    );
                    self.set_screen(Screen::HomeMenu);
                    return;
                }
                tick(&mut self.session, input);
                self.dispatch_events();
                if self.session.game_over {
                    self.finish_session();
                }
            }
            Screen::NameEntry => {
                if input.cancel {
                    self.pending_result = None;
                    self.set_screen(Screen::HomeMenu);
                } else {
                    tick_particles(&mut self.session);
                }
            }
            Screen::GameOverMenu => {
                if input.cancel {
                    self.set_screen(Screen::HomeMenu);
                    return;
                }
                match input.select {
                    Some(OPTION_RESTART) => self.start_session(self.level),
                    Some(OPTION_LEVEL_SELECT) => self.set_screen(Screen::LevelSelect),
                    Some(OPTION_HOME) => self.set_screen(Screen::HomeMenu),
                    Some(n) => log::debug!("Ignoring menu option {}", n),
                    None => tick_particles(&mut self.session),
                }
            }
        }
    }

    /// Accept a name from the name-entry widget
    ///
    /// Blank names are rejected. A pending session result is recorded under
    /// the new identity and the game-over menu is shown.
    pub fn commit_name(&mut self, raw: &str) -> bool {
        let Some(name) = normalize_player_name(raw) else {
            log::debug!("Rejected blank player name");
            return false;
        };
        log::info!("Player identity set: {}", name);
        self.player = Some(name.clone());

        if self.screen == Screen::NameEntry {
            if let Some(result) = self.pending_result.take() {
                self.record(&name, result);
            }
            self.set_screen(Screen::GameOverMenu);
        }
        true
    }

    fn set_screen(&mut self, screen: Screen) {
        if screen != self.screen {
            log::info!("Screen: {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }

    fn start_session(&mut self, level: Difficulty) {
        // Fixed base seed -> reproducible run of sessions
        let seed = self
            .base_seed
            .wrapping_add(self.sessions_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.sessions_started += 1;
        self.level = level;
        self.session = Session::new(level, seed);
        self.pending_result = None;
        log::info!("Starting {} (seed {})", level.as_str(), seed);
        self.set_screen(Screen::Playing);
    }

    fn dispatch_events(&mut self) {
        self.last_events = self.session.drain_events();
        for event in &self.last_events {
            let effect = match event {
                GameEvent::Jumped => SoundEffect::Jump,
                GameEvent::Shot => SoundEffect::Shot,
                GameEvent::Scored => SoundEffect::Score,
                GameEvent::GameOver => SoundEffect::GameOver,
                _ => continue,
            };
            self.audio.play(effect);
        }
    }

    fn finish_session(&mut self) {
        let result = SessionResult {
            level: self.level,
            score: self.session.score.score(),
            shooter_score: self.session.score.shooter_score(),
            new_best: false,
        };
        match self.player.clone() {
            Some(name) => {
                self.record(&name, result);
                self.set_screen(Screen::GameOverMenu);
            }
            None => {
                self.pending_result = Some(result);
                self.set_screen(Screen::NameEntry);
            }
        }
    }

    fn record(&mut self, player: &str, mut result: SessionResult) {
        result.new_best = self.scores.record_score(player, result.level, result.score);
        if result.new_best {
            log::info!(
                "New best for {} on {}: {}",
                player,
                result.level.as_str(),
                result.score
            );
        }
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Craft;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        sounds: Rc<RefCell<Vec<SoundEffect>>>,
        records: Rc<RefCell<Vec<(String, Difficulty, u32)>>>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.sounds.borrow_mut().push(effect);
        }
    }

    impl ScoreStore for Recorder {
        fn record_score(&mut self, player: &str, level: Difficulty, score: u32) -> bool {
            let best = self.best_score(player, level).unwrap_or(0);
            self.records
                .borrow_mut()
                .push((player.to_string(), level, score));
            score > best
        }

        fn best_score(&self, player: &str, level: Difficulty) -> Option<u32> {
            self.records
                .borrow()
                .iter()
                .filter(|(p, l, _)| p == player && *l == level)
                .map(|(_, _, s)| *s)
                .max()
        }
    }

    fn game() -> (Game, Recorder) {
        let recorder = Recorder::default();
        let game = Game::new(42, Box::new(recorder.clone()), Box::new(recorder.clone()));
        (game, recorder)
    }

    fn select(n: u8) -> TickInput {
        TickInput {
            select: Some(n),
            ..Default::default()
        }
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn cancel() -> TickInput {
        TickInput {
            cancel: true,
            ..Default::default()
        }
    }

    fn jump() -> TickInput {
        TickInput {
            action: true,
            ..Default::default()
        }
    }

    /// Start a level and put the bird into the ceiling so the next tick ends it
    fn play_and_crash(game: &mut Game, level: u8) {
        if game.screen() == Screen::HomeMenu {
            game.update(&confirm());
        }
        game.update(&select(level));
        assert_eq!(game.screen(), Screen::Playing);
        if let Craft::Bird(bird) = &mut game.session.craft {
            bird.pos.y = 0.0;
        }
        game.update(&jump());
        assert!(game.session().game_over);
    }

    #[test]
    fn test_menu_flow() {
        let (mut game, _) = game();
        assert_eq!(game.mode(), Mode::HomeMenu);

        game.update(&confirm());
        assert_eq!(game.mode(), Mode::LevelSelect);

        game.update(&cancel());
        assert_eq!(game.mode(), Mode::HomeMenu);

        game.update(&jump());
        game.update(&select(3));
        assert_eq!(game.mode(), Mode::Playing(SubMode::Flappy));
        assert_eq!(game.level(), Difficulty::Hard);
        assert_eq!(game.session().entities.obstacles.len(), 1);
    }

    #[test]
    fn test_invalid_level_ignored() {
        let (mut game, _) = game();
        game.update(&confirm());
        game.update(&select(0));
        game.update(&select(5));
        assert_eq!(game.screen(), Screen::LevelSelect);
    }

    #[test]
    fn test_cancel_on_home_requests_quit() {
        let (mut game, _) = game();
        game.update(&cancel());
        assert!(game.quit_requested());
        assert_eq!(game.screen(), Screen::HomeMenu);
    }

    #[test]
    fn test_crash_without_name_goes_to_name_entry() {
        let (mut game, recorder) = game();
        play_and_crash(&mut game, 1);
        assert_eq!(game.screen(), Screen::NameEntry);
        assert!(recorder.records.borrow().is_empty());

        // Blank names keep us waiting
        assert!(!game.commit_name("   "));
        assert_eq!(game.screen(), Screen::NameEntry);

        assert!(game.commit_name("  ada lovelace "));
        assert_eq!(game.screen(), Screen::GameOverMenu);
        assert_eq!(game.player(), Some("Ada Lovelace"));
        assert_eq!(
            *recorder.records.borrow(),
            vec![("Ada Lovelace".to_string(), Difficulty::Easy, 0)]
        );
    }

    #[test]
    fn test_crash_with_name_records_once() {
        let (mut game, recorder) = game();
        game.commit_name("Grace");
        play_and_crash(&mut game, 2);
        assert_eq!(game.screen(), Screen::GameOverMenu);

        // Idling on the menu never records again
        for _ in 0..10 {
            game.update(&TickInput::default());
        }
        assert_eq!(recorder.records.borrow().len(), 1);
        let result = game.last_result().unwrap();
        assert_eq!(result.level, Difficulty::Medium);
        assert_eq!(result.score, 0);
        assert!(!result.new_best);
    }

    #[test]
    fn test_game_over_sound_plays_once() {
        let (mut game, recorder) = game();
        game.commit_name("Grace");
        play_and_crash(&mut game, 1);
        let sounds = recorder.sounds.borrow();
        assert_eq!(*sounds, vec![SoundEffect::Jump, SoundEffect::GameOver]);
    }

    #[test]
    fn test_game_over_menu_options() {
        let (mut game, _) = game();
        game.commit_name("Grace");
        play_and_crash(&mut game, 4);

        game.update(&select(9));
        assert_eq!(game.screen(), Screen::GameOverMenu);

        game.update(&select(1));
        assert_eq!(game.mode(), Mode::Playing(SubMode::Flappy));
        assert_eq!(game.level(), Difficulty::Fantastic);
        assert!(!game.session().game_over);
        assert_eq!(game.session().score.score(), 0);

        if let Craft::Bird(bird) = &mut game.session.craft {
            bird.pos.y = 0.0;
        }
        game.update(&jump());
        game.update(&select(2));
        assert_eq!(game.screen(), Screen::LevelSelect);

        game.update(&select(1));
        if let Craft::Bird(bird) = &mut game.session.craft {
            bird.pos.y = 0.0;
        }
        game.update(&jump());
        game.update(&select(3));
        assert_eq!(game.screen(), Screen::HomeMenu);
    }

    #[test]
    fn test_restart_uses_fresh_seed() {
        let (mut game, _) = game();
        game.commit_name("Grace");
        play_and_crash(&mut game, 1);
        let first = game.session().seed;
        game.update(&select(1));
        assert_ne!(game.session().seed, first);
    }

    #[test]
    fn test_cancel_while_playing_abandons() {
        let (mut game, recorder) = game();
        game.commit_name("Grace");
        game.update(&confirm());
        game.update(&select(1));
        game.update(&jump());
        game.update(&cancel());
        assert_eq!(game.screen(), Screen::HomeMenu);
        assert!(recorder.records.borrow().is_empty());
    }

    #[test]
    fn test_cancel_name_entry_discards_result() {
        let (mut game, recorder) = game();
        play_and_crash(&mut game, 1);
        game.update(&cancel());
        assert_eq!(game.screen(), Screen::HomeMenu);
        game.commit_name("Late");
        assert!(recorder.records.borrow().is_empty());
    }

    #[test]
    fn test_menus_do_not_simulate() {
        let (mut game, _) = game();
        game.update(&confirm());
        let before = game.session().time_ticks;
        for _ in 0..5 {
            game.update(&jump());
        }
        assert_eq!(game.screen(), Screen::LevelSelect);
        assert_eq!(game.session().time_ticks, before);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut game, _) = game();
        game.commit_name("Grace");
        game.update(&confirm());
        game.update(&select(4));
        game.update(&jump());
        let snapshot = game.snapshot();
        assert_eq!(snapshot.mode, Mode::Playing(SubMode::Flappy));
        assert_eq!(snapshot.player, Some("Grace"));
        assert_eq!(snapshot.events, &[GameEvent::Jumped]);
        assert_eq!(snapshot.session.craft.pos().x, BIRD_START_X);
    }
}
