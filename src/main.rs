//! Flappy Blaster headless runner
//!
//! Plays one session on the autopilot, records the result in the profile
//! file and prints it as JSON.
//!
//! Usage: `flappy-blaster [LEVEL] [MAX_TICKS]`

use std::path::Path;

use flappy_blaster::audio::AudioManager;
use flappy_blaster::consts::TICK_RATE;
use flappy_blaster::profiles::ProfileFile;
use flappy_blaster::render::LogRenderer;
use flappy_blaster::sim::{Difficulty, TickInput};
use flappy_blaster::{Game, GameLoop, Screen, Settings};

/// Name used when no player is configured
const DEFAULT_PLAYER: &str = "Autopilot";
/// Two minutes of play
const DEFAULT_MAX_TICKS: u64 = 120 * TICK_RATE as u64;

fn main() {
    env_logger::init();
    log::info!("Flappy Blaster (headless) starting...");

    let settings = Settings::load_or_default(Path::new(Settings::FILE_NAME));
    let mut args = std::env::args().skip(1);

    let level = args
        .next()
        .and_then(|s| s.parse::<u8>().ok())
        .and_then(Difficulty::from_number)
        .unwrap_or(settings.level);
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let seed = settings.resolve_seed();
    log::info!("Seed: {}", seed);

    let audio = AudioManager::from_settings(&settings, None);
    let scores = ProfileFile::open(&settings.profile_path);
    let mut game = Game::new(seed, Box::new(audio), Box::new(scores));
    if let Some(name) = &settings.player_name {
        game.commit_name(name);
    }

    let mut game_loop = GameLoop::new();
    let mut renderer = LogRenderer::default();

    while game_loop.ticks() < max_ticks {
        let input = match game.screen() {
            Screen::HomeMenu => TickInput {
                confirm: true,
                ..Default::default()
            },
            Screen::LevelSelect => TickInput {
                select: Some(level.number()),
                ..Default::default()
            },
            Screen::Playing => TickInput {
                idle_mode: settings.autopilot,
                ..Default::default()
            },
            Screen::NameEntry => {
                game.commit_name(DEFAULT_PLAYER);
                continue;
            }
            Screen::GameOverMenu => break,
        };
        game_loop.step(&mut game, &input, &mut renderer);
    }

    match game.last_result() {
        Some(result) => match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize result: {}", e),
        },
        None => log::info!(
            "Stopped after {} ticks at score {}",
            game_loop.ticks(),
            game.session().score.score()
        ),
    }
    log::info!("Rendered {} frames", renderer.frames());
}
