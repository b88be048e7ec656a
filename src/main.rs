//! Polycore entry point
//!
//! Runs a headless attract-mode round: the autopilot plays, frames are
//! tessellated but not shown, and a new best time is persisted.
//!
//! Usage: `polycore [seed] [max_frames]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use polycore::audio::LoggingAudio;
use polycore::consts::{FPS, SCREEN_HEIGHT, SCREEN_WIDTH};
use polycore::persistence::{JsonFileStore, SETTINGS_FILE};
use polycore::platform::{DemoInput, FramePacer, HeadlessSurface, SystemClock};
use polycore::{Game, Platform, Settings};

/// Log surface stats once a second
const SURFACE_LOG_EVERY: u64 = FPS as u64;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(time_seed);
    let max_frames = args.next().and_then(|s| s.parse::<u64>().ok());

    log::info!(
        "Polycore starting (seed {}, {}x{} @ {} fps)",
        seed,
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        FPS
    );

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let mut input = DemoInput::default();
    let clock = SystemClock::new();
    let mut surface = HeadlessSurface::new(SURFACE_LOG_EVERY);
    let mut audio = LoggingAudio::default();
    let mut scores = JsonFileStore::default();
    log::info!("High score file: {}", scores.path().display());
    let mut platform = Platform {
        input: &mut input,
        clock: &clock,
        surface: &mut surface,
        audio: &mut audio,
        scores: &mut scores,
    };

    let mut game = Game::new(seed, settings, &mut platform);
    game.quit_after_round();
    let mut pacer = FramePacer::new(FPS);
    game.run(&mut platform, &mut pacer, max_frames);

    log::info!(
        "Polycore shutting down after {} frames (score {:.1}s, best {:.1}s)",
        game.frames(),
        game.session.score,
        game.high_score()
    );
}

/// Seed from the wall clock when none is given
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
