//! Mini Billiard headless runner
//!
//! Drives the table with the demo player for a fixed number of frames and
//! prints the final table as JSON.
//!
//! Usage: `mini-billiard [settings.json] [frames]`

use mini_billiard::autoplay::AutoPlayer;
use mini_billiard::clock::FrameClock;
use mini_billiard::sim::GameEvent;
use mini_billiard::{Game, HeadlessScene, Settings};

/// Wall-clock resolution of the simulated host loop (seconds)
const HOST_STEP: f32 = 0.001;
const DEFAULT_FRAMES: u64 = 3600;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Mini Billiard (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not use settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut clock = FrameClock::new(settings.target_fps);
    let mut player = AutoPlayer::new(settings.autoplay_seed);
    let mut game = Game::new(HeadlessScene::new(), settings);

    let mut shots = 0u32;
    let mut pocketed = 0u32;
    let mut games = 1u32;
    let mut frame = 0u64;

    while frame < frames {
        let Some(dt) = clock.advance(HOST_STEP) else {
            continue;
        };

        if let Some(event) = player.step(game.state(), game.settings(), dt) {
            game.push_input(event);
        }
        game.update(dt);
        frame += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::ShotFired { .. } => shots += 1,
                GameEvent::BallPocketed { ball, pocket } => {
                    pocketed += 1;
                    log::info!("Frame {}: ball {} pocketed in pocket {}", frame, ball, pocket);
                }
                GameEvent::TableReset { reason } => {
                    games += 1;
                    log::info!("Frame {}: game over ({:?}), racking again", frame, reason);
                }
                GameEvent::BallsCollided { .. } | GameEvent::WallBounce { .. } => {}
            }
        }
    }

    if player.is_holding() {
        log::info!("Stopped with the demo player mid-shot");
    }
    log::info!(
        "Ran {} frames at {} fps: {} shots, {} balls pocketed, {} games",
        frames,
        clock.target_fps(),
        shots,
        pocketed,
        games
    );

    match game.snapshot_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize table: {}", e),
    }

    let scene = game.shutdown();
    if scene.live_count() != 0 || scene.stale_ops() != 0 {
        log::warn!(
            "Scene not clean after shutdown: {} live meshes, {} stale operations",
            scene.live_count(),
            scene.stale_ops()
        );
    }
}
