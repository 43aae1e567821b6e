//! Cell Golf headless entry point
//!
//! Runs the game in demo mode with the autopilot pressing the button, feeding
//! fixed frame times the way a host's animation loop would.
//!
//! Usage: `cell-golf [config.json] [levels]`

use cell_golf::sim::autopilot;
use cell_golf::{Config, Game, GameError, GameEvent};

/// Levels to play when none is given
const DEFAULT_LEVELS: u32 = 3;
/// Safety stop for a runaway demo
const MAX_FRAMES: u64 = 1_000_000;

fn run(config: Config, levels: u32) -> Result<(), GameError> {
    let frame_ms = config.tick_period_ms;
    let mut game = Game::new(config)?;
    let mut frames: u64 = 0;

    while game.current_level() <= levels && frames < MAX_FRAMES {
        autopilot::act(&mut game)?;
        game.advance(frame_ms);
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::LevelLoaded { level, cells } if level <= levels => {
                    log::info!("Level {:02}: {} cells", level, cells);
                }
                GameEvent::Landed { index } => {
                    let snapshot = game.snapshot();
                    log::debug!(
                        "Landed on cell {} ({} visible)",
                        index,
                        snapshot.visible_cells.len()
                    );
                }
                GameEvent::Missed { balls_remaining } => {
                    log::warn!("Missed! {} balls left", balls_remaining);
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Demo finished after {} frames ({:.1}s simulated)",
        frames,
        frames as f32 * frame_ms / 1000.0
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cell Golf (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };
    let levels = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_LEVELS);

    let result = config.map_err(GameError::from).and_then(|c| run(c, levels));
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
