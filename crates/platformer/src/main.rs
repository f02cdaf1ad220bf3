//! Headless platformer runner
//!
//! Usage: `platformer [config.toml|config.ron]`
//!
//! Plays the configured levels at the nominal fixed step with a scripted
//! input track and logs every kernel and session event. Set `RUST_LOG=debug`
//! to also see ride attach/detach, or `trace` for a per-step summary.

mod config;
mod controller;
mod enemies;
mod pickups;
mod session;

use config::GameConfig;
use controller::InputScript;
use platformer_kernel::config::Config;
use platformer_kernel::foundation::logging;
use platformer_kernel::foundation::time::{FrameClock, Stopwatch};
use session::{GameError, Session, SessionEvent};

fn main() -> Result<(), GameError> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            GameConfig::load_from_file(&path)?
        }
        None => GameConfig::default(),
    };
    config.validate()?;

    let frames = config.frames;
    let mut clock = FrameClock::new(config.physics.nominal_dt, config.physics.max_dt_multiple);
    let mut session = Session::new(config)?;
    log::info!(
        "Level '{}': {} enemies, {} pickups",
        session.level().name,
        session.enemies().len(),
        session.pickups().total()
    );

    let script = InputScript::demo();
    let stopwatch = Stopwatch::start_new();

    // The script replays from its start on every respawn or new level
    let mut attempt_frame = 0;
    for frame in 0..frames {
        let dt = clock.tick(clock.nominal_dt());
        let input = script.input_at(attempt_frame);
        attempt_frame += 1;

        for event in session.update(dt, &input)? {
            match event {
                SessionEvent::Kernel(kernel) => {
                    log::info!("[frame {}] kernel: {:?}", frame, kernel);
                }
                SessionEvent::Respawned { .. } | SessionEvent::LevelStarted { .. } => {
                    attempt_frame = 0;
                    log::info!("[frame {}] {:?}", frame, event);
                }
                _ => log::info!("[frame {}] {:?}", frame, event),
            }
        }

        if session.is_complete() {
            break;
        }
    }

    let actor = session.world().actor();
    log::info!(
        "Simulated {} frames ({:.2}s) in {:.1}ms",
        clock.frame_count(),
        clock.total_time(),
        stopwatch.elapsed_millis()
    );
    log::info!(
        "Level '{}', actor at {:?}, grounded: {}, deaths: {}",
        session.level().name,
        actor.position,
        actor.is_grounded(),
        session.deaths()
    );
    log::info!(
        "Pickups: {} this run, {}/{} on this level",
        session.collected(),
        session.pickups().collected(),
        session.pickups().total()
    );
    if !session.enemies().is_empty() {
        for enemy in session.enemies().iter() {
            log::debug!("{:?} enemy at {:?}", enemy.kind(), enemy.position());
        }
    }

    Ok(())
}
