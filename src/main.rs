//! Dino Catch entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary runs a headless demo session with the autopilot at the wheel.
//!
//! Usage: `dino-catch [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    match native::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dino_catch::platform::{Clock, ManualClock};
    use dino_catch::sim::autopilot;
    use dino_catch::{GameEvent, Session, Tuning, TuningError, Viewport};

    /// 60 Hz host frames
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    #[derive(Debug, thiserror::Error)]
    pub enum RunError {
        #[error("invalid seed `{0}`")]
        Seed(String),
        #[error("failed to read tuning file {path}: {source}")]
        Read {
            path: String,
            #[source]
            source: std::io::Error,
        },
        #[error(transparent)]
        Tuning(#[from] TuningError),
    }

    pub fn run() -> Result<(), RunError> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Dino Catch (native demo) starting...");

        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s.parse::<u64>().map_err(|_| RunError::Seed(s))?,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
        };
        let tuning = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| RunError::Read { path, source })?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };

        let mut session = Session::with_tuning(tuning, seed);
        session.set_viewport(Viewport::new(800.0, 600.0));
        session.start();
        log::info!("Demo session with seed: {}", seed);

        let clock = ManualClock::new(0.0);
        let mut frames = 0;
        while session.state().is_playing() && frames < MAX_FRAMES {
            autopilot::drive(&mut session);
            session.frame_with(&clock);
            for event in session.drain_events() {
                match event {
                    GameEvent::Collected { id } => log::debug!("Caught #{}", id),
                    GameEvent::HazardHit { id, lives_left } => {
                        log::info!("Hit by #{} ({} lives left)", id, lives_left)
                    }
                    GameEvent::GameOver { score } => log::info!("Game over, score {}", score),
                    _ => {}
                }
            }
            clock.advance(FRAME_MS);
            frames += 1;
        }

        let state = session.state();
        log::info!(
            "Demo finished after {:.1}s: score {}, lives {}, phase {:?}",
            clock.now_ms() / 1000.0,
            state.score(),
            state.lives(),
            state.phase()
        );
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is `platform::web::wasm_start`
}
